//! Input Key Value Object
//!
//! The closed set of values a deployment template can reference.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the input set.
///
/// Each key doubles as the template placeholder name (`${NAME}`), the
/// environment variable it is read from, and the env var handed to the
/// deployed workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKey {
    ProjectId,
    ProjectNumber,
    SlackBotToken,
    SlackSigningSecret,
    SpreadsheetKey,
}

impl InputKey {
    /// All keys, in the order they are passed to the deploy command
    pub const ALL: [InputKey; 5] = [
        InputKey::ProjectId,
        InputKey::ProjectNumber,
        InputKey::SlackBotToken,
        InputKey::SlackSigningSecret,
        InputKey::SpreadsheetKey,
    ];

    /// Keys that must be supplied externally and non-empty before anything runs
    pub const REQUIRED: [InputKey; 3] = [
        InputKey::SlackBotToken,
        InputKey::SlackSigningSecret,
        InputKey::SpreadsheetKey,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InputKey::ProjectId => "PROJECT_ID",
            InputKey::ProjectNumber => "PROJECT_NUMBER",
            InputKey::SlackBotToken => "SLACK_BOT_TOKEN",
            InputKey::SlackSigningSecret => "SLACK_SIGNING_SECRET",
            InputKey::SpreadsheetKey => "SPREADSHEET_KEY",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Whether the value must be redacted in every output
    pub fn is_secret(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
