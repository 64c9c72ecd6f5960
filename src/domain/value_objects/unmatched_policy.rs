//! Unmatched Placeholder Policy
//!
//! Decides what happens when a template still contains tokens that no
//! input could fill.

use serde::{Deserialize, Serialize};

/// Handling of template placeholders with no matching input
///
/// - `Warn`: report each unmatched token and continue (default)
/// - `Error`: abort before anything is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    #[default]
    Warn,
    Error,
}

impl UnmatchedPolicy {
    pub const VALID_VALUES: &'static [&'static str] = &["warn", "error"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}
