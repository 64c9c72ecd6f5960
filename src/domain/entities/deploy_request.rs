//! Deploy Request Entity
//!
//! The explicit parameter list for `gcloud run deploy`. Built from the same
//! validated input set as the artifact but never read from the artifact.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::InputSet;
use crate::domain::value_objects::{InputKey, SecretValue, REDACTED};
use crate::error::{StampError, StampResult};

/// Env var the deployed workload reads its region from
pub const LOCATION_ENV: &str = "LOCATION";

/// Delimiters tried, in order, when a value contains a comma.
///
/// None of them may occur in an env var name (`[A-Z_]`) or as `=`.
const ALT_DELIMITERS: &[char] = &[
    '@', '#', '|', ';', '~', '!', ':', '%', '+', '&', '?', '/', '-', '.',
];

/// Fixed compute shape for the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceProfile {
    pub memory: String,
    pub cpu: String,
    /// Request timeout in seconds
    pub timeout: u32,
    pub min_instances: u32,
    pub max_instances: u32,
}

impl Default for ResourceProfile {
    fn default() -> Self {
        Self {
            memory: "512Mi".to_string(),
            cpu: "1".to_string(),
            timeout: 540,
            min_instances: 0,
            max_instances: 10,
        }
    }
}

/// Everything the deploy command needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub service: String,
    pub source: PathBuf,
    pub region: String,
    pub platform: String,
    pub project_id: String,
    pub profile: ResourceProfile,
    pub allow_unauthenticated: bool,
    pub env: Vec<(String, SecretValue)>,
}

impl DeployRequest {
    /// Workload env entries: every input plus `LOCATION`
    pub fn env_from_inputs(inputs: &InputSet, region: &str) -> Vec<(String, SecretValue)> {
        let mut env: Vec<(String, SecretValue)> = InputKey::ALL
            .into_iter()
            .filter_map(|k| inputs.get(k).map(|v| (k.name().to_string(), v.clone())))
            .collect();
        env.push((LOCATION_ENV.to_string(), SecretValue::new(region)));
        env
    }

    /// Arguments after the `gcloud` binary.
    ///
    /// With `reveal = false` secret values are replaced by `***`. Fails when
    /// the env values leave no delimiter for `--set-env-vars`.
    pub fn to_args(&self, reveal: bool) -> StampResult<Vec<String>> {
        let mut args: Vec<String> = vec![
            "run".into(),
            "deploy".into(),
            self.service.clone(),
            "--source".into(),
            self.source.display().to_string(),
            "--region".into(),
            self.region.clone(),
            "--platform".into(),
            self.platform.clone(),
            "--project".into(),
            self.project_id.clone(),
            "--memory".into(),
            self.profile.memory.clone(),
            "--cpu".into(),
            self.profile.cpu.clone(),
            "--timeout".into(),
            self.profile.timeout.to_string(),
            "--min-instances".into(),
            self.profile.min_instances.to_string(),
            "--max-instances".into(),
            self.profile.max_instances.to_string(),
        ];

        if self.allow_unauthenticated {
            args.push("--allow-unauthenticated".into());
        } else {
            args.push("--no-allow-unauthenticated".into());
        }

        if !self.env.is_empty() {
            args.push("--set-env-vars".into());
            args.push(self.env_arg(reveal)?);
        }

        Ok(args)
    }

    /// Redacted command line for logs and dry runs
    pub fn display_command(&self, program: &str) -> StampResult<String> {
        let mut parts = vec![program.to_string()];
        parts.extend(self.to_args(false)?.iter().map(|a| shell_quote(a)));
        Ok(parts.join(" "))
    }

    /// Mask every secret env value occurring in `text`
    pub fn redact(&self, text: &str) -> String {
        let mut secrets: Vec<&str> = self
            .env
            .iter()
            .filter(|(name, value)| {
                InputKey::from_name(name).is_some_and(InputKey::is_secret) && !value.is_blank()
            })
            .map(|(_, value)| value.expose())
            .collect();
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));

        let mut out = text.to_string();
        for secret in secrets {
            out = out.replace(secret, REDACTED);
        }
        out
    }

    fn env_arg(&self, reveal: bool) -> StampResult<String> {
        let needs_alt = self.env.iter().any(|(_, v)| v.expose().contains(','));
        let delimiter = if needs_alt {
            ALT_DELIMITERS
                .iter()
                .copied()
                .find(|d| !self.env.iter().any(|(_, v)| v.expose().contains(*d)))
                .ok_or_else(|| StampError::EnvEncoding {
                    message: format!(
                        "{} contain ',' and every alternate delimiter",
                        self.comma_value_names().join(", ")
                    ),
                })?
        } else {
            ','
        };

        let pairs: Vec<String> = self
            .env
            .iter()
            .map(|(name, value)| {
                let shown = match InputKey::from_name(name) {
                    Some(key) if key.is_secret() && !reveal => REDACTED,
                    _ => value.expose(),
                };
                format!("{}={}", name, shown)
            })
            .collect();

        let joined = pairs.join(&delimiter.to_string());
        if needs_alt {
            Ok(format!("^{}^{}", delimiter, joined))
        } else {
            Ok(joined)
        }
    }

    fn comma_value_names(&self) -> Vec<&str> {
        self.env
            .iter()
            .filter(|(_, v)| v.expose().contains(','))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=,:@^".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
