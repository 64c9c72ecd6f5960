//! Configuration loading

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::UnmatchedPolicy;
use crate::error::{StampError, StampResult};

use super::env_validator::{closest, EnvVarValidator};
use super::types::Config;

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "stamp.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Resolved configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from; `None` means built-in defaults
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StampResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StampError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit path, project config, user config, or defaults.
///
/// Unlike a missing file, a config file that exists but fails to parse is an
/// error: deploying with silently defaulted settings is worse than stopping.
pub fn load_or_default(project_root: &Path, explicit: Option<&Path>) -> StampResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project_config = project_root.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                Some(project_config)
            } else {
                dirs::config_dir()
                    .map(|dir| dir.join("stamp").join("config.toml"))
                    .filter(|p| p.exists())
            }
        }
    };

    let loaded = match candidate {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            LoadedConfig {
                config,
                path: Some(path),
                warnings,
            }
        }
        None => LoadedConfig {
            config: Config::default(),
            path: None,
            warnings: Vec::new(),
        },
    };

    Ok(LoadedConfig {
        config: with_env_overrides(loaded.config),
        ..loaded
    })
}

/// Apply environment variable overrides (STAMP_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |k| std::env::var(k).ok(), &mut std::io::stderr())
}

/// Apply overrides from an arbitrary lookup (for testing)
pub fn with_env_overrides_from<W: Write>(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
    writer: &mut W,
) -> Config {
    if let Some(service) = non_empty(get_env("STAMP_SERVICE")) {
        config.service.name = service;
    }

    if let Some(region) = non_empty(get_env("STAMP_REGION")) {
        config.service.region = region;
    }

    if let Some(binary) = non_empty(get_env("STAMP_GCLOUD")) {
        config.gcloud.binary = binary;
    }

    if let Some(policy) = non_empty(get_env("STAMP_UNMATCHED")) {
        let validator = EnvVarValidator::new("STAMP_UNMATCHED", UnmatchedPolicy::VALID_VALUES);
        config.template.unmatched = validator.parse_with_writer(
            &policy,
            UnmatchedPolicy::parse,
            config.template.unmatched,
            writer,
        );
    }

    config
}

/// Seed the process environment from a dotenv file.
///
/// Variables already set in the environment win. Without an explicit path a
/// missing `.env` is fine; an explicit path must exist.
pub fn load_env_file(explicit: Option<&Path>) -> StampResult<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| StampError::InvalidConfig {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(StampError::InvalidConfig {
                file: PathBuf::from(".env"),
                message: e.to_string(),
            }),
        },
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project",
        "id",
        "service",
        "name",
        "region",
        "platform",
        "allow_unauthenticated",
        "source",
        "resources",
        "memory",
        "cpu",
        "timeout",
        "min_instances",
        "max_instances",
        "template",
        "output",
        "unmatched",
        "gcloud",
        "binary",
    ];

    closest(unknown, CANDIDATES).map(|(candidate, _)| candidate.to_string())
}
