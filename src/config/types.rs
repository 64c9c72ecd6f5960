//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::ResourceProfile;
use crate::domain::value_objects::UnmatchedPolicy;
use crate::error::StampResult;

use super::loader;

/// Cloud project settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Falls back to `PROJECT_ID` and then to the gcloud default project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Cloud Run service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub region: String,
    pub platform: String,
    pub allow_unauthenticated: bool,
    /// Directory passed to `--source`
    pub source: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "slack-bot".to_string(),
            region: "asia-northeast1".to_string(),
            platform: "managed".to_string(),
            allow_unauthenticated: true,
            source: PathBuf::from("."),
        }
    }
}

/// Template and artifact locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    pub unmatched: UnmatchedPolicy,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("service.yaml.template"),
            output: PathBuf::from("service.yaml"),
            unmatched: UnmatchedPolicy::Warn,
        }
    }
}

/// gcloud CLI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GcloudConfig {
    pub binary: String,
}

impl Default for GcloudConfig {
    fn default() -> Self {
        Self {
            binary: "gcloud".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub resources: ResourceProfile,

    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub gcloud: GcloudConfig,
}

impl Config {
    /// Load configuration from a TOML file, ignoring unknown keys
    pub fn load(path: &Path) -> StampResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }
}
