//! Configuration module for Stamp
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STAMP_*)
//! 3. Project config (./stamp.toml)
//! 4. User config (~/.config/stamp/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! Secret inputs are never read from config files; they come from the
//! environment (optionally seeded from a `.env` file).

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    load_env_file, load_or_default, load_with_warnings, with_env_overrides,
    with_env_overrides_from, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE,
};
pub use types::{Config, GcloudConfig, ProjectConfig, ServiceConfig, TemplateConfig};
