//! Error types for Stamp
//!
//! Uses `thiserror` for library errors; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stamp operations
pub type StampResult<T> = Result<T, StampError>;

/// Main error type for Stamp operations
#[derive(Error, Debug)]
pub enum StampError {
    /// One or more required inputs are absent or empty
    #[error("missing required configuration: {}", .keys.join(", "))]
    MissingConfiguration { keys: Vec<String> },

    /// A derived value could not be resolved from the external system
    #[error("lookup of {what} failed: {message}")]
    ExternalLookupFailure { what: String, message: String },

    /// Template references placeholders the input set cannot fill (strict mode only)
    #[error("template {file} has unmatched placeholders: {}", .names.join(", "))]
    TemplateMismatch { file: PathBuf, names: Vec<String> },

    /// The deploy command could not be started or exited non-zero
    #[error("deployment failed: {message}")]
    DeploymentInvocationFailure {
        message: String,
        exit_code: Option<i32>,
    },

    /// Env values leave no free delimiter for `--set-env-vars`
    #[error("cannot encode env vars for deploy: {message}")]
    EnvEncoding { message: String },

    /// Template file not found
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StampError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StampError::MissingConfiguration { .. } => 2,
            StampError::ExternalLookupFailure { .. } => 3,
            StampError::DeploymentInvocationFailure { exit_code, .. } => match exit_code {
                Some(code) if *code > 0 => *code,
                _ => 4,
            },
            StampError::TemplateMismatch { .. } => 5,
            StampError::EnvEncoding { .. } => 2,
            _ => 1,
        }
    }

    /// File associated with the error, if any
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            StampError::TemplateMismatch { file, .. }
            | StampError::TemplateNotFound { path: file }
            | StampError::InvalidConfig { file, .. } => Some(file.as_path()),
            _ => None,
        }
    }
}
