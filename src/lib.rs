//! Stamp - deployment configuration materializer
//!
//! Stamp validates the secrets a Cloud Run service needs, fills them into a
//! YAML template for human reference, and triggers `gcloud run deploy` with
//! the same values passed as explicit parameters.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    run_check, CheckReport, CheckStatus, DeployOutcome, DeployPipeline, PipelineOptions,
};
pub use config::Config;
pub use domain::entities::{DeployRequest, InputSet, Materialized, Template};
pub use domain::value_objects::{InputKey, SecretValue, UnmatchedPolicy};
pub use error::{StampError, StampResult};
pub use infrastructure::{GcloudCli, LocalArtifactStore};
