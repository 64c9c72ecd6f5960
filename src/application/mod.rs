//! Application Layer
//!
//! Orchestrates domain logic with infrastructure ports.
//!
//! - `pipeline` - validate, resolve, substitute, write, deploy
//! - `check` - read-only preflight report

pub mod check;
pub mod pipeline;

pub use check::{run_check, CheckItem, CheckReport, CheckStatus, CheckTarget};
pub use pipeline::{
    resolve_project_id, DeployOutcome, DeployPipeline, PipelineOptions, ProjectSource,
};
