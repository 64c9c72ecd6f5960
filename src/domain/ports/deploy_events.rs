//! Deploy Event Port
//!
//! Provides an observable interface for the materialize/deploy pipeline.
//! Enables progress reporting and JSON event streams.

use std::fmt;
use std::path::PathBuf;

use crate::domain::entities::UnmatchedPlaceholder;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    ResolveDerived,
    Substitute,
    WriteArtifact,
    InvokeDeploy,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::ResolveDerived => "resolve",
            Stage::Substitute => "substitute",
            Stage::WriteArtifact => "write",
            Stage::InvokeDeploy => "deploy",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event emitted during a pipeline run
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Run started
    Started {
        template: PathBuf,
        output: PathBuf,
        service: String,
    },

    /// Stage finished successfully
    StageCompleted { stage: Stage, detail: String },

    /// Stage was skipped (dry run or render)
    StageSkipped { stage: Stage, reason: String },

    /// Template token left unfilled
    Unmatched(UnmatchedPlaceholder),

    /// Materialized artifact is not valid YAML
    InvalidYaml { message: String },

    /// Stage failed; the run stops here
    StageFailed { stage: Stage, error: String },

    /// Run finished
    Completed { digest: String, deployed: bool },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - `ConsoleEventSink`: stage lines for humans
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `NoopEventSink`: silent operation
pub trait DeployEventSink {
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
