//! ProjectLookup port - resolves cloud project metadata

use crate::error::StampResult;

/// Source of derived project values
pub trait ProjectLookup {
    /// Currently configured default project, if any
    fn default_project(&self) -> StampResult<Option<String>>;

    /// Numeric project identifier for `project_id`.
    ///
    /// Fails with `ExternalLookupFailure` when the service is unreachable or
    /// the project is unknown. Never retried.
    fn project_number(&self, project_id: &str) -> StampResult<String>;
}
