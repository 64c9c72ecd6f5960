//! ArtifactStore port - where the materialized artifact lives

use std::path::Path;

use crate::error::StampResult;

/// Storage for the materialized artifact
pub trait ArtifactStore {
    /// Read the template text
    fn read_template(&self, path: &Path) -> StampResult<String>;

    /// Read a previously written artifact; `None` if there is none
    fn read_artifact(&self, path: &Path) -> StampResult<Option<String>>;

    /// Write the artifact, replacing any existing file
    fn write_artifact(&self, path: &Path, content: &str) -> StampResult<()>;

    /// Remove an artifact (missing file is not an error)
    fn remove_artifact(&self, path: &Path) -> StampResult<()>;
}
