//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports:
//! - `gcloud` - project lookup and deploy through the gcloud CLI
//! - `fs` - atomic artifact writes on the local disk
//! - `gitignore` - checks that the artifact stays out of version control

pub mod fs;
pub mod gcloud;
pub mod gitignore;

pub use fs::LocalArtifactStore;
pub use gcloud::GcloudCli;
pub use gitignore::is_git_ignored;
