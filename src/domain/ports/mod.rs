//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_store;
pub mod deploy_events;
pub mod deployer;
pub mod project_lookup;

pub use artifact_store::ArtifactStore;
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink, Stage};
pub use deployer::Deployer;
pub use project_lookup::ProjectLookup;
