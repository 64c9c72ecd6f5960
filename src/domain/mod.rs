//! Domain Layer
//!
//! Pure materialization logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Input set, template, deploy request
//! - `value_objects/` - Immutable value types (InputKey, SecretValue, UnmatchedPolicy)
//! - `ports/` - Interface definitions for infrastructure (gcloud, artifact storage, events)

pub mod entities;
pub mod ports;
pub mod value_objects;
