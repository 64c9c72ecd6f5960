//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod input_key;
mod secret;
mod unmatched_policy;

pub use input_key::InputKey;
pub use secret::{SecretValue, REDACTED};
pub use unmatched_policy::UnmatchedPolicy;
