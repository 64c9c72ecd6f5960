//! Common test utilities for Stamp CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project and home directories plus a fake `gcloud`
//! - Fixtures: reusable templates and inputs

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
