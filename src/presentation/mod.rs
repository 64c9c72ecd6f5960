//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring the pipeline to its infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - clap definitions
//! - `factory` - builds the run context (config, inputs, adapters)

pub mod cli;
pub mod factory;
