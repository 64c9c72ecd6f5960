//! Terminal and NDJSON output

pub mod blocks;
pub mod ci;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod sinks;
pub mod terminal;
pub mod theme;
pub mod views;
