//! Domain Entities

mod deploy_request;
mod input_set;
mod template;

pub use deploy_request::{DeployRequest, ResourceProfile, LOCATION_ENV};
pub use input_set::InputSet;
pub use template::{Materialized, Segment, Template, UnmatchedPlaceholder};
