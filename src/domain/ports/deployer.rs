//! Deployer port - triggers the external deployment

use crate::domain::entities::DeployRequest;
use crate::error::StampResult;

/// Executes a deployment
pub trait Deployer {
    /// Name of the underlying tool (for logging)
    fn name(&self) -> &str;

    /// Run the deployment; any failure is `DeploymentInvocationFailure`
    fn deploy(&self, request: &DeployRequest) -> StampResult<()>;
}
