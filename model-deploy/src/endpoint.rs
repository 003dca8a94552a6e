//! Lookup of the model currently serving an endpoint.

use tracing::{debug, info};

use crate::errors::{ApiError, DeployError, Result};
use crate::registry::RegistryClient;

/// Returns the model behind an endpoint's active config, or `None` when the
/// endpoint does not exist yet.
///
/// # Errors
///
/// A missing endpoint or endpoint config is not an error. Any other fault is
/// returned as [`DeployError::EndpointLookup`] wrapping the original
/// [`ApiError`]. An endpoint config without production variants is reported
/// the same way.
pub async fn get_previous_model_name(
    client: &dyn RegistryClient,
    endpoint_name: &str,
) -> Result<Option<String>> {
    let endpoint_config_name = match client.describe_endpoint(endpoint_name).await {
        Ok(name) => name,
        Err(e) if e.is_not_found() => {
            info!(
                endpoint_name,
                "No existing endpoint found. This is expected for first deployment."
            );
            return Ok(None);
        }
        Err(e) => return Err(DeployError::endpoint_lookup(endpoint_name, e)),
    };
    debug!(endpoint_name, endpoint_config_name = %endpoint_config_name, "Endpoint found");

    let models = match client.describe_endpoint_config(&endpoint_config_name).await {
        Ok(models) => models,
        // The config can vanish while the endpoint is being torn down.
        Err(e) if e.is_not_found() => {
            info!(
                endpoint_name,
                endpoint_config_name = %endpoint_config_name,
                "Endpoint config no longer exists"
            );
            return Ok(None);
        }
        Err(e) => return Err(DeployError::endpoint_lookup(endpoint_name, e)),
    };

    models.into_iter().next().map(Some).ok_or_else(|| {
        DeployError::endpoint_lookup(
            endpoint_name,
            ApiError::new(
                "NoProductionVariants",
                format!("Endpoint config {endpoint_config_name} has no production variants"),
            ),
        )
    })
}
