//! Tags copied from the owning SageMaker project.

use std::collections::BTreeMap;

use crate::errors::ApiError;
use crate::registry::RegistryClient;

/// Fetches every tag on a project.
///
/// Callers treat a failure as "no project tags": enrichment is optional and
/// must never abort a run.
pub async fn fetch_project_tags(
    client: &dyn RegistryClient,
    project_name: &str,
) -> Result<BTreeMap<String, String>, ApiError> {
    let project_arn = client.describe_project(project_name).await?;
    let tags = client.list_tags(&project_arn).await?;
    Ok(tags.into_iter().map(|tag| (tag.key, tag.value)).collect())
}
