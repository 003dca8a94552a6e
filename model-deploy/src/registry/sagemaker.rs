//! [`RegistryClient`] backed by the AWS SDK.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sagemaker::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_sagemaker::types::{ModelApprovalStatus, ModelPackageSortBy, SortOrder};
use aws_sdk_sagemaker::Client;

use super::{PackagePage, RegistryClient, ResourceTag, PACKAGE_PAGE_SIZE};
use crate::errors::ApiError;

/// SageMaker API client. Construct once per run and pass it to each step.
#[derive(Debug, Clone)]
pub struct SageMakerRegistry {
    client: Client,
}

impl SageMakerRegistry {
    /// Wraps an existing SDK client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the default credential and region chain.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl RegistryClient for SageMakerRegistry {
    async fn list_approved_packages(
        &self,
        group: &str,
        next_token: Option<String>,
    ) -> Result<PackagePage, ApiError> {
        let output = self
            .client
            .list_model_packages()
            .model_package_group_name(group)
            .model_approval_status(ModelApprovalStatus::Approved)
            .sort_by(ModelPackageSortBy::CreationTime)
            .sort_order(SortOrder::Descending)
            .max_results(PACKAGE_PAGE_SIZE)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| api_error(&e))?;

        Ok(PackagePage {
            arns: output
                .model_package_summary_list()
                .iter()
                .filter_map(|summary| summary.model_package_arn().owned())
                .collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn describe_endpoint(&self, endpoint_name: &str) -> Result<String, ApiError> {
        let output = self
            .client
            .describe_endpoint()
            .endpoint_name(endpoint_name)
            .send()
            .await
            .map_err(|e| api_error(&e))?;

        output.endpoint_config_name().owned().ok_or_else(|| {
            ApiError::new(
                "MissingEndpointConfig",
                format!("Endpoint {endpoint_name} has no endpoint config"),
            )
        })
    }

    async fn describe_endpoint_config(
        &self,
        endpoint_config_name: &str,
    ) -> Result<Vec<String>, ApiError> {
        let output = self
            .client
            .describe_endpoint_config()
            .endpoint_config_name(endpoint_config_name)
            .send()
            .await
            .map_err(|e| api_error(&e))?;

        Ok(output
            .production_variants()
            .iter()
            .filter_map(|variant| variant.model_name().owned())
            .collect())
    }

    async fn describe_project(&self, project_name: &str) -> Result<String, ApiError> {
        let output = self
            .client
            .describe_project()
            .project_name(project_name)
            .send()
            .await
            .map_err(|e| api_error(&e))?;

        output.project_arn().owned().ok_or_else(|| {
            ApiError::new(
                "MissingProjectArn",
                format!("Project {project_name} has no ARN"),
            )
        })
    }

    async fn list_tags(&self, resource_arn: &str) -> Result<Vec<ResourceTag>, ApiError> {
        let mut tags = Vec::new();
        let mut next_token = None;

        loop {
            let output = self
                .client
                .list_tags()
                .resource_arn(resource_arn)
                .set_next_token(next_token)
                .send()
                .await
                .map_err(|e| api_error(&e))?;

            tags.extend(output.tags().iter().filter_map(|tag| {
                Some(ResourceTag::new(tag.key().owned()?, tag.value().owned()?))
            }));

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                return Ok(tags);
            }
        }
    }
}

/// Converts an SDK failure into the service code and message.
fn api_error<E>(err: &E) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = err
        .message()
        .map_or_else(|| DisplayErrorContext(err).to_string(), str::to_string);
    ApiError::new(err.code().unwrap_or("Unknown"), message)
}

/// SDK accessors return `&str` for required members and `Option<&str>` otherwise.
trait SdkText {
    fn owned(self) -> Option<String>;
}

impl SdkText for &str {
    fn owned(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl SdkText for Option<&str> {
    fn owned(self) -> Option<String> {
        self.map(str::to_string)
    }
}
