//! Model registry access.
//!
//! [`RegistryClient`] is the seam between the deployment logic and the
//! SageMaker API. The production implementation is [`SageMakerRegistry`];
//! tests use [`crate::testing::FakeRegistry`] or a `mockall` mock.

mod query;
mod sagemaker;

pub use query::{get_approved_package, PACKAGE_PAGE_SIZE};
pub use sagemaker::SageMakerRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// One page of approved model packages, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagePage {
    /// Model package ARNs on this page.
    pub arns: Vec<String>,
    /// Token for the next page, if any.
    pub next_token: Option<String>,
}

impl PackagePage {
    /// Creates a final page.
    #[must_use]
    pub fn new(arns: Vec<String>) -> Self {
        Self {
            arns,
            next_token: None,
        }
    }

    /// Sets the continuation token.
    #[must_use]
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }
}

/// A key/value tag attached to a SageMaker resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTag {
    /// Tag key.
    #[serde(rename = "Key")]
    pub key: String,
    /// Tag value.
    #[serde(rename = "Value")]
    pub value: String,
}

impl ResourceTag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The SageMaker calls a deployment config run needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Lists approved packages in a group, sorted by creation time, newest first.
    async fn list_approved_packages(
        &self,
        group: &str,
        next_token: Option<String>,
    ) -> Result<PackagePage, ApiError>;

    /// Returns the name of the endpoint config an endpoint is running.
    async fn describe_endpoint(&self, endpoint_name: &str) -> Result<String, ApiError>;

    /// Returns the model names of an endpoint config's production variants, in order.
    async fn describe_endpoint_config(&self, endpoint_config_name: &str)
        -> Result<Vec<String>, ApiError>;

    /// Returns the ARN of a project.
    async fn describe_project(&self, project_name: &str) -> Result<String, ApiError>;

    /// Lists every tag on a resource.
    async fn list_tags(&self, resource_arn: &str) -> Result<Vec<ResourceTag>, ApiError>;
}
