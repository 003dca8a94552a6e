//! In-memory registry for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::ApiError;
use crate::registry::{PackagePage, RegistryClient, ResourceTag};

#[derive(Debug, Clone)]
struct FakeEndpoint {
    config_name: String,
    models: Vec<String>,
}

#[derive(Debug, Clone)]
struct FakeProject {
    arn: String,
    tags: Vec<ResourceTag>,
}

/// A registry that serves canned responses and records requests.
///
/// Unknown endpoints and projects fail with `ValidationException`, the code
/// SageMaker uses for missing resources.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    package_pages: Vec<PackagePage>,
    package_error: Option<ApiError>,
    endpoints: HashMap<String, FakeEndpoint>,
    projects: HashMap<String, FakeProject>,
    package_requests: Mutex<Vec<Option<String>>>,
    endpoint_requests: Mutex<Vec<String>>,
    project_requests: Mutex<Vec<String>>,
}

impl FakeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package pages, linked by their continuation tokens.
    #[must_use]
    pub fn with_package_pages(mut self, pages: Vec<PackagePage>) -> Self {
        self.package_pages = pages;
        self
    }

    /// Registers a single page holding one approved package.
    #[must_use]
    pub fn with_approved_package(self, arn: impl Into<String>) -> Self {
        self.with_package_pages(vec![PackagePage::new(vec![arn.into()])])
    }

    /// Makes every package listing fail.
    #[must_use]
    pub fn with_package_error(mut self, error: ApiError) -> Self {
        self.package_error = Some(error);
        self
    }

    /// Registers a live endpoint.
    #[must_use]
    pub fn with_endpoint(
        mut self,
        endpoint_name: impl Into<String>,
        config_name: impl Into<String>,
        models: Vec<String>,
    ) -> Self {
        self.endpoints.insert(
            endpoint_name.into(),
            FakeEndpoint {
                config_name: config_name.into(),
                models,
            },
        );
        self
    }

    /// Registers a project and its tags.
    #[must_use]
    pub fn with_project(
        mut self,
        project_name: impl Into<String>,
        arn: impl Into<String>,
        tags: Vec<ResourceTag>,
    ) -> Self {
        self.projects.insert(
            project_name.into(),
            FakeProject {
                arn: arn.into(),
                tags,
            },
        );
        self
    }

    /// Continuation tokens of each package listing, in call order.
    #[must_use]
    pub fn package_requests(&self) -> Vec<Option<String>> {
        self.package_requests.lock().clone()
    }

    /// Endpoint names described, in call order.
    #[must_use]
    pub fn endpoint_requests(&self) -> Vec<String> {
        self.endpoint_requests.lock().clone()
    }

    /// Project names described, in call order.
    #[must_use]
    pub fn project_requests(&self) -> Vec<String> {
        self.project_requests.lock().clone()
    }
}

fn missing(kind: &str, name: &str) -> ApiError {
    ApiError::new("ValidationException", format!("Could not find {kind} \"{name}\"."))
}

#[async_trait]
impl RegistryClient for FakeRegistry {
    async fn list_approved_packages(
        &self,
        _group: &str,
        next_token: Option<String>,
    ) -> Result<PackagePage, ApiError> {
        self.package_requests.lock().push(next_token.clone());
        if let Some(ref err) = self.package_error {
            return Err(err.clone());
        }

        let index = match next_token {
            None => 0,
            Some(token) => {
                self.package_pages
                    .iter()
                    .position(|page| page.next_token.as_deref() == Some(token.as_str()))
                    .ok_or_else(|| ApiError::new("ValidationException", "Invalid NextToken"))?
                    + 1
            }
        };
        Ok(self.package_pages.get(index).cloned().unwrap_or_default())
    }

    async fn describe_endpoint(&self, endpoint_name: &str) -> Result<String, ApiError> {
        self.endpoint_requests.lock().push(endpoint_name.to_string());
        self.endpoints
            .get(endpoint_name)
            .map(|endpoint| endpoint.config_name.clone())
            .ok_or_else(|| missing("endpoint", endpoint_name))
    }

    async fn describe_endpoint_config(
        &self,
        endpoint_config_name: &str,
    ) -> Result<Vec<String>, ApiError> {
        self.endpoints
            .values()
            .find(|endpoint| endpoint.config_name == endpoint_config_name)
            .map(|endpoint| endpoint.models.clone())
            .ok_or_else(|| missing("endpoint configuration", endpoint_config_name))
    }

    async fn describe_project(&self, project_name: &str) -> Result<String, ApiError> {
        self.project_requests.lock().push(project_name.to_string());
        self.projects
            .get(project_name)
            .map(|project| project.arn.clone())
            .ok_or_else(|| missing("project", project_name))
    }

    async fn list_tags(&self, resource_arn: &str) -> Result<Vec<ResourceTag>, ApiError> {
        self.projects
            .values()
            .find(|project| project.arn == resource_arn)
            .map(|project| project.tags.clone())
            .ok_or_else(|| missing("resource", resource_arn))
    }
}
