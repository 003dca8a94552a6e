//! Latest approved model package lookup.

use tracing::{debug, error, info};

use super::RegistryClient;
use crate::errors::{DeployError, Result};

/// Page size requested from the registry.
pub const PACKAGE_PAGE_SIZE: i32 = 100;

/// Resolves the ARN of the newest approved model package in a group.
///
/// Pages are fetched only while nothing has been collected and a
/// continuation token remains.
///
/// # Errors
///
/// Returns [`DeployError::Registry`] with the API message when a call fails,
/// or [`DeployError::NotFound`] when pagination ends with no approved package.
pub async fn get_approved_package(
    client: &dyn RegistryClient,
    group: &str,
) -> Result<String> {
    let mut page = client
        .list_approved_packages(group, None)
        .await
        .map_err(|e| registry_fault(&e.message))?;
    let mut approved = std::mem::take(&mut page.arns);

    while approved.is_empty() {
        let Some(token) = page.next_token.take() else {
            break;
        };
        debug!(next_token = %token, "Getting more packages");
        page = client
            .list_approved_packages(group, Some(token))
            .await
            .map_err(|e| registry_fault(&e.message))?;
        approved.append(&mut page.arns);
    }

    let Some(arn) = approved.into_iter().next() else {
        let err = DeployError::not_found(group);
        error!(error = %err, "No approved model package");
        return Err(err);
    };

    info!(model_package_arn = %arn, "Identified the latest approved model package");
    Ok(arn)
}

fn registry_fault(message: &str) -> DeployError {
    error!(error = message, "Model package lookup failed");
    DeployError::registry(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::registry::{MockRegistryClient, PackagePage};
    use crate::testing::FakeRegistry;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_returns_first_arn_of_first_page() {
        let registry = FakeRegistry::new().with_package_pages(vec![PackagePage::new(vec![
            "arn:pkg/2".to_string(),
            "arn:pkg/1".to_string(),
        ])]);

        let arn = get_approved_package(&registry, "group").await.unwrap();
        assert_eq!(arn, "arn:pkg/2");
        assert_eq!(registry.package_requests(), vec![None]);
    }

    #[tokio::test]
    async fn test_follows_tokens_past_empty_pages() {
        let registry = FakeRegistry::new().with_package_pages(vec![
            PackagePage::new(vec![]).with_next_token("t1"),
            PackagePage::new(vec![]).with_next_token("t2"),
            PackagePage::new(vec!["arn:pkg/7".to_string()]).with_next_token("t3"),
        ]);

        let arn = get_approved_package(&registry, "group").await.unwrap();
        assert_eq!(arn, "arn:pkg/7");
        // Stops as soon as a page has results, even with a token left.
        assert_eq!(
            registry.package_requests(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_not_found_after_exhausting_pages() {
        let registry = FakeRegistry::new().with_package_pages(vec![
            PackagePage::new(vec![]).with_next_token("t1"),
            PackagePage::new(vec![]),
        ]);

        let err = get_approved_package(&registry, "churn").await.unwrap_err();
        assert!(matches!(err, DeployError::NotFound { ref group } if group == "churn"));
    }

    #[tokio::test]
    async fn test_api_fault_becomes_registry_error() {
        let mut mock = MockRegistryClient::new();
        mock.expect_list_approved_packages()
            .with(eq("group"), eq(None::<String>))
            .times(1)
            .returning(|_, _| {
                Err(ApiError::new(
                    "AccessDeniedException",
                    "User is not authorized to perform: sagemaker:ListModelPackages",
                ))
            });

        let err = get_approved_package(&mock, "group").await.unwrap_err();
        match err {
            DeployError::Registry { message } => {
                assert_eq!(
                    message,
                    "User is not authorized to perform: sagemaker:ListModelPackages"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fault_on_later_page_is_fatal() {
        let mut mock = MockRegistryClient::new();
        mock.expect_list_approved_packages()
            .with(eq("group"), eq(None::<String>))
            .returning(|_, _| Ok(PackagePage::new(vec![]).with_next_token("t1")));
        mock.expect_list_approved_packages()
            .with(eq("group"), eq(Some("t1".to_string())))
            .returning(|_, _| Err(ApiError::new("ThrottlingException", "Rate exceeded")));

        let err = get_approved_package(&mock, "group").await.unwrap_err();
        assert!(matches!(err, DeployError::Registry { .. }));
    }
}
