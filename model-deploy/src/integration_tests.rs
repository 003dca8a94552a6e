//! End-to-end runs against an in-memory registry and real files.

#[cfg(test)]
mod tests {
    use crate::config::{DeploymentArgs, DeploymentStrategy, StageConfig, StageFiles};
    use crate::errors::DeployError;
    use crate::extender::{params, tag_keys, MAX_MODEL_NAME_LEN};
    use crate::pipeline::run_deployment;
    use crate::registry::{PackagePage, ResourceTag};
    use crate::testing::{sample_args, write_stage_config, FakeRegistry};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const PACKAGE_ARN: &str =
        "arn:aws:sagemaker:eu-west-1:123456789012:model-package/churn-models/12";

    fn prepare(dir: &Path, strategy: DeploymentStrategy, weight: f64) -> DeploymentArgs {
        let args = sample_args()
            .with_strategy(strategy)
            .with_candidate_weight(weight)
            .with_staging_files(StageFiles::with_prefix("staging").in_dir(dir))
            .with_prod_files(StageFiles::with_prefix("prod").in_dir(dir))
            .with_cfn_export(true);

        write_stage_config(
            &args.staging.import_config,
            &StageConfig::for_stage("staging")
                .with_parameter("EndpointInstanceType", "ml.t2.medium")
                .with_tag("owner", "data-science"),
        )
        .unwrap();
        write_stage_config(
            &args.prod.import_config,
            &StageConfig::for_stage("prod").with_parameter("EndpointInstanceType", "ml.m5.large"),
        )
        .unwrap();
        args
    }

    fn serving_both_stages(registry: FakeRegistry) -> FakeRegistry {
        registry
            .with_endpoint(
                "Endpoint-churn-staging",
                "EndpointConfig-churn-staging-20240101000000",
                vec!["Model-churn-staging-first-20240101000000".to_string()],
            )
            .with_endpoint(
                "Endpoint-churn-prod",
                "EndpointConfig-churn-prod-20240101000000",
                vec!["Model-churn-prod-first-20240101000000".to_string()],
            )
    }

    #[tokio::test]
    async fn test_first_deployment_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let args = prepare(dir.path(), DeploymentStrategy::First, 1.0);
        let registry = FakeRegistry::new().with_approved_package(PACKAGE_ARN);

        run_deployment(&registry, &args).await.unwrap();

        let staging = StageConfig::load(&args.staging.export_config).unwrap();
        assert_eq!(staging.parameter(params::CANDIDATE_MODEL_WEIGHT), Some("1.0"));
        assert_eq!(staging.parameter(params::PREVIOUS_MODEL_WEIGHT), None);
        assert_eq!(staging.parameter(params::PREVIOUS_MODEL_NAME), Some(""));
        assert_eq!(staging.parameter(params::MODEL_PACKAGE_NAME), Some(PACKAGE_ARN));
        assert_eq!(staging.parameter("EndpointInstanceType"), Some("ml.t2.medium"));
        assert_eq!(staging.tag("owner"), Some("data-science"));
        assert_eq!(staging.tag(tag_keys::DEPLOYMENT_STAGE), Some("staging"));

        let prod = StageConfig::load(&args.prod.export_config).unwrap();
        assert_eq!(prod.parameter(params::ENDPOINT_NAME), Some("Endpoint-churn-prod"));
        assert_eq!(
            prod.parameter(params::DATA_CAPTURE_UPLOAD_PATH),
            Some("s3://ml-bucket/datacapture-prod")
        );
    }

    #[tokio::test]
    async fn test_canary_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let args = prepare(dir.path(), DeploymentStrategy::Canary, 0.2);
        let registry = serving_both_stages(FakeRegistry::new().with_approved_package(PACKAGE_ARN));

        let report = run_deployment(&registry, &args).await.unwrap();

        for (config, previous) in [
            (&report.staging, "Model-churn-staging-first-20240101000000"),
            (&report.prod, "Model-churn-prod-first-20240101000000"),
        ] {
            assert_eq!(config.parameter(params::CANDIDATE_MODEL_WEIGHT), Some("0.2"));
            assert_eq!(config.parameter(params::PREVIOUS_MODEL_WEIGHT), Some("0.8"));
            assert_eq!(config.parameter(params::PREVIOUS_MODEL_NAME), Some(previous));
            assert_eq!(config.parameter(params::DEPLOYMENT_STRATEGY), Some("canary"));
        }
    }

    #[tokio::test]
    async fn test_strategies_without_endpoint_fail() {
        for strategy in [
            DeploymentStrategy::Ab,
            DeploymentStrategy::Canary,
            DeploymentStrategy::BlueGreen,
            DeploymentStrategy::Shadow,
        ] {
            let dir = tempfile::tempdir().unwrap();
            let args = prepare(dir.path(), strategy, 0.5);
            let registry = FakeRegistry::new().with_approved_package(PACKAGE_ARN);

            let err = run_deployment(&registry, &args).await.unwrap_err();

            assert!(matches!(err, DeployError::Config(_)), "{strategy}: {err:?}");
            assert!(!args.staging.export_config.exists());
        }
    }

    #[tokio::test]
    async fn test_cfn_files_mirror_extended_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = prepare(dir.path(), DeploymentStrategy::First, 1.0);
        let registry = FakeRegistry::new()
            .with_approved_package(PACKAGE_ARN)
            .with_project(
                "churn",
                "arn:aws:sagemaker:eu-west-1:123456789012:project/churn",
                vec![ResourceTag::new("cost-center", "ml-1234")],
            );

        let report = run_deployment(&registry, &args).await.unwrap();

        let param_list: Vec<serde_json::Value> = serde_json::from_str(
            &std::fs::read_to_string(&args.prod.export_params).unwrap(),
        )
        .unwrap();
        assert_eq!(param_list.len(), report.prod.parameters.len());
        assert!(param_list
            .iter()
            .all(|p| p.get("ParameterKey").is_some() && p.get("ParameterValue").is_some()));

        let tags: Vec<ResourceTag> =
            serde_json::from_str(&std::fs::read_to_string(&args.staging.export_tags).unwrap())
                .unwrap();
        assert!(tags.contains(&ResourceTag::new("cost-center", "ml-1234")));
        assert!(tags.contains(&ResourceTag::new("owner", "data-science")));
        assert_eq!(registry.project_requests(), vec!["churn".to_string(), "churn".to_string()]);
    }

    #[tokio::test]
    async fn test_long_project_name_truncates_model_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = prepare(dir.path(), DeploymentStrategy::First, 1.0);
        args.project_name = "customer-churn-prediction-with-a-rather-long-name".to_string();
        let registry = FakeRegistry::new().with_approved_package(PACKAGE_ARN);

        let report = run_deployment(&registry, &args).await.unwrap();

        let name = report.prod.parameter(params::CANDIDATE_MODEL_NAME).unwrap();
        assert_eq!(name.len(), MAX_MODEL_NAME_LEN);
        assert!(name.starts_with("Model-customer-churn-prediction"));
    }

    #[tokio::test]
    async fn test_paginated_registry_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let args = prepare(dir.path(), DeploymentStrategy::First, 1.0);
        let registry = FakeRegistry::new().with_package_pages(vec![
            PackagePage::new(vec![]).with_next_token("page-2"),
            PackagePage::new(vec![PACKAGE_ARN.to_string()]),
        ]);

        let report = run_deployment(&registry, &args).await.unwrap();
        assert_eq!(report.model_package_arn, PACKAGE_ARN);
    }

    #[tokio::test]
    async fn test_no_approved_package_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let args = prepare(dir.path(), DeploymentStrategy::First, 1.0);
        let registry = FakeRegistry::new();

        let err = run_deployment(&registry, &args).await.unwrap_err();
        assert!(matches!(err, DeployError::NotFound { .. }));
    }
}
