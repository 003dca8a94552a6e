//! Extension of a base stage config with the parameters and tags of a run.
//!
//! Computed keys overwrite same-named keys from the base config. Every other
//! base key passes through unchanged. Tags are layered base, then computed
//! `sagemaker:*` tags, then tags copied from the SageMaker project.

mod naming;
mod tags;

pub use naming::{DeploymentNames, MAX_MODEL_NAME_LEN};
pub use tags::fetch_project_tags;

use std::collections::BTreeMap;
use tracing::{debug, error, info};

use crate::config::{format_weight, DeploymentArgs, StageConfig};
use crate::endpoint::get_previous_model_name;
use crate::errors::{DeployError, Result};
use crate::registry::RegistryClient;
use crate::utils::{deployment_timestamp, now_utc, Timestamp};

/// Parameter keys written by the extender.
pub mod params {
    /// SageMaker project name.
    pub const SAGEMAKER_PROJECT_NAME: &str = "SageMakerProjectName";
    /// S3 data capture prefix.
    pub const DATA_CAPTURE_UPLOAD_PATH: &str = "DataCaptureUploadPath";
    /// Candidate model package ARN.
    pub const MODEL_PACKAGE_NAME: &str = "ModelPackageName";
    /// Model execution role ARN.
    pub const MODEL_EXECUTION_ROLE_ARN: &str = "ModelExecutionRoleArn";
    /// Model currently serving the endpoint, or empty.
    pub const PREVIOUS_MODEL_NAME: &str = "PreviousModelName";
    /// Model created from the candidate package.
    pub const CANDIDATE_MODEL_NAME: &str = "CandidateModelName";
    /// Endpoint config created for this run.
    pub const ENDPOINT_CONFIG_NAME: &str = "EndpointConfigName";
    /// Endpoint name.
    pub const ENDPOINT_NAME: &str = "EndpointName";
    /// Deployment strategy.
    pub const DEPLOYMENT_STRATEGY: &str = "DeploymentStrategy";
    /// Candidate traffic weight.
    pub const CANDIDATE_MODEL_WEIGHT: &str = "CandidateModelWeight";
    /// Previous model traffic weight, only for traffic-splitting strategies.
    pub const PREVIOUS_MODEL_WEIGHT: &str = "PreviousModelWeight";
}

/// Tag keys written by the extender.
pub mod tag_keys {
    /// Stage name.
    pub const DEPLOYMENT_STAGE: &str = "sagemaker:deployment-stage";
    /// SageMaker project id.
    pub const PROJECT_ID: &str = "sagemaker:project-id";
    /// SageMaker project name.
    pub const PROJECT_NAME: &str = "sagemaker:project-name";
    /// Deployment strategy.
    pub const DEPLOYMENT_STRATEGY: &str = "sagemaker:deployment-strategy";
}

/// Extends stage configs for one run.
pub struct ConfigExtender<'a> {
    client: &'a dyn RegistryClient,
    args: &'a DeploymentArgs,
}

impl std::fmt::Debug for ConfigExtender<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigExtender")
            .field("project_name", &self.args.project_name)
            .field("strategy", &self.args.strategy)
            .finish_non_exhaustive()
    }
}

impl<'a> ConfigExtender<'a> {
    /// Creates an extender over a registry client and run arguments.
    #[must_use]
    pub fn new(client: &'a dyn RegistryClient, args: &'a DeploymentArgs) -> Self {
        Self { client, args }
    }

    /// Extends a base config using the current time for generated names.
    pub async fn extend(&self, model_package_arn: &str, base: StageConfig) -> Result<StageConfig> {
        self.extend_at(model_package_arn, base, now_utc()).await
    }

    /// Extends a base config using `now` for generated names.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::Config`] when the base config has no
    /// `StageName`, or when the strategy needs an existing endpoint and none
    /// is serving. Endpoint lookup faults propagate unchanged.
    pub async fn extend_at(
        &self,
        model_package_arn: &str,
        base: StageConfig,
        now: Timestamp,
    ) -> Result<StageConfig> {
        let args = self.args;
        let stage_name = base
            .stage_name()
            .ok_or_else(|| {
                DeployError::config("Configuration file must include StageName parameter")
            })?
            .to_string();

        let names = DeploymentNames::new(
            &args.project_name,
            &stage_name,
            args.strategy,
            &args.s3_bucket,
            &deployment_timestamp(now),
        );
        debug!(stage = %stage_name, ?names, "Computed deployment names");

        let previous_model_name = get_previous_model_name(self.client, &names.endpoint_name)
            .await?
            .filter(|name| !name.is_empty());
        if args.strategy.requires_existing_endpoint() && previous_model_name.is_none() {
            return Err(DeployError::config(format!(
                "{} requires an existing endpoint. Stage = {stage_name}: No endpoint found.",
                args.strategy
            )));
        }
        if let Some(ref previous) = previous_model_name {
            info!(
                stage = %stage_name,
                previous_model_name = %previous,
                "Found model serving endpoint"
            );
        }

        let mut new_params = BTreeMap::from([
            (params::SAGEMAKER_PROJECT_NAME, args.project_name.clone()),
            (params::DATA_CAPTURE_UPLOAD_PATH, names.data_capture_upload_path),
            (params::MODEL_PACKAGE_NAME, model_package_arn.to_string()),
            (params::MODEL_EXECUTION_ROLE_ARN, args.model_execution_role.clone()),
            (params::PREVIOUS_MODEL_NAME, previous_model_name.unwrap_or_default()),
            (params::CANDIDATE_MODEL_NAME, names.candidate_model_name),
            (params::ENDPOINT_CONFIG_NAME, names.endpoint_config_name),
            (params::ENDPOINT_NAME, names.endpoint_name),
            (params::DEPLOYMENT_STRATEGY, args.strategy.to_string()),
            (params::CANDIDATE_MODEL_WEIGHT, format_weight(args.candidate_weight)),
        ]);
        if args.strategy.splits_traffic() {
            new_params.insert(
                params::PREVIOUS_MODEL_WEIGHT,
                format_weight(1.0 - args.candidate_weight),
            );
        }

        let mut new_tags = BTreeMap::from([
            (tag_keys::DEPLOYMENT_STAGE.to_string(), stage_name.clone()),
            (tag_keys::PROJECT_ID.to_string(), args.project_id.clone()),
            (tag_keys::PROJECT_NAME.to_string(), args.project_name.clone()),
            (tag_keys::DEPLOYMENT_STRATEGY.to_string(), args.strategy.to_string()),
        ]);
        match fetch_project_tags(self.client, &args.project_name).await {
            Ok(project_tags) => new_tags.extend(project_tags),
            Err(e) => error!(
                project_name = %args.project_name,
                error = %e,
                "Error getting project tags"
            ),
        }

        let StageConfig {
            mut parameters,
            mut tags,
        } = base;
        parameters.extend(new_params.into_iter().map(|(k, v)| (k.to_string(), v)));
        tags.extend(new_tags);

        Ok(StageConfig { parameters, tags })
    }
}
