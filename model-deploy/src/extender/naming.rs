//! Resource names derived for a stage deployment.

use crate::config::DeploymentStrategy;

/// SageMaker's limit on model name length.
pub const MAX_MODEL_NAME_LEN: usize = 63;

/// Names and paths computed for one stage of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentNames {
    /// Name of the model created from the candidate package.
    pub candidate_model_name: String,
    /// Name of the endpoint config created for this run.
    pub endpoint_config_name: String,
    /// Stable endpoint name for the project and stage.
    pub endpoint_name: String,
    /// S3 prefix receiving captured requests and responses.
    pub data_capture_upload_path: String,
}

impl DeploymentNames {
    /// Derives the names for a project stage at a formatted timestamp.
    #[must_use]
    pub fn new(
        project_name: &str,
        stage_name: &str,
        strategy: DeploymentStrategy,
        s3_bucket: &str,
        timestamp: &str,
    ) -> Self {
        let candidate_model_name = truncate_chars(
            &format!("Model-{project_name}-{stage_name}-{strategy}-{timestamp}"),
            MAX_MODEL_NAME_LEN,
        );

        Self {
            candidate_model_name,
            endpoint_config_name: format!("EndpointConfig-{project_name}-{stage_name}-{timestamp}"),
            endpoint_name: format!("Endpoint-{project_name}-{stage_name}"),
            data_capture_upload_path: format!("s3://{s3_bucket}/datacapture-{stage_name}"),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
