//! Run-wide deployment arguments.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::strategy::DeploymentStrategy;

/// Input and output file locations for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFiles {
    /// Base config to extend.
    pub import_config: PathBuf,
    /// Extended config destination.
    pub export_config: PathBuf,
    /// Flattened parameter list destination.
    pub export_params: PathBuf,
    /// Flattened tag list destination.
    pub export_tags: PathBuf,
}

impl StageFiles {
    /// Default file names for a stage prefix such as `staging` or `prod`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            import_config: PathBuf::from(format!("{prefix}-config.json")),
            export_config: PathBuf::from(format!("{prefix}-config-export.json")),
            export_params: PathBuf::from(format!("{prefix}-params-export.json")),
            export_tags: PathBuf::from(format!("{prefix}-tags-export.json")),
        }
    }

    /// Rebases every file onto a directory.
    #[must_use]
    pub fn in_dir(self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            import_config: dir.join(self.import_config),
            export_config: dir.join(self.export_config),
            export_params: dir.join(self.export_params),
            export_tags: dir.join(self.export_tags),
        }
    }
}

/// Settings shared by every step of a run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentArgs {
    /// IAM role the model runs under.
    pub model_execution_role: String,
    /// Registry group to resolve the approved package from.
    pub model_package_group_name: String,
    /// SageMaker project id.
    pub project_id: String,
    /// SageMaker project name.
    pub project_name: String,
    /// Bucket receiving data capture output.
    pub s3_bucket: String,
    /// Deployment strategy.
    pub strategy: DeploymentStrategy,
    /// Share of traffic sent to the candidate model.
    pub candidate_weight: f64,
    /// Staging files.
    pub staging: StageFiles,
    /// Production files.
    pub prod: StageFiles,
    /// Whether to also write CloudFormation style parameter and tag lists.
    pub export_cfn_params_tags: bool,
}

impl DeploymentArgs {
    /// Creates args with default strategy, weight and file names.
    #[must_use]
    pub fn new(
        model_execution_role: impl Into<String>,
        model_package_group_name: impl Into<String>,
        project_id: impl Into<String>,
        project_name: impl Into<String>,
        s3_bucket: impl Into<String>,
    ) -> Self {
        Self {
            model_execution_role: model_execution_role.into(),
            model_package_group_name: model_package_group_name.into(),
            project_id: project_id.into(),
            project_name: project_name.into(),
            s3_bucket: s3_bucket.into(),
            strategy: DeploymentStrategy::default(),
            candidate_weight: 1.0,
            staging: StageFiles::with_prefix("staging"),
            prod: StageFiles::with_prefix("prod"),
            export_cfn_params_tags: false,
        }
    }

    /// Sets the strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: DeploymentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the candidate weight.
    #[must_use]
    pub fn with_candidate_weight(mut self, weight: f64) -> Self {
        self.candidate_weight = weight;
        self
    }

    /// Sets the staging files.
    #[must_use]
    pub fn with_staging_files(mut self, files: StageFiles) -> Self {
        self.staging = files;
        self
    }

    /// Sets the production files.
    #[must_use]
    pub fn with_prod_files(mut self, files: StageFiles) -> Self {
        self.prod = files;
        self
    }

    /// Enables or disables the flattened parameter and tag exports.
    #[must_use]
    pub fn with_cfn_export(mut self, enabled: bool) -> Self {
        self.export_cfn_params_tags = enabled;
        self
    }
}
