//! Fixtures for deployment config tests.

use std::path::Path;

use crate::config::{DeploymentArgs, StageConfig};
use crate::errors::{DeployError, Result};

/// Run arguments for a project named `churn` with the `first` strategy.
#[must_use]
pub fn sample_args() -> DeploymentArgs {
    DeploymentArgs::new(
        "arn:aws:iam::123456789012:role/model-exec",
        "churn-models",
        "p-abc123",
        "churn",
        "ml-bucket",
    )
}

/// Writes a stage config file as indented JSON.
pub fn write_stage_config(path: impl AsRef<Path>, config: &StageConfig) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, config.to_pretty_json()?).map_err(|e| DeployError::io(path, e))
}
