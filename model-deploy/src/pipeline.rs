//! The end-to-end run: resolve the package, then extend and export the
//! staging config followed by the prod config.
//!
//! Steps run strictly in order and the first failure ends the run. Files
//! already written by earlier steps are left in place.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use crate::config::{DeploymentArgs, StageConfig, StageFiles};
use crate::errors::{DeployError, Result};
use crate::exporter::{to_indented_json, write_cfn_params_tags, write_config};
use crate::extender::ConfigExtender;
use crate::observability::StepTimer;
use crate::registry::{get_approved_package, RegistryClient};

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    /// Identifier attached to every log line of the run.
    pub run_id: Uuid,
    /// The approved model package both configs deploy.
    pub model_package_arn: String,
    /// Extended staging config.
    pub staging: StageConfig,
    /// Extended prod config.
    pub prod: StageConfig,
    /// Every file written, in write order.
    pub files_written: Vec<PathBuf>,
}

/// Runs the whole pipeline against a registry client.
pub async fn run_deployment(
    client: &dyn RegistryClient,
    args: &DeploymentArgs,
) -> Result<DeploymentReport> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "deployment_config",
        %run_id,
        project = %args.project_name,
        strategy = %args.strategy
    );

    async move {
        info!("Getting latest approved model package.");
        let timer = StepTimer::start("registry_query");
        let model_package_arn =
            get_approved_package(client, &args.model_package_group_name).await?;
        timer.finish();
        info!(model_package_arn = %model_package_arn, "Latest approved model package ARN");

        let extender = ConfigExtender::new(client, args);
        let mut files_written = Vec::new();

        let staging = export_stage(
            &extender,
            &model_package_arn,
            "staging",
            &args.staging,
            args.export_cfn_params_tags,
            &mut files_written,
        )
        .await?;
        info!(strategy = %args.strategy, "Exported staging config");

        let prod = export_stage(
            &extender,
            &model_package_arn,
            "prod",
            &args.prod,
            args.export_cfn_params_tags,
            &mut files_written,
        )
        .await?;
        info!(strategy = %args.strategy, "Exported production config");

        Ok::<_, DeployError>(DeploymentReport {
            run_id,
            model_package_arn,
            staging,
            prod,
            files_written,
        })
    }
    .instrument(span)
    .await
}

async fn export_stage(
    extender: &ConfigExtender<'_>,
    model_package_arn: &str,
    stage: &'static str,
    files: &StageFiles,
    export_cfn: bool,
    files_written: &mut Vec<PathBuf>,
) -> Result<StageConfig> {
    let base = StageConfig::load(&files.import_config)?;

    let timer = StepTimer::start("config_extension");
    let config = extender.extend(model_package_arn, base).await?;
    timer.finish();
    let rendered = to_indented_json(&config)?;
    debug!(stage, config = %rendered, "Extended config");

    let timer = StepTimer::start("export");
    write_config(&files.export_config, &config)?;
    files_written.push(files.export_config.clone());
    if export_cfn {
        files_written.extend(write_cfn_params_tags(
            &config,
            &files.export_params,
            &files.export_tags,
        )?);
    }
    timer.finish();

    Ok(config)
}
