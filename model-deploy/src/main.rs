//! Command line entry point: resolve the latest approved model package and
//! write the staging and prod deployment configs.

use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

use model_deploy::config::{DeploymentArgs, DeploymentStrategy, StageFiles};
use model_deploy::observability::{init_logging, DEFAULT_LOG_LEVEL};
use model_deploy::pipeline::run_deployment;
use model_deploy::registry::SageMakerRegistry;

#[derive(Debug, Parser)]
#[command(name = "model-deploy")]
#[command(about = "Build deployment configs for the latest approved SageMaker model package")]
#[command(version)]
struct Cli {
    /// Log level or tracing directive
    #[arg(long, env = "LOGLEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// IAM role the deployed model runs under
    #[arg(long)]
    model_execution_role: String,

    /// Model package group to resolve the approved package from
    #[arg(long)]
    model_package_group_name: String,

    /// SageMaker project id
    #[arg(long)]
    sagemaker_project_id: String,

    /// SageMaker project name
    #[arg(long)]
    sagemaker_project_name: String,

    /// Bucket receiving data capture output
    #[arg(long)]
    s3_bucket: String,

    /// AWS region (defaults to the standard region chain)
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Deployment strategy
    #[arg(long, value_enum, default_value_t = DeploymentStrategy::First)]
    deployment_strategy: DeploymentStrategy,

    /// Share of traffic sent to the candidate model
    #[arg(long, default_value_t = 1.0)]
    candidate_weight: f64,

    #[arg(long, default_value = "staging-config.json")]
    import_staging_config: PathBuf,

    #[arg(long, default_value = "prod-config.json")]
    import_prod_config: PathBuf,

    #[arg(long, default_value = "staging-config-export.json")]
    export_staging_config: PathBuf,

    #[arg(long, default_value = "staging-params-export.json")]
    export_staging_params: PathBuf,

    #[arg(long, default_value = "staging-tags-export.json")]
    export_staging_tags: PathBuf,

    #[arg(long, default_value = "prod-config-export.json")]
    export_prod_config: PathBuf,

    #[arg(long, default_value = "prod-params-export.json")]
    export_prod_params: PathBuf,

    #[arg(long, default_value = "prod-tags-export.json")]
    export_prod_tags: PathBuf,

    /// Also write CloudFormation style parameter and tag lists
    #[arg(
        long,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    export_cfn_params_tags: bool,
}

impl Cli {
    fn into_args(self) -> DeploymentArgs {
        DeploymentArgs::new(
            self.model_execution_role,
            self.model_package_group_name,
            self.sagemaker_project_id,
            self.sagemaker_project_name,
            self.s3_bucket,
        )
        .with_strategy(self.deployment_strategy)
        .with_candidate_weight(self.candidate_weight)
        .with_staging_files(StageFiles {
            import_config: self.import_staging_config,
            export_config: self.export_staging_config,
            export_params: self.export_staging_params,
            export_tags: self.export_staging_tags,
        })
        .with_prod_files(StageFiles {
            import_config: self.import_prod_config,
            export_config: self.export_prod_config,
            export_params: self.export_prod_params,
            export_tags: self.export_prod_tags,
        })
        .with_cfn_export(self.export_cfn_params_tags)
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = SageMakerRegistry::from_env(cli.region.clone()).await;
    let args = cli.into_args();
    let report = run_deployment(&client, &args).await?;
    tracing::info!(
        run_id = %report.run_id,
        files = report.files_written.len(),
        "Deployment configs written"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Deployment config generation failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 11] = [
        "model-deploy",
        "--model-execution-role",
        "arn:aws:iam::123:role/exec",
        "--model-package-group-name",
        "churn-models",
        "--sagemaker-project-id",
        "p-1",
        "--sagemaker-project-name",
        "churn",
        "--s3-bucket",
        "bucket",
    ];

    fn parse(extra: &[&str]) -> Cli {
        Cli::try_parse_from(REQUIRED.iter().chain(extra)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).into_args();
        assert_eq!(args.strategy, DeploymentStrategy::First);
        assert!((args.candidate_weight - 1.0).abs() < f64::EPSILON);
        assert!(!args.export_cfn_params_tags);
        assert_eq!(args.staging, StageFiles::with_prefix("staging"));
        assert_eq!(args.prod, StageFiles::with_prefix("prod"));
    }

    #[test]
    fn test_strategy_and_weight() {
        let args = parse(&["--deployment-strategy", "bluegreen", "--candidate-weight", "0.25"])
            .into_args();
        assert_eq!(args.strategy, DeploymentStrategy::BlueGreen);
        assert!((args.candidate_weight - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result =
            Cli::try_parse_from(REQUIRED.iter().chain(&["--deployment-strategy", "single"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cfn_flag_forms() {
        assert!(parse(&["--export-cfn-params-tags"]).export_cfn_params_tags);
        assert!(parse(&["--export-cfn-params-tags", "True"]).export_cfn_params_tags);
        assert!(!parse(&["--export-cfn-params-tags", "false"]).export_cfn_params_tags);
    }

    #[test]
    fn test_missing_required_flag() {
        assert!(Cli::try_parse_from(["model-deploy", "--s3-bucket", "b"]).is_err());
    }
}
