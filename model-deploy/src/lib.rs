//! # Model Deploy
//!
//! Builds the staging and production deployment configs for the latest
//! approved model package in a SageMaker model registry.
//!
//! A run is a linear pipeline:
//!
//! - **Registry query**: resolve the newest approved package in a group
//! - **Endpoint inspection**: find the model currently serving each stage
//! - **Config extension**: merge names, strategy weights and tags into the base config
//! - **Export**: write the extended configs and, optionally, CloudFormation lists
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use model_deploy::prelude::*;
//!
//! let client = SageMakerRegistry::from_env(None).await;
//! let args = DeploymentArgs::new(role, group, project_id, project_name, bucket)
//!     .with_strategy(DeploymentStrategy::Canary)
//!     .with_candidate_weight(0.1);
//!
//! let report = run_deployment(&client, &args).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod endpoint;
pub mod errors;
pub mod exporter;
pub mod extender;
pub mod observability;
pub mod pipeline;
pub mod registry;
pub mod testing;
pub mod utils;

#[cfg(test)]
mod integration_tests;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{DeploymentArgs, DeploymentStrategy, StageConfig, StageFiles};
    pub use crate::endpoint::get_previous_model_name;
    pub use crate::errors::{ApiError, DeployError};
    pub use crate::exporter::{to_cfn_style, write_cfn_params_tags, write_config, CfnParameter};
    pub use crate::extender::{ConfigExtender, DeploymentNames};
    pub use crate::pipeline::{run_deployment, DeploymentReport};
    pub use crate::registry::{
        get_approved_package, PackagePage, RegistryClient, ResourceTag, SageMakerRegistry,
    };
}
