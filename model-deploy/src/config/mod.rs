//! Deployment arguments, strategies and stage config documents.

mod args;
mod stage;
mod strategy;

pub use args::{DeploymentArgs, StageFiles};
pub use stage::{StageConfig, STAGE_NAME_KEY};
pub use strategy::{format_weight, DeploymentStrategy, ParseStrategyError};
