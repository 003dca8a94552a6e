//! Deployment strategies and traffic weight rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the candidate model shares traffic with the model currently serving.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStrategy {
    /// First deployment to a stage; no endpoint exists yet.
    #[default]
    First,
    /// A/B test between candidate and previous model.
    Ab,
    /// Canary release of the candidate model.
    Canary,
    /// Blue/green swap to the candidate model.
    #[value(name = "bluegreen")]
    BlueGreen,
    /// Candidate model receives mirrored traffic.
    Shadow,
}

impl DeploymentStrategy {
    /// All strategies in CLI order.
    pub const ALL: [Self; 5] = [
        Self::First,
        Self::Ab,
        Self::Canary,
        Self::BlueGreen,
        Self::Shadow,
    ];

    /// Returns the wire name used in parameters, tags and resource names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Ab => "ab",
            Self::Canary => "canary",
            Self::BlueGreen => "bluegreen",
            Self::Shadow => "shadow",
        }
    }

    /// Whether traffic is split between the candidate and previous model.
    ///
    /// Only these strategies emit a `PreviousModelWeight` parameter.
    #[must_use]
    pub const fn splits_traffic(self) -> bool {
        matches!(self, Self::Canary | Self::Ab)
    }

    /// Whether the strategy needs an endpoint that is already serving.
    #[must_use]
    pub const fn requires_existing_endpoint(self) -> bool {
        !matches!(self, Self::First)
    }
}

impl fmt::Display for DeploymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strategy name is not recognised.
#[derive(Debug, Clone, Error)]
#[error("Unknown deployment strategy '{0}', expected one of: first, ab, canary, bluegreen, shadow")]
pub struct ParseStrategyError(pub String);

impl FromStr for DeploymentStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

/// Renders a traffic weight as the shortest round-trip decimal.
///
/// Whole numbers keep a trailing `.0`, so `1.0` renders as `"1.0"` and
/// `1.0 - 0.2` as `"0.8"`.
#[must_use]
pub fn format_weight(weight: f64) -> String {
    format!("{weight:?}")
}
