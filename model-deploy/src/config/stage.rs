//! Stage config documents read from and written to JSON files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{DeployError, Result};

/// Parameter key that names the stage a config belongs to.
pub const STAGE_NAME_KEY: &str = "StageName";

/// Parameters and tags for one deployment stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Template parameters.
    #[serde(rename = "Parameters", default)]
    pub parameters: BTreeMap<String, String>,
    /// Resource tags.
    #[serde(rename = "Tags", default)]
    pub tags: BTreeMap<String, String>,
}

impl StageConfig {
    /// Creates an empty stage config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config with only a `StageName` parameter.
    #[must_use]
    pub fn for_stage(stage_name: impl Into<String>) -> Self {
        Self::new().with_parameter(STAGE_NAME_KEY, stage_name)
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Returns the stage name, if the config declares one.
    #[must_use]
    pub fn stage_name(&self) -> Option<&str> {
        self.parameters.get(STAGE_NAME_KEY).map(String::as_str)
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Returns a tag value.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Renders the config as indented JSON.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_without_tags() {
        let config = StageConfig::from_json(
            r#"{"Parameters": {"StageName": "staging", "InstanceType": "ml.m5.large"}}"#,
        )
        .unwrap();

        assert_eq!(config.stage_name(), Some("staging"));
        assert_eq!(config.parameter("InstanceType"), Some("ml.m5.large"));
        assert!(config.tags.is_empty());
    }

    #[test]
    fn test_parse_config_without_parameters() {
        let config = StageConfig::from_json(r#"{"Tags": {"team": "ml"}}"#).unwrap();
        assert!(config.stage_name().is_none());
        assert_eq!(config.tag("team"), Some("ml"));
    }

    #[test]
    fn test_rejects_non_string_parameters() {
        let result = StageConfig::from_json(r#"{"Parameters": {"StageName": 3}}"#);
        assert!(matches!(result, Err(DeployError::Serialization(_))));
    }

    #[test]
    fn test_pretty_json_uses_wire_names() {
        let json = StageConfig::for_stage("prod")
            .with_tag("owner", "ml-platform")
            .to_pretty_json()
            .unwrap();

        assert!(json.contains("\"Parameters\""));
        assert!(json.contains("\"Tags\""));
        assert!(json.contains("\n  "));
    }

    #[test]
    fn test_load_missing_file() {
        let result = StageConfig::load("/nonexistent/prod-config.json");
        assert!(matches!(result, Err(DeployError::Io { .. })));
    }
}
