//! Writing extended configs and CloudFormation parameter/tag lists.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::StageConfig;
use crate::errors::{DeployError, Result};
use crate::registry::ResourceTag;

/// Indentation used for every exported file.
const INDENT: &[u8] = b"    ";

/// A parameter in the shape the CloudFormation CLI expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfnParameter {
    /// Parameter key.
    #[serde(rename = "ParameterKey")]
    pub key: String,
    /// Parameter value.
    #[serde(rename = "ParameterValue")]
    pub value: String,
}

/// Flattens a config into parameter and tag lists.
#[must_use]
pub fn to_cfn_style(config: &StageConfig) -> (Vec<CfnParameter>, Vec<ResourceTag>) {
    let parameters = config
        .parameters
        .iter()
        .map(|(key, value)| CfnParameter {
            key: key.clone(),
            value: value.clone(),
        })
        .collect();
    let tags = config
        .tags
        .iter()
        .map(|(key, value)| ResourceTag::new(key.clone(), value.clone()))
        .collect();
    (parameters, tags)
}

/// Serializes a value as indented JSON.
pub fn to_indented_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = to_indented_json(value)?;
    std::fs::write(path, json).map_err(|e| DeployError::io(path, e))?;
    debug!(path = %path.display(), "Wrote file");
    Ok(())
}

/// Writes an extended config file.
pub fn write_config(path: impl AsRef<Path>, config: &StageConfig) -> Result<()> {
    write_json(path.as_ref(), config)
}

/// Writes the flattened parameter and tag files and returns their paths.
pub fn write_cfn_params_tags(
    config: &StageConfig,
    params_path: impl AsRef<Path>,
    tags_path: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let (parameters, tags) = to_cfn_style(config);
    write_json(params_path.as_ref(), &parameters)?;
    write_json(tags_path.as_ref(), &tags)?;
    Ok(vec![
        params_path.as_ref().to_path_buf(),
        tags_path.as_ref().to_path_buf(),
    ])
}
