//! Error types for model deployment config generation.
//!
//! Every fault aborts the run except project tag enrichment, which the
//! extender logs and discards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fault codes the SageMaker API uses for a resource that does not exist.
pub const NOT_FOUND_CODES: [&str; 2] = ["ValidationException", "ResourceNotFound"];

/// The main error type for deployment config operations.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The registry API failed while listing model packages.
    #[error("Registry error: {message}")]
    Registry {
        /// The message reported by the API.
        message: String,
    },

    /// No approved model package exists for the group.
    #[error("No approved ModelPackage found for ModelPackageGroup: {group}")]
    NotFound {
        /// The model package group name.
        group: String,
    },

    /// A required config field is missing or a strategy precondition failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The endpoint lookup failed for a reason other than a missing endpoint.
    #[error("Endpoint lookup failed for {endpoint}: {source}")]
    EndpointLookup {
        /// The endpoint being inspected.
        endpoint: String,
        /// The underlying API fault.
        #[source]
        source: ApiError,
    },

    /// Reading or writing a config file failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A config file could not be parsed or rendered.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DeployError {
    /// Creates a registry error.
    #[must_use]
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Creates a not found error for a model package group.
    #[must_use]
    pub fn not_found(group: impl Into<String>) -> Self {
        Self::NotFound {
            group: group.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an endpoint lookup error.
    #[must_use]
    pub fn endpoint_lookup(endpoint: impl Into<String>, source: ApiError) -> Self {
        Self::EndpointLookup {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an IO error tied to a file path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns the short kind name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Registry { .. } => "RegistryError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Config(_) => "ConfigError",
            Self::EndpointLookup { .. } => "EndpointLookupError",
            Self::Io { .. } => "IoError",
            Self::Serialization(_) => "SerializationError",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(self.kind()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        if let Self::EndpointLookup { source, .. } = self {
            map.insert("code".to_string(), serde_json::json!(source.code));
        }
        map
    }
}

/// A fault reported by the remote SageMaker API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// The service error code (e.g., "ValidationException").
    pub code: String,
    /// The service error message.
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether the fault means the requested resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        NOT_FOUND_CODES.contains(&self.code.as_str())
    }
}

/// Result alias for deployment config operations.
pub type Result<T, E = DeployError> = std::result::Result<T, E>;
