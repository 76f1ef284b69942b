//! Error types for failure domain decoding and validation.

use fdom_id::IdError;
use thiserror::Error;

use crate::FieldPath;

/// Errors reported by the validator.
///
/// Every variant carries the path of the offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The required datacenter is missing or empty.
    #[error("invalid topology: {path} is required")]
    InvalidTopology { path: FieldPath },

    /// A domain declares `ComputeCluster` granularity but the topology has no
    /// compute cluster.
    #[error("{path} is required because {declared_by} is ComputeCluster")]
    MissingComputeCluster {
        path: FieldPath,
        declared_by: FieldPath,
    },

    /// A domain declares `HostGroup` granularity but the topology has no host
    /// group, or the host group has no name.
    #[error("{path} is required because {declared_by} is HostGroup")]
    MissingHostGroup {
        path: FieldPath,
        declared_by: FieldPath,
    },

    /// A failure domain type string outside the enumerated set.
    #[error("{path}: unknown failure domain type '{value}', expected one of Datacenter, ComputeCluster, HostGroup")]
    UnknownFailureDomainType { path: FieldPath, value: String },

    /// A required string field is empty.
    #[error("{path} must not be empty")]
    EmptyField { path: FieldPath },

    /// The resource name is not a valid DNS-1123 subdomain.
    #[error("{path}: invalid name: {source}")]
    InvalidName {
        path: FieldPath,
        #[source]
        source: IdError,
    },

    /// The document's `apiVersion` or `kind` does not match the resource.
    #[error("{path}: expected '{expected}', got '{actual}'")]
    UnexpectedKind {
        path: FieldPath,
        expected: &'static str,
        actual: String,
    },

    /// Two resources in a list share a name.
    #[error("{path}: duplicate name '{name}'")]
    DuplicateName { path: FieldPath, name: String },
}

impl ValidationError {
    /// Returns the path of the offending field.
    pub fn path(&self) -> &FieldPath {
        match self {
            ValidationError::InvalidTopology { path }
            | ValidationError::MissingComputeCluster { path, .. }
            | ValidationError::MissingHostGroup { path, .. }
            | ValidationError::UnknownFailureDomainType { path, .. }
            | ValidationError::EmptyField { path }
            | ValidationError::InvalidName { path, .. }
            | ValidationError::UnexpectedKind { path, .. }
            | ValidationError::DuplicateName { path, .. } => path,
        }
    }

    /// Prefixes every path carried by the error.
    pub(crate) fn rebase(&mut self, prefix: &FieldPath) {
        match self {
            ValidationError::MissingComputeCluster { path, declared_by }
            | ValidationError::MissingHostGroup { path, declared_by } => {
                *path = prefix.join(path);
                *declared_by = prefix.join(declared_by);
            }
            ValidationError::InvalidTopology { path }
            | ValidationError::UnknownFailureDomainType { path, .. }
            | ValidationError::EmptyField { path }
            | ValidationError::InvalidName { path, .. }
            | ValidationError::UnexpectedKind { path, .. }
            | ValidationError::DuplicateName { path, .. } => {
                *path = prefix.join(path);
            }
        }
    }

    /// Returns a stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidTopology { .. } => "InvalidTopology",
            ValidationError::MissingComputeCluster { .. } => "MissingComputeCluster",
            ValidationError::MissingHostGroup { .. } => "MissingHostGroup",
            ValidationError::UnknownFailureDomainType { .. } => "UnknownFailureDomainType",
            ValidationError::EmptyField { .. } => "EmptyField",
            ValidationError::InvalidName { .. } => "InvalidName",
            ValidationError::UnexpectedKind { .. } => "UnexpectedKind",
            ValidationError::DuplicateName { .. } => "DuplicateName",
        }
    }
}

/// Errors that can occur when decoding or encoding documents.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input is not valid JSON, or does not match the resource shape.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML document could not be parsed.
    #[error("invalid YAML document #{document}: {source}")]
    Yaml {
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    /// Encoding to YAML failed.
    #[error("YAML encoding failed: {0}")]
    YamlEncode(#[source] serde_yaml::Error),

    /// A required top-level field is missing.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// The document has an `apiVersion` this crate does not understand.
    #[error("unsupported apiVersion '{actual}', expected '{expected}'")]
    UnsupportedApiVersion {
        expected: &'static str,
        actual: String,
    },

    /// The document is not a failure domain or failure domain list.
    #[error("unexpected kind '{0}', expected VSphereFailureDomain or VSphereFailureDomainList")]
    UnexpectedKind(String),
}

impl SchemaError {
    /// Returns true if the document was well-formed but of another kind.
    pub fn is_foreign_document(&self) -> bool {
        matches!(
            self,
            SchemaError::UnexpectedKind(_) | SchemaError::UnsupportedApiVersion { .. }
        )
    }
}
