//! # fdom-schema
//!
//! The failure domain resource: a named location in a virtualized
//! infrastructure hierarchy (datacenter → compute cluster → host group) used
//! to spread workloads for availability.
//!
//! ## Design Principles
//!
//! - Resources are declarative, immutable values
//! - Failure domain types are a closed set; unknown types cannot be represented
//! - Optional wire fields map to `Option`, and an unset `autoConfigure` stays
//!   distinct from an explicit `false`
//! - Validation is a pure function that reports the offending field path
//!
//! ## Shape
//!
//! ```text
//! VSphereFailureDomain
//! └── spec
//!     ├── region   { name, type, tagCategory, autoConfigure? }
//!     ├── zone     { name, type, tagCategory, autoConfigure? }
//!     └── topology { datacenter, computeCluster?, hostGroup? { name, autoConfigure? } }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: region/zone/topology data model
//! - [`resource`]: the cluster-scoped resource envelope and its list form
//! - [`validation`]: cross-field consistency rules
//! - [`codec`]: JSON/YAML document decoding and encoding

pub mod codec;
mod error;
mod path;
pub mod resource;
pub mod types;
pub mod validation;

pub use codec::Format;
pub use error::{SchemaError, ValidationError};
pub use path::FieldPath;
pub use resource::*;
pub use types::*;
pub use validation::{
    inspect_items, inspect_list, inspect_resource, inspect_spec, validate_list, validate_resource,
    validate_spec, ValidationReport, ValidationWarning,
};

/// API group the failure domain resource is registered under.
pub const API_GROUP: &str = "infrastructure.cluster.x-k8s.io";

/// API version string.
pub const VERSION: &str = "v1alpha4";

/// Full `apiVersion` value of failure domain documents.
pub const API_VERSION: &str = "infrastructure.cluster.x-k8s.io/v1alpha4";

/// Kind of a single failure domain resource.
pub const KIND: &str = "VSphereFailureDomain";

/// Kind of a failure domain list.
pub const LIST_KIND: &str = "VSphereFailureDomainList";

/// Plural resource path.
pub const PLURAL: &str = "vspherefailuredomains";

/// Resource categories the kind is listed under.
pub const CATEGORIES: &[&str] = &["cluster-api"];

/// Resources are cluster-scoped: identity is the name alone.
pub const SCOPE: &str = "Cluster";
