//! # fdom-id
//!
//! Resource identity types for failure domain resources.
//!
//! ## Design Principles
//!
//! - Failure domain resources are cluster-scoped: the name alone is the identity
//! - Names follow the DNS-1123 subdomain rules of the hosting platform
//! - UIDs are assigned by the platform and never chosen by users
//! - Both types roundtrip through their string form (parse → format → parse)
//!
//! ## Name Format
//!
//! A resource name is at most 253 characters of lowercase alphanumerics,
//! `-` and `.`, where every dot-separated segment starts and ends with an
//! alphanumeric character.
//!
//! Examples:
//! - `us-west-1a`
//! - `dc1.cluster-a.hg-01`

mod error;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export uuid for consumers that need raw UUID operations
pub use uuid::Uuid;
