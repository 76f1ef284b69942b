//! Region, zone, and topology types.
//!
//! These are plain data carriers; cross-field rules live in
//! [`crate::validation`].

use serde::{Deserialize, Serialize};

use crate::{FieldPath, ValidationError};

// =============================================================================
// Failure Domain Type
// =============================================================================

/// Granularity at which a failure domain is expressed.
///
/// Also decides which [`Topology`] fields are mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureDomainType {
    /// The whole datacenter is the failure domain.
    Datacenter,
    /// A compute cluster inside the datacenter.
    ComputeCluster,
    /// A host group inside a compute cluster.
    HostGroup,
}

impl FailureDomainType {
    /// All failure domain types, coarsest first.
    pub const ALL: [FailureDomainType; 3] = [
        FailureDomainType::Datacenter,
        FailureDomainType::ComputeCluster,
        FailureDomainType::HostGroup,
    ];

    /// Returns the wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureDomainType::Datacenter => "Datacenter",
            FailureDomainType::ComputeCluster => "ComputeCluster",
            FailureDomainType::HostGroup => "HostGroup",
        }
    }

    /// Depth in the datacenter → compute cluster → host group hierarchy.
    pub fn granularity(&self) -> u8 {
        match self {
            FailureDomainType::Datacenter => 0,
            FailureDomainType::ComputeCluster => 1,
            FailureDomainType::HostGroup => 2,
        }
    }

    /// Returns true if `self` partitions infrastructure more finely than `other`.
    pub fn is_finer_than(&self, other: FailureDomainType) -> bool {
        self.granularity() > other.granularity()
    }
}

impl std::fmt::Display for FailureDomainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FailureDomainType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownFailureDomainType {
                path: FieldPath::new("type"),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Provisioning
// =============================================================================

/// What a consumer does when the tag, category, or host group backing a
/// failure domain does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provisioning {
    /// Create the missing construct.
    Create,
    /// Fail unless the construct already exists.
    #[default]
    RequireExisting,
}

impl Provisioning {
    /// Resolves a tri-state `autoConfigure` flag. Unset inherits `default`.
    pub fn resolve(auto_configure: Option<bool>, default: Provisioning) -> Self {
        match auto_configure {
            Some(true) => Provisioning::Create,
            Some(false) => Provisioning::RequireExisting,
            None => default,
        }
    }

    /// Returns true if missing constructs may be created.
    pub fn creates(&self) -> bool {
        matches!(self, Provisioning::Create)
    }
}

impl From<bool> for Provisioning {
    fn from(auto_configure: bool) -> Self {
        if auto_configure {
            Provisioning::Create
        } else {
            Provisioning::RequireExisting
        }
    }
}

impl std::fmt::Display for Provisioning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provisioning::Create => write!(f, "create"),
            Provisioning::RequireExisting => write!(f, "require-existing"),
        }
    }
}

// =============================================================================
// Failure Domain
// =============================================================================

/// A named, typed label used for both the region and the zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomain {
    /// Name of the tag that represents this failure domain.
    #[serde(default)]
    pub name: String,

    /// Granularity of the failure domain.
    #[serde(rename = "type")]
    pub domain_type: FailureDomainType,

    /// Category the tag belongs to.
    #[serde(default)]
    pub tag_category: String,

    /// Whether the consumer creates the tag and category when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_configure: Option<bool>,
}

impl FailureDomain {
    /// Creates a failure domain with `autoConfigure` unset.
    pub fn new(
        name: impl Into<String>,
        domain_type: FailureDomainType,
        tag_category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain_type,
            tag_category: tag_category.into(),
            auto_configure: None,
        }
    }

    /// Sets `autoConfigure` explicitly.
    #[must_use]
    pub fn with_auto_configure(mut self, auto_configure: bool) -> Self {
        self.auto_configure = Some(auto_configure);
        self
    }

    /// Resolves the tag provisioning decision for this domain.
    pub fn provisioning(&self, default: Provisioning) -> Provisioning {
        Provisioning::resolve(self.auto_configure, default)
    }
}

// =============================================================================
// Topology
// =============================================================================

/// Host group used as a failure domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomainHostGroup {
    /// Name of the host group.
    #[serde(default)]
    pub name: String,

    /// Whether the consumer creates the host group from the zone tagging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_configure: Option<bool>,
}

impl FailureDomainHostGroup {
    /// Creates a host group reference with `autoConfigure` unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto_configure: None,
        }
    }

    /// Sets `autoConfigure` explicitly.
    #[must_use]
    pub fn with_auto_configure(mut self, auto_configure: bool) -> Self {
        self.auto_configure = Some(auto_configure);
        self
    }

    /// Resolves the host group provisioning decision.
    pub fn provisioning(&self, default: Provisioning) -> Provisioning {
        Provisioning::resolve(self.auto_configure, default)
    }
}

/// Physical placement of a failure domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    /// Root of the hierarchy. An absent key decodes to an empty string so the
    /// validator can report it.
    #[serde(default)]
    pub datacenter: String,

    /// Compute cluster, when domains are expressed at cluster granularity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_cluster: Option<String>,

    /// Host group, when domains are expressed at host group granularity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_group: Option<FailureDomainHostGroup>,
}

impl Topology {
    /// Creates a datacenter-only topology.
    pub fn new(datacenter: impl Into<String>) -> Self {
        Self {
            datacenter: datacenter.into(),
            compute_cluster: None,
            host_group: None,
        }
    }

    #[must_use]
    pub fn with_compute_cluster(mut self, compute_cluster: impl Into<String>) -> Self {
        self.compute_cluster = Some(compute_cluster.into());
        self
    }

    #[must_use]
    pub fn with_host_group(mut self, host_group: FailureDomainHostGroup) -> Self {
        self.host_group = Some(host_group);
        self
    }

    /// Returns the compute cluster if it is set and non-empty.
    pub fn compute_cluster(&self) -> Option<&str> {
        self.compute_cluster.as_deref().filter(|c| !c.is_empty())
    }

    /// Returns the most specific infrastructure object named by the topology.
    pub fn granularity(&self) -> FailureDomainType {
        if self.host_group.is_some() {
            FailureDomainType::HostGroup
        } else if self.compute_cluster().is_some() {
            FailureDomainType::ComputeCluster
        } else {
            FailureDomainType::Datacenter
        }
    }
}

// =============================================================================
// Spec
// =============================================================================

/// Region, zone, and topology of a failure domain resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomainSpec {
    /// Coarser-grained partition axis.
    pub region: FailureDomain,

    /// Finer-grained partition axis.
    pub zone: FailureDomain,

    /// Where the failure domain lives.
    pub topology: Topology,
}

impl FailureDomainSpec {
    pub fn new(region: FailureDomain, zone: FailureDomain, topology: Topology) -> Self {
        Self {
            region,
            zone,
            topology,
        }
    }

    /// Returns true if the region or the zone is of the given type.
    pub fn declares(&self, domain_type: FailureDomainType) -> bool {
        self.region.domain_type == domain_type || self.zone.domain_type == domain_type
    }
}

// =============================================================================
// Tests
// =============================================================================
