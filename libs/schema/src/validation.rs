//! Cross-field consistency rules for failure domains.
//!
//! The schema alone only constrains shape. These rules tie the declared
//! region/zone types to the topology fields they require:
//!
//! | Declared type    | Required topology field            |
//! |------------------|------------------------------------|
//! | any              | `topology.datacenter`              |
//! | `ComputeCluster` | `topology.computeCluster`          |
//! | `HostGroup`      | `topology.hostGroup` with a `name` |
//!
//! Rules are checked in the order of the table, so the first error returned
//! by [`validate_spec`] is always the coarsest missing field. Advisory
//! findings are reported as [`ValidationWarning`]s and never fail validation.
//!
//! All functions here are pure.

use std::collections::{BTreeMap, HashMap};

use fdom_id::ResourceName;

use crate::{
    FailureDomainList, FailureDomainResource, FailureDomainSpec, FailureDomainType, FieldPath,
    Topology, ValidationError, API_VERSION, KIND,
};

// =============================================================================
// Warnings
// =============================================================================

/// Advisory findings that do not make a resource invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Region and zone are both `Datacenter`: there is no effective spreading.
    SingleLevelHierarchy { path: FieldPath },

    /// The zone is coarser than the region.
    InvertedHierarchy {
        path: FieldPath,
        region: FailureDomainType,
        zone: FailureDomainType,
    },

    /// A host group is named without the compute cluster that contains it.
    HostGroupWithoutComputeCluster { path: FieldPath },

    /// A host group is set but neither region nor zone is `HostGroup`.
    UnreferencedHostGroup { path: FieldPath },

    /// The same zone tag is declared by resources with different topologies.
    ZoneTagConflict {
        path: FieldPath,
        tag_category: String,
        name: String,
        other: String,
    },
}

impl ValidationWarning {
    /// Returns the path of the field the warning is about.
    pub fn path(&self) -> &FieldPath {
        match self {
            ValidationWarning::SingleLevelHierarchy { path }
            | ValidationWarning::InvertedHierarchy { path, .. }
            | ValidationWarning::HostGroupWithoutComputeCluster { path }
            | ValidationWarning::UnreferencedHostGroup { path }
            | ValidationWarning::ZoneTagConflict { path, .. } => path,
        }
    }

    fn path_mut(&mut self) -> &mut FieldPath {
        match self {
            ValidationWarning::SingleLevelHierarchy { path }
            | ValidationWarning::InvertedHierarchy { path, .. }
            | ValidationWarning::HostGroupWithoutComputeCluster { path }
            | ValidationWarning::UnreferencedHostGroup { path }
            | ValidationWarning::ZoneTagConflict { path, .. } => path,
        }
    }

    /// Returns a stable machine-readable code for the warning.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationWarning::SingleLevelHierarchy { .. } => "SingleLevelHierarchy",
            ValidationWarning::InvertedHierarchy { .. } => "InvertedHierarchy",
            ValidationWarning::HostGroupWithoutComputeCluster { .. } => {
                "HostGroupWithoutComputeCluster"
            }
            ValidationWarning::UnreferencedHostGroup { .. } => "UnreferencedHostGroup",
            ValidationWarning::ZoneTagConflict { .. } => "ZoneTagConflict",
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::SingleLevelHierarchy { path } => write!(
                f,
                "{path}: region and zone are both Datacenter, workloads will not be spread"
            ),
            ValidationWarning::InvertedHierarchy { path, region, zone } => write!(
                f,
                "{path}: zone type {zone} is coarser than region type {region}"
            ),
            ValidationWarning::HostGroupWithoutComputeCluster { path } => write!(
                f,
                "{path}: host group is set without the compute cluster that contains it"
            ),
            ValidationWarning::UnreferencedHostGroup { path } => write!(
                f,
                "{path}: host group is set but neither region nor zone is HostGroup"
            ),
            ValidationWarning::ZoneTagConflict {
                path,
                tag_category,
                name,
                other,
            } => write!(
                f,
                "{path}: zone tag {tag_category}/{name} is also used by '{other}' with a different topology"
            ),
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// Every error and warning found in a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Returns true if no errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the first error, or the warnings if there is none.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ValidationError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.warnings),
        }
    }

    fn error(&mut self, err: ValidationError) {
        self.errors.push(err);
    }

    fn warn(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Prefixes every path in the report.
    #[must_use]
    pub fn rebase(mut self, prefix: &FieldPath) -> Self {
        for err in &mut self.errors {
            err.rebase(prefix);
        }
        for warning in &mut self.warnings {
            let path = warning.path_mut();
            *path = prefix.join(path);
        }
        self
    }
}

// =============================================================================
// Spec
// =============================================================================

/// Validates the topology of a spec against its declared types.
///
/// Returns the advisory warnings on success, or the first violated rule.
pub fn validate_spec(spec: &FailureDomainSpec) -> Result<Vec<ValidationWarning>, ValidationError> {
    inspect_spec(spec).into_result()
}

/// Collects every error and warning of a spec.
pub fn inspect_spec(spec: &FailureDomainSpec) -> ValidationReport {
    inspect_spec_at(spec, &FieldPath::new("spec"))
}

fn inspect_spec_at(spec: &FailureDomainSpec, path: &FieldPath) -> ValidationReport {
    let mut report = ValidationReport::default();
    let topology_path = path.child("topology");
    let topology = &spec.topology;

    if topology.datacenter.is_empty() {
        report.error(ValidationError::InvalidTopology {
            path: topology_path.child("datacenter"),
        });
    }

    if let Some(declared_by) = declaring_path(spec, FailureDomainType::ComputeCluster, path) {
        if topology.compute_cluster().is_none() {
            report.error(ValidationError::MissingComputeCluster {
                path: topology_path.child("computeCluster"),
                declared_by,
            });
        }
    }

    if let Some(declared_by) = declaring_path(spec, FailureDomainType::HostGroup, path) {
        match &topology.host_group {
            None => report.error(ValidationError::MissingHostGroup {
                path: topology_path.child("hostGroup"),
                declared_by,
            }),
            Some(host_group) if host_group.name.is_empty() => {
                report.error(ValidationError::MissingHostGroup {
                    path: topology_path.child("hostGroup").child("name"),
                    declared_by,
                })
            }
            Some(_) => {}
        }
    }

    let region = spec.region.domain_type;
    let zone = spec.zone.domain_type;
    let zone_type_path = path.child("zone").child("type");

    if region == FailureDomainType::Datacenter && zone == FailureDomainType::Datacenter {
        report.warn(ValidationWarning::SingleLevelHierarchy {
            path: zone_type_path,
        });
    } else if region.is_finer_than(zone) {
        report.warn(ValidationWarning::InvertedHierarchy {
            path: zone_type_path,
            region,
            zone,
        });
    }

    if topology.host_group.is_some() {
        if topology.compute_cluster().is_none() {
            report.warn(ValidationWarning::HostGroupWithoutComputeCluster {
                path: topology_path.child("computeCluster"),
            });
        }
        if !spec.declares(FailureDomainType::HostGroup) {
            report.warn(ValidationWarning::UnreferencedHostGroup {
                path: topology_path.child("hostGroup"),
            });
        }
    }

    report
}

/// Path of the region or zone type that declares `domain_type`, region first.
fn declaring_path(
    spec: &FailureDomainSpec,
    domain_type: FailureDomainType,
    path: &FieldPath,
) -> Option<FieldPath> {
    if spec.region.domain_type == domain_type {
        Some(path.child("region").child("type"))
    } else if spec.zone.domain_type == domain_type {
        Some(path.child("zone").child("type"))
    } else {
        None
    }
}

// =============================================================================
// Resource
// =============================================================================

/// Validates a whole resource: envelope, name, required strings, then the
/// topology rules of [`validate_spec`].
pub fn validate_resource(
    resource: &FailureDomainResource,
) -> Result<Vec<ValidationWarning>, ValidationError> {
    inspect_resource(resource).into_result()
}

/// Collects every error and warning of a resource.
pub fn inspect_resource(resource: &FailureDomainResource) -> ValidationReport {
    inspect_resource_at(resource, &FieldPath::new(""))
}

fn inspect_resource_at(resource: &FailureDomainResource, path: &FieldPath) -> ValidationReport {
    let mut report = ValidationReport::default();

    if resource.api_version != API_VERSION {
        report.error(ValidationError::UnexpectedKind {
            path: path.child("apiVersion"),
            expected: API_VERSION,
            actual: resource.api_version.clone(),
        });
    }
    if resource.kind != KIND {
        report.error(ValidationError::UnexpectedKind {
            path: path.child("kind"),
            expected: KIND,
            actual: resource.kind.clone(),
        });
    }

    if let Err(source) = ResourceName::parse(&resource.metadata.name) {
        report.error(ValidationError::InvalidName {
            path: path.child("metadata").child("name"),
            source,
        });
    }

    let spec_path = path.child("spec");
    for (axis, domain) in [("region", &resource.spec.region), ("zone", &resource.spec.zone)] {
        let domain_path = spec_path.child(axis);
        if domain.name.is_empty() {
            report.error(ValidationError::EmptyField {
                path: domain_path.child("name"),
            });
        }
        if domain.tag_category.is_empty() {
            report.error(ValidationError::EmptyField {
                path: domain_path.child("tagCategory"),
            });
        }
    }

    report.merge(inspect_spec_at(&resource.spec, &spec_path));
    report
}

// =============================================================================
// List
// =============================================================================

/// Validates every item of a list and the uniqueness of names across it.
pub fn validate_list(list: &FailureDomainList) -> Result<Vec<ValidationWarning>, ValidationError> {
    inspect_list(list).into_result()
}

/// Collects every error and warning of a list, with paths rooted at `items[i]`.
pub fn inspect_list(list: &FailureDomainList) -> ValidationReport {
    let items_path = FieldPath::new("items");
    let mut report = ValidationReport::default();
    for (index, item_report) in inspect_items(list).into_iter().enumerate() {
        report.merge(item_report.rebase(&items_path.index(index)));
    }
    report
}

/// Returns one report per item, with paths relative to the item.
///
/// Findings that involve two items (duplicate names, conflicting zone tags)
/// are reported on the later one.
pub fn inspect_items(list: &FailureDomainList) -> Vec<ValidationReport> {
    let mut names: HashMap<&str, usize> = HashMap::new();
    let mut zone_tags: BTreeMap<(&str, &str), (&str, &Topology)> = BTreeMap::new();
    let root = FieldPath::new("");

    list.iter()
        .enumerate()
        .map(|(index, item)| {
            let mut report = inspect_resource_at(item, &root);

            if !item.name().is_empty() && names.insert(item.name(), index).is_some() {
                report.error(ValidationError::DuplicateName {
                    path: root.child("metadata").child("name"),
                    name: item.name().to_string(),
                });
            }

            let zone = &item.spec.zone;
            let key = (zone.tag_category.as_str(), zone.name.as_str());
            match zone_tags.get(&key) {
                Some((other, topology)) if *topology != &item.spec.topology => {
                    report.warn(ValidationWarning::ZoneTagConflict {
                        path: root.child("spec").child("zone"),
                        tag_category: zone.tag_category.clone(),
                        name: zone.name.clone(),
                        other: other.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    zone_tags.insert(key, (item.name(), &item.spec.topology));
                }
            }

            report
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
