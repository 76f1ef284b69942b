//! The cluster-scoped resource envelope and its list form.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fdom_id::Uid;
use serde::{Deserialize, Serialize};

use crate::{FailureDomainSpec, API_VERSION, KIND, LIST_KIND};

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

fn default_list_kind() -> String {
    LIST_KIND.to_string()
}

// =============================================================================
// Metadata
// =============================================================================

/// Object metadata of a cluster-scoped resource.
///
/// There is no namespace: the name alone identifies the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name.
    #[serde(default)]
    pub name: String,

    /// Platform-assigned unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uid>,

    /// Opaque storage version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Generation of the desired state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl ObjectMeta {
    /// Create new metadata with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a label
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add an annotation
    #[must_use]
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

/// Metadata of a list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Continuation token of a paginated list.
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
}

// =============================================================================
// Resource
// =============================================================================

/// A declared failure domain.
///
/// Created by an administrator, read-only to consumers, deleted when the
/// infrastructure partition is decommissioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomainResource {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    pub spec: FailureDomainSpec,
}

impl FailureDomainResource {
    /// Creates a resource with the registered `apiVersion` and `kind`.
    pub fn new(name: impl Into<String>, spec: FailureDomainSpec) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: ObjectMeta::new(name),
            spec,
        }
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ObjectMeta) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the resource name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

// =============================================================================
// List
// =============================================================================

/// An ordered collection of failure domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureDomainList {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_list_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ListMeta,

    #[serde(default)]
    pub items: Vec<FailureDomainResource>,
}

impl FailureDomainList {
    pub fn new(items: Vec<FailureDomainResource>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_list_kind(),
            metadata: ListMeta::default(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FailureDomainResource> {
        self.items.iter()
    }

    /// Finds a resource by name.
    pub fn get(&self, name: &str) -> Option<&FailureDomainResource> {
        self.items.iter().find(|item| item.name() == name)
    }
}

impl Default for FailureDomainList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<FailureDomainResource> for FailureDomainList {
    fn from_iter<I: IntoIterator<Item = FailureDomainResource>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for FailureDomainList {
    type Item = FailureDomainResource;
    type IntoIter = std::vec::IntoIter<FailureDomainResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a FailureDomainList {
    type Item = &'a FailureDomainResource;
    type IntoIter = std::slice::Iter<'a, FailureDomainResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureDomain, FailureDomainType, Topology};

    fn spec() -> FailureDomainSpec {
        FailureDomainSpec::new(
            FailureDomain::new("region-a", FailureDomainType::Datacenter, "k8s-region"),
            FailureDomain::new("zone-a", FailureDomainType::ComputeCluster, "k8s-zone"),
            Topology::new("dc1").with_compute_cluster("cluster-a"),
        )
    }

    #[test]
    fn test_object_meta_new() {
        let meta = ObjectMeta::new("zone-a");
        assert_eq!(meta.name, "zone-a");
        assert!(meta.uid.is_none());
        assert!(meta.labels.is_empty());
    }

    #[test]
    fn test_object_meta_with_labels() {
        let meta = ObjectMeta::new("zone-a")
            .with_label("topology.kubernetes.io/zone", "zone-a")
            .with_annotation("owner", "infra");

        assert_eq!(
            meta.labels.get("topology.kubernetes.io/zone"),
            Some(&"zone-a".to_string())
        );
        assert_eq!(meta.annotations.get("owner"), Some(&"infra".to_string()));
    }

    #[test]
    fn test_resource_envelope() {
        let resource = FailureDomainResource::new("zone-a", spec());
        let value = serde_json::to_value(&resource).unwrap();

        assert_eq!(value["apiVersion"], "infrastructure.cluster.x-k8s.io/v1alpha4");
        assert_eq!(value["kind"], "VSphereFailureDomain");
        assert_eq!(value["metadata"], serde_json::json!({ "name": "zone-a" }));
        assert_eq!(value["spec"]["topology"]["computeCluster"], "cluster-a");
        assert!(value["metadata"].get("namespace").is_none());
    }

    #[test]
    fn test_resource_metadata_serialization() {
        let uid = Uid::new();
        let mut meta = ObjectMeta::new("zone-a").with_label("env", "prod");
        meta.uid = Some(uid);
        meta.resource_version = Some("42".to_string());
        meta.creation_timestamp = Some(Utc::now());

        let resource = FailureDomainResource::new("zone-a", spec()).with_metadata(meta);
        let json = serde_json::to_string(&resource).unwrap();
        let parsed: FailureDomainResource = serde_json::from_str(&json).unwrap();

        assert_eq!(resource, parsed);
        assert_eq!(parsed.metadata.uid, Some(uid));
    }

    #[test]
    fn test_list_items_default_envelope() {
        let json = serde_json::json!({
            "apiVersion": "infrastructure.cluster.x-k8s.io/v1alpha4",
            "kind": "VSphereFailureDomainList",
            "metadata": { "resourceVersion": "7", "continue": "abc" },
            "items": [
                { "metadata": { "name": "zone-a" }, "spec": serde_json::to_value(spec()).unwrap() }
            ]
        });

        let list: FailureDomainList = serde_json::from_value(json).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.metadata.continue_token.as_deref(), Some("abc"));

        let item = list.get("zone-a").unwrap();
        assert_eq!(item.kind, "VSphereFailureDomain");
        assert_eq!(item.api_version, "infrastructure.cluster.x-k8s.io/v1alpha4");
    }

    #[test]
    fn test_list_preserves_order() {
        let list: FailureDomainList = ["zone-c", "zone-a", "zone-b"]
            .into_iter()
            .map(|name| FailureDomainResource::new(name, spec()))
            .collect();

        let names: Vec<_> = list.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["zone-c", "zone-a", "zone-b"]);
        assert_eq!(list.kind, "VSphereFailureDomainList");
    }
}
