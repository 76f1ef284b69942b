//! Test fixtures for failure domain crates.
//!
//! - [`fixtures`]: small hand-written specs and resources
//! - [`strategies`]: proptest generators covering every type combination

pub mod fixtures {
    use fdom_schema::{
        FailureDomain, FailureDomainHostGroup, FailureDomainResource, FailureDomainSpec,
        FailureDomainType, Topology,
    };

    pub const REGION_CATEGORY: &str = "k8s-region";
    pub const ZONE_CATEGORY: &str = "k8s-zone";

    pub fn region(domain_type: FailureDomainType) -> FailureDomain {
        FailureDomain::new("region-a", domain_type, REGION_CATEGORY)
    }

    pub fn zone(domain_type: FailureDomainType) -> FailureDomain {
        FailureDomain::new("zone-a", domain_type, ZONE_CATEGORY)
    }

    /// Region and zone both `Datacenter`, topology `dc1`.
    pub fn datacenter_spec() -> FailureDomainSpec {
        FailureDomainSpec::new(
            region(FailureDomainType::Datacenter),
            zone(FailureDomainType::Datacenter),
            Topology::new("dc1"),
        )
    }

    /// Datacenter region with one zone per compute cluster.
    pub fn compute_cluster_spec(cluster: &str) -> FailureDomainSpec {
        FailureDomainSpec::new(
            region(FailureDomainType::Datacenter),
            zone(FailureDomainType::ComputeCluster),
            Topology::new("dc1").with_compute_cluster(cluster),
        )
    }

    /// Compute cluster region with one zone per host group.
    pub fn host_group_spec(cluster: &str, host_group: &str) -> FailureDomainSpec {
        FailureDomainSpec::new(
            region(FailureDomainType::ComputeCluster),
            zone(FailureDomainType::HostGroup),
            Topology::new("dc1")
                .with_compute_cluster(cluster)
                .with_host_group(FailureDomainHostGroup::new(host_group)),
        )
    }

    pub fn resource(name: &str, spec: FailureDomainSpec) -> FailureDomainResource {
        FailureDomainResource::new(name, spec)
    }
}

pub mod strategies {
    use fdom_schema::{
        FailureDomain, FailureDomainHostGroup, FailureDomainResource, FailureDomainSpec,
        FailureDomainType, ObjectMeta, Topology,
    };
    use proptest::option;
    use proptest::prelude::*;

    pub fn domain_type() -> impl Strategy<Value = FailureDomainType> {
        prop_oneof![
            Just(FailureDomainType::Datacenter),
            Just(FailureDomainType::ComputeCluster),
            Just(FailureDomainType::HostGroup),
        ]
    }

    /// Non-empty identifiers as found in tag and inventory names.
    pub fn identifier() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9 _./-]{0,24}"
    }

    /// Valid DNS-1123 subdomain resource names.
    pub fn resource_name() -> impl Strategy<Value = String> {
        "[a-z0-9]([a-z0-9-]{0,16}[a-z0-9])?(\\.[a-z0-9]([a-z0-9-]{0,16}[a-z0-9])?){0,2}"
    }

    pub fn failure_domain() -> impl Strategy<Value = FailureDomain> {
        (identifier(), domain_type(), identifier(), option::of(any::<bool>())).prop_map(
            |(name, domain_type, tag_category, auto_configure)| FailureDomain {
                name,
                domain_type,
                tag_category,
                auto_configure,
            },
        )
    }

    pub fn host_group() -> impl Strategy<Value = FailureDomainHostGroup> {
        (identifier(), option::of(any::<bool>())).prop_map(|(name, auto_configure)| {
            FailureDomainHostGroup {
                name,
                auto_configure,
            }
        })
    }

    /// Any topology, including ones the validator rejects.
    pub fn topology() -> impl Strategy<Value = Topology> {
        (
            prop_oneof![Just(String::new()), identifier()],
            option::of(prop_oneof![Just(String::new()), identifier()]),
            option::of(host_group()),
        )
            .prop_map(|(datacenter, compute_cluster, host_group)| Topology {
                datacenter,
                compute_cluster,
                host_group,
            })
    }

    /// Any spec, valid or not.
    pub fn spec() -> impl Strategy<Value = FailureDomainSpec> {
        (failure_domain(), failure_domain(), topology())
            .prop_map(|(region, zone, topology)| FailureDomainSpec::new(region, zone, topology))
    }

    /// Specs whose topology satisfies every rule for the declared types.
    pub fn consistent_spec() -> impl Strategy<Value = FailureDomainSpec> {
        (
            failure_domain(),
            failure_domain(),
            identifier(),
            identifier(),
            host_group(),
        )
            .prop_map(|(region, zone, datacenter, cluster, host_group)| {
                let mut spec =
                    FailureDomainSpec::new(region, zone, Topology::new(datacenter));
                if spec.declares(FailureDomainType::ComputeCluster)
                    || spec.declares(FailureDomainType::HostGroup)
                {
                    spec.topology.compute_cluster = Some(cluster);
                }
                if spec.declares(FailureDomainType::HostGroup) {
                    spec.topology.host_group = Some(host_group);
                }
                spec
            })
    }

    pub fn resource() -> impl Strategy<Value = FailureDomainResource> {
        (
            resource_name(),
            spec(),
            proptest::collection::btree_map("[a-z]{1,8}", identifier(), 0..3),
        )
            .prop_map(|(name, spec, labels)| {
                let mut metadata = ObjectMeta::new(name.clone());
                metadata.labels = labels;
                FailureDomainResource::new(name, spec).with_metadata(metadata)
            })
    }
}
