//! Show command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fdom_schema::{FailureDomainResource, Provisioning};
use serde::Serialize;
use tabled::Tabled;

use crate::loader::load_paths;
use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Manifest files or directories.
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

/// One failure domain as the reconciler will act on it.
#[derive(Debug, Serialize, Tabled)]
struct FailureDomainRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "REGION")]
    region: String,
    #[tabled(rename = "REGION TYPE")]
    region_type: String,
    #[tabled(rename = "ZONE")]
    zone: String,
    #[tabled(rename = "ZONE TYPE")]
    zone_type: String,
    #[tabled(rename = "DATACENTER")]
    datacenter: String,
    #[tabled(rename = "COMPUTE CLUSTER")]
    compute_cluster: String,
    #[tabled(rename = "HOST GROUP")]
    host_group: String,
    #[tabled(rename = "PROVISIONING")]
    provisioning: String,
}

impl ShowCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let loaded = load_paths(&self.paths)?;
        let rows: Vec<FailureDomainRow> = loaded
            .iter()
            .map(|l| row(&l.resource, ctx.config.auto_configure_default))
            .collect();

        print_output(&rows, ctx.format);
        Ok(())
    }
}

fn row(resource: &FailureDomainResource, default: Provisioning) -> FailureDomainRow {
    let spec = &resource.spec;
    let topology = &spec.topology;

    let mut provisioning = vec![
        format!("region={}", spec.region.provisioning(default)),
        format!("zone={}", spec.zone.provisioning(default)),
    ];
    if let Some(host_group) = &topology.host_group {
        provisioning.push(format!("hostGroup={}", host_group.provisioning(default)));
    }

    FailureDomainRow {
        name: resource.name().to_string(),
        region: spec.region.name.clone(),
        region_type: spec.region.domain_type.to_string(),
        zone: spec.zone.name.clone(),
        zone_type: spec.zone.domain_type.to_string(),
        datacenter: topology.datacenter.clone(),
        compute_cluster: topology.compute_cluster().unwrap_or("-").to_string(),
        host_group: topology
            .host_group
            .as_ref()
            .map(|hg| hg.name.clone())
            .unwrap_or_else(|| "-".to_string()),
        provisioning: provisioning.join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdom_schema::{FailureDomain, FailureDomainHostGroup, FailureDomainSpec, FailureDomainType, Topology};

    #[test]
    fn row_resolves_unset_auto_configure_with_default() {
        let spec = FailureDomainSpec::new(
            FailureDomain::new("region-a", FailureDomainType::ComputeCluster, "k8s-region")
                .with_auto_configure(false),
            FailureDomain::new("zone-a", FailureDomainType::HostGroup, "k8s-zone"),
            Topology::new("dc1")
                .with_compute_cluster("cluster-a")
                .with_host_group(FailureDomainHostGroup::new("hg-a").with_auto_configure(true)),
        );
        let resource = FailureDomainResource::new("zone-a", spec);

        let row = row(&resource, Provisioning::Create);
        assert_eq!(row.compute_cluster, "cluster-a");
        assert_eq!(row.host_group, "hg-a");
        assert_eq!(
            row.provisioning,
            "region=require-existing,zone=create,hostGroup=create"
        );
    }

    #[test]
    fn row_marks_absent_topology_fields() {
        let spec = FailureDomainSpec::new(
            FailureDomain::new("region-a", FailureDomainType::Datacenter, "k8s-region"),
            FailureDomain::new("zone-a", FailureDomainType::Datacenter, "k8s-zone"),
            Topology::new("dc1"),
        );
        let row = row(&FailureDomainResource::new("dc", spec), Provisioning::RequireExisting);
        assert_eq!(row.compute_cluster, "-");
        assert_eq!(row.host_group, "-");
        assert_eq!(row.provisioning, "region=require-existing,zone=require-existing");
    }
}
