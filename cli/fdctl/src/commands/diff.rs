//! Diff command.
//!
//! Compares a previous set of manifests against the current one by spec hash,
//! the same way a reconciler decides which failure domains need work.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fdom_fingerprint::{classify, Drift, SpecHash};
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::loader::{load_paths, LoadedResource};
use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Args)]
pub struct DiffCommand {
    /// Previous manifest file or directory.
    #[arg(value_name = "OLD")]
    old: PathBuf,

    /// Current manifest file or directory.
    #[arg(value_name = "NEW")]
    new: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct DriftRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "SPEC HASH")]
    spec_hash: String,
}

impl DiffCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let previous = hashes(&load_paths(&[self.old])?)?;
        let current = hashes(&load_paths(&[self.new])?)?;

        print_output(&drift_rows(&current, &previous), ctx.format);
        Ok(())
    }
}

/// Hashes each spec by name. A name may appear only once per side.
fn hashes(loaded: &[LoadedResource]) -> Result<BTreeMap<String, SpecHash>> {
    let mut hashes = BTreeMap::new();
    for l in loaded {
        match hashes.entry(l.resource.name().to_string()) {
            Entry::Occupied(entry) => {
                return Err(CliError::DuplicateName {
                    name: entry.key().clone(),
                    path: l.source.clone(),
                }
                .into());
            }
            Entry::Vacant(entry) => {
                entry.insert(SpecHash::of(&l.resource.spec)?);
            }
        }
    }
    Ok(hashes)
}

fn drift_rows(
    current: &BTreeMap<String, SpecHash>,
    previous: &BTreeMap<String, SpecHash>,
) -> Vec<DriftRow> {
    let (drift, removed) = classify(current, previous);

    let mut rows: Vec<DriftRow> = drift
        .into_iter()
        .map(|(name, state)| DriftRow {
            name: name.to_string(),
            status: match state {
                Drift::New => "new",
                Drift::Unchanged => "unchanged",
                Drift::Changed => "changed",
            }
            .to_string(),
            spec_hash: current[name].to_string(),
        })
        .collect();

    rows.extend(removed.into_iter().map(|name| DriftRow {
        spec_hash: previous[&name].to_string(),
        name,
        status: "removed".to_string(),
    }));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdom_schema::{
        FailureDomain, FailureDomainResource, FailureDomainSpec, FailureDomainType, Topology,
    };

    fn hash_of(value: &str) -> SpecHash {
        SpecHash::of(&value).unwrap()
    }

    fn loaded(name: &str, datacenter: &str, source: &str) -> LoadedResource {
        let spec = FailureDomainSpec::new(
            FailureDomain::new("region-a", FailureDomainType::Datacenter, "k8s-region"),
            FailureDomain::new("zone-a", FailureDomainType::Datacenter, "k8s-zone"),
            Topology::new(datacenter),
        );
        LoadedResource {
            source: PathBuf::from(source),
            resource: FailureDomainResource::new(name, spec),
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let set = vec![loaded("fd", "dc2", "new/a.yaml"), loaded("fd", "dc1", "new/b.yaml")];

        let err = hashes(&set).unwrap_err();
        match err.downcast_ref::<CliError>() {
            Some(CliError::DuplicateName { name, path }) => {
                assert_eq!(name, "fd");
                assert_eq!(path, &PathBuf::from("new/b.yaml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unique_names_hash_each_spec() {
        let set = vec![loaded("fd-1", "dc1", "a.yaml"), loaded("fd-2", "dc2", "a.yaml")];
        let hashes = hashes(&set).unwrap();
        assert_eq!(hashes.len(), 2);
        assert_ne!(hashes["fd-1"], hashes["fd-2"]);
    }

    #[test]
    fn drift_rows_cover_every_state() {
        let previous = BTreeMap::from([
            ("fd-a".to_string(), hash_of("a")),
            ("fd-b".to_string(), hash_of("b")),
            ("fd-gone".to_string(), hash_of("gone")),
        ]);
        let current = BTreeMap::from([
            ("fd-a".to_string(), hash_of("a")),
            ("fd-b".to_string(), hash_of("b2")),
            ("fd-c".to_string(), hash_of("c")),
        ]);

        let rows = drift_rows(&current, &previous);
        let states: Vec<_> = rows
            .iter()
            .map(|r| (r.name.as_str(), r.status.as_str()))
            .collect();
        assert_eq!(
            states,
            vec![
                ("fd-a", "unchanged"),
                ("fd-b", "changed"),
                ("fd-c", "new"),
                ("fd-gone", "removed"),
            ]
        );
        assert_eq!(rows[3].spec_hash, hash_of("gone").to_string());
    }
}
