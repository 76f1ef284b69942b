//! Manifest discovery and decoding.
//!
//! Explicit file arguments must be failure domain manifests. Directories are
//! walked recursively; documents of other kinds found there are skipped one
//! by one, so a directory of mixed cluster manifests can be pointed at as-is.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fdom_schema::{codec, FailureDomainList, FailureDomainResource, Format};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::CliError;

/// A resource together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedResource {
    pub source: PathBuf,
    pub resource: FailureDomainResource,
}

/// Loads every resource under the given paths, in path order.
pub fn load_paths(paths: &[PathBuf]) -> Result<Vec<LoadedResource>> {
    let mut loaded = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = load_dir(path)?;
            if found.is_empty() {
                return Err(CliError::NoManifests(path.clone()).into());
            }
            loaded.extend(found);
        } else {
            let format = Format::from_path(path)
                .ok_or_else(|| CliError::UnsupportedFile(path.clone()))?;
            loaded.extend(load_file(path, format)?);
        }
    }

    info!(resources = loaded.len(), "loaded failure domain manifests");
    Ok(loaded)
}

fn load_dir(dir: &Path) -> Result<Vec<LoadedResource>> {
    let mut files: Vec<(PathBuf, Format)> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            Format::from_path(&path).map(|format| (path, format))
        })
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut loaded = Vec::new();
    for (path, format) in files {
        let contents = read(&path)?;
        let decoded = match codec::decode_lenient(&contents, format) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to decode manifest");
                return Err(e).with_context(|| format!("failed to decode {}", path.display()));
            }
        };
        if decoded.skipped > 0 {
            debug!(
                path = %path.display(),
                skipped = decoded.skipped,
                "skipped documents of other kinds"
            );
        }
        loaded.extend(attach_source(&path, decoded.resources));
    }

    Ok(loaded)
}

fn load_file(path: &Path, format: Format) -> Result<Vec<LoadedResource>> {
    let contents = read(path)?;
    let resources = codec::decode(&contents, format)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(attach_source(path, resources))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn attach_source(path: &Path, resources: Vec<FailureDomainResource>) -> Vec<LoadedResource> {
    resources
        .into_iter()
        .map(|resource| LoadedResource {
            source: path.to_path_buf(),
            resource,
        })
        .collect()
}

/// Collects loaded resources into a list, keeping their order.
pub fn to_list(loaded: &[LoadedResource]) -> FailureDomainList {
    loaded.iter().map(|l| l.resource.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE_A: &str = r#"
apiVersion: infrastructure.cluster.x-k8s.io/v1alpha4
kind: VSphereFailureDomain
metadata:
  name: zone-a
spec:
  region: { name: region-a, type: Datacenter, tagCategory: k8s-region }
  zone: { name: zone-a, type: ComputeCluster, tagCategory: k8s-zone }
  topology: { datacenter: dc1, computeCluster: cluster-a }
"#;

    const OTHER_KIND: &str = r#"
apiVersion: cluster.x-k8s.io/v1beta1
kind: Cluster
metadata:
  name: workload
"#;

    #[test]
    fn loads_directory_and_skips_foreign_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-zone.yaml"), ZONE_A).unwrap();
        std::fs::write(dir.path().join("a-cluster.yaml"), OTHER_KIND).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a manifest").unwrap();

        let loaded = load_paths(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].resource.name(), "zone-a");
        assert!(loaded[0].source.ends_with("b-zone.yaml"));
    }

    #[test]
    fn keeps_failure_domains_that_share_a_file_with_other_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let broken = ZONE_A.replace(", computeCluster: cluster-a", "");
        std::fs::write(
            dir.path().join("cluster.yaml"),
            format!("{OTHER_KIND}---\n{broken}"),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("other.yaml"),
            ZONE_A.replace("name: zone-a\nspec", "name: zone-b\nspec"),
        )
        .unwrap();

        let loaded = load_paths(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = loaded.iter().map(|l| l.resource.name()).collect();
        assert_eq!(names, vec!["zone-a", "zone-b"]);
        assert!(loaded[0].source.ends_with("cluster.yaml"));

        let reports = fdom_schema::inspect_items(&to_list(&loaded));
        assert_eq!(reports[0].errors[0].code(), "MissingComputeCluster");
    }

    #[test]
    fn explicit_foreign_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster.yaml");
        std::fs::write(&path, OTHER_KIND).unwrap();

        assert!(load_paths(&[path]).is_err());
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_paths(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoManifests(_))
        ));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zone.toml");
        std::fs::write(&path, "x = 1").unwrap();

        let err = load_paths(&[path]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::UnsupportedFile(_))
        ));
    }
}
