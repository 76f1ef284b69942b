use std::path::Path;
use std::process::{Command, Output};

use assert_cmd::prelude::*;

const VALID: &str = r#"
apiVersion: infrastructure.cluster.x-k8s.io/v1alpha4
kind: VSphereFailureDomain
metadata:
  name: zone-a
spec:
  region:
    name: region-a
    type: Datacenter
    tagCategory: k8s-region
  zone:
    name: zone-a
    type: ComputeCluster
    tagCategory: k8s-zone
    autoConfigure: true
  topology:
    datacenter: dc1
    computeCluster: cluster-a
"#;

const DATACENTER_ONLY: &str = r#"
apiVersion: infrastructure.cluster.x-k8s.io/v1alpha4
kind: VSphereFailureDomain
metadata:
  name: dc-only
spec:
  region: { name: region-a, type: Datacenter, tagCategory: k8s-region }
  zone: { name: zone-dc, type: Datacenter, tagCategory: k8s-zone }
  topology: { datacenter: dc1 }
"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn fdctl(args: &[&str]) -> Output {
    Command::cargo_bin("fdctl")
        .unwrap()
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FDCTL_STRICT")
        .output()
        .unwrap()
}

#[test]
fn validate_accepts_valid_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "zone-a.yaml", VALID);

    let output = fdctl(&["validate", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("zone-a"));
    assert!(stdout.contains("spec_hash: sha256:"));
}

#[test]
fn validate_rejects_missing_compute_cluster() {
    let dir = tempfile::tempdir().unwrap();
    let broken = VALID.replace("    computeCluster: cluster-a\n", "");
    let path = write(dir.path(), "zone-a.yaml", &broken);

    let output = fdctl(&["validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MissingComputeCluster"));
    assert!(stdout.contains("spec.topology.computeCluster"));
}

#[test]
fn validate_strict_fails_on_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "dc-only.yaml", DATACENTER_ONLY);
    let path = path.to_str().unwrap();

    let output = fdctl(&["validate", path]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("SingleLevelHierarchy"));

    let output = fdctl(&["validate", "--strict", path]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn validate_json_output_reports_each_resource() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.yaml", VALID);
    write(dir.path(), "b.yaml", DATACENTER_ONLY);

    let output = fdctl(&["--format", "json", "validate", dir.path().to_str().unwrap()]);
    assert!(output.status.success());

    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "zone-a");
    assert_eq!(results[0]["valid"], true);
    assert_eq!(results[1]["warnings"][0]["code"], "SingleLevelHierarchy");
}

#[test]
fn show_json_resolves_provisioning() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "zone-a.yaml", VALID);

    let output = fdctl(&["show", "--format", "json", path.to_str().unwrap()]);
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["compute_cluster"], "cluster-a");
    assert_eq!(rows[0]["provisioning"], "region=require-existing,zone=create");
}

#[test]
fn diff_reports_changed_specs() {
    let dir = tempfile::tempdir().unwrap();
    let old = write(dir.path(), "old.yaml", VALID);
    let new = write(
        dir.path(),
        "new.yaml",
        &VALID.replace("cluster-a", "cluster-b"),
    );

    let output = fdctl(&[
        "--format",
        "json",
        "diff",
        old.to_str().unwrap(),
        new.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["name"], "zone-a");
    assert_eq!(rows[0]["status"], "changed");
}
