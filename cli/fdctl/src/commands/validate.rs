//! Validate command.
//!
//! Operates purely on local manifest files (offline).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fdom_fingerprint::SpecHash;
use fdom_schema::{inspect_items, ValidationReport};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CliError;
use crate::loader::{load_paths, to_list, LoadedResource};
use crate::output::{print_failure, print_info, print_json, print_success, print_warning, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Fail on warnings as well as errors.
    #[arg(long)]
    strict: bool,

    /// Manifest files or directories.
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

/// Validation outcome for one resource.
#[derive(Debug, Serialize)]
struct ResourceResult {
    name: String,
    source: String,
    valid: bool,
    spec_hash: String,
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

#[derive(Debug, Serialize)]
struct Finding {
    code: &'static str,
    path: String,
    message: String,
}

impl ValidateCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let strict = self.strict || ctx.config.strict;
        let loaded = load_paths(&self.paths)?;
        let list = to_list(&loaded);

        let results = loaded
            .iter()
            .zip(inspect_items(&list))
            .map(|(loaded, report)| summarize(loaded, report))
            .collect::<Result<Vec<_>>>()?;

        let errors: usize = results.iter().map(|r| r.errors.len()).sum();
        let warnings: usize = results.iter().map(|r| r.warnings.len()).sum();
        info!(resources = results.len(), errors, warnings, strict, "validated manifests");

        match ctx.format {
            OutputFormat::Json => print_json(&results),
            OutputFormat::Table => print_results(&results),
        }

        if errors > 0 || (strict && warnings > 0) {
            return Err(CliError::ValidationFailed {
                errors,
                warnings,
                strict,
            }
            .into());
        }

        if ctx.format == OutputFormat::Table {
            print_success(&format!("{} failure domain(s) valid", results.len()));
        }
        Ok(())
    }
}

fn summarize(loaded: &LoadedResource, report: ValidationReport) -> Result<ResourceResult> {
    let resource = &loaded.resource;
    let spec_hash = SpecHash::of(&resource.spec)?;
    debug!(name = resource.name(), %spec_hash, "hashed spec");

    Ok(ResourceResult {
        name: resource.name().to_string(),
        source: loaded.source.display().to_string(),
        valid: report.is_valid(),
        spec_hash: spec_hash.to_string(),
        errors: report
            .errors
            .iter()
            .map(|e| Finding {
                code: e.code(),
                path: e.path().to_string(),
                message: e.to_string(),
            })
            .collect(),
        warnings: report
            .warnings
            .iter()
            .map(|w| Finding {
                code: w.code(),
                path: w.path().to_string(),
                message: w.to_string(),
            })
            .collect(),
    })
}

fn print_results(results: &[ResourceResult]) {
    for result in results {
        let label = format!("{} ({})", display_name(&result.name), result.source);
        if result.valid {
            print_success(&label);
        } else {
            print_failure(&label);
        }
        for err in &result.errors {
            println!("    [{}] {}", err.code, err.message);
        }
        for warning in &result.warnings {
            print_warning(&format!("[{}] {}", warning.code, warning.message));
        }
        print_info(&format!("spec_hash: {}", result.spec_hash));
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "<unnamed>"
    } else {
        name
    }
}
