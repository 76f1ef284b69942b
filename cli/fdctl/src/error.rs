//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No failure domain manifests found in {}", .0.display())]
    NoManifests(PathBuf),

    #[error("Unsupported manifest extension: {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("Duplicate failure domain name '{name}' in {}", .path.display())]
    DuplicateName { name: String, path: PathBuf },

    #[error("Validation failed: {errors} error(s), {warnings} warning(s)")]
    ValidationFailed {
        errors: usize,
        warnings: usize,
        strict: bool,
    },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::NoManifests(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: manifests must end in .yaml, .yml or .json and have kind VSphereFailureDomain or VSphereFailureDomainList.".yellow()
                );
            }
            CliError::UnsupportedFile(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: rename the file to .yaml, .yml or .json.".yellow()
                );
            }
            CliError::DuplicateName { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: run `fdctl validate` on both sides; names must be unique to compare specs.".yellow()
                );
            }
            CliError::ValidationFailed {
                errors: 0,
                strict: true,
                ..
            } => {
                eprintln!(
                    "\n{}",
                    "Hint: only warnings were found; they fail because strict mode is on (--strict or FDCTL_STRICT).".yellow()
                );
            }
            _ => {}
        }
    }
}
