//! CLI commands.

mod diff;
mod show;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// fdctl - Validate and inspect vSphere failure domain manifests.
#[derive(Debug, Parser)]
#[command(name = "fdctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate manifests and report errors and warnings.
    Validate(validate::ValidateCommand),

    /// Tabulate failure domains and their provisioning decisions.
    Show(show::ShowCommand),

    /// Compare two sets of manifests by spec hash.
    Diff(diff::DiffCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: &Config) -> Result<()> {
        let ctx = CommandContext {
            config: config.clone(),
            format: self.format,
        };

        match self.command {
            Commands::Validate(cmd) => cmd.run(&ctx),
            Commands::Show(cmd) => cmd.run(&ctx),
            Commands::Diff(cmd) => cmd.run(&ctx),
            Commands::Version => {
                println!("fdctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}
