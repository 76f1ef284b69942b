//! fdctl - offline tooling for failure domain manifests
//!
//! Loads `VSphereFailureDomain` documents from files or directories,
//! validates them, and prints what consumers will see.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod config;
mod error;
mod loader;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let config = config::Config::from_env()?;
    init_tracing(&config);

    let cli = Cli::parse();

    if let Err(e) = cli.run(&config) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable (prefer RUST_LOG, fallback to FDCTL_LOG_LEVEL).
fn init_tracing(config: &config::Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let layer = match config.log_format {
        config::LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        config::LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}
