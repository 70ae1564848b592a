//! CLI entry point for the connector-matching tile generator

use clap::Parser;
use tilecollapse::io::cli::{Cli, GridRunner};
use tilecollapse::io::configuration::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

fn main() -> tilecollapse::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut runner = GridRunner::new(cli);
    runner.run().map(|_| ())
}
