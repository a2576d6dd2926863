//! headmark - build-time heading anchors for documentation sites
//!
//! headmark provides:
//! - Heading id assignment (github-style slugs)
//! - Anchor link decoration with screen-reader labels
//! - Typed, fail-fast site configuration
//! - Sitemap locale table generation

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod anchors;
mod backends;
mod cli;
mod config;
mod core;
mod i18n;
mod pipeline;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    cli::run(cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "headmark=debug"
    } else if quiet {
        "headmark=error"
    } else {
        "headmark=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
