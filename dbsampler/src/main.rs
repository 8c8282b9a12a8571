//! Table discovery and row sampling tool.
//!
//! # Security Guarantees
//! - Read-only database operations only
//! - No credentials stored or logged

use clap::Parser;
use dbsampler::{Cli, commands};
use dbsampler_core::{Result, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    commands::run(&cli).await
}
