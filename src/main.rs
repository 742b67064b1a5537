//! mkappcache - Generate a browser application-cache manifest
//!
//! mkappcache provides:
//! - Recursive listing of asset directories into `cache.appcache`
//! - Extension- and directory-based exclusion rules
//! - A cache-busting timestamp on every run
//! - Optional JSON configuration and CLI overrides

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod manifest;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.quiet, cli.verbose);
    cli::run(cli)
}
