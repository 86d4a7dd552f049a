//! tapctl - host network bootstrap CLI
//!
//! Discovers the host's outbound path and provisions tap devices for
//! virtual machines and containers before their traffic flows.

use anyhow::Result;
use clap::Parser;

mod commands;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
