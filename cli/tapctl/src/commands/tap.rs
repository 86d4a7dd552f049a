//! Tap device commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Tap device commands.
#[derive(Debug, Args)]
pub struct TapCommand {
    #[command(subcommand)]
    command: TapSubcommand,
}

#[derive(Debug, Subcommand)]
enum TapSubcommand {
    /// Create a tap device, assign an address and bring it up.
    Up(UpArgs),

    /// Delete a tap device.
    Down(DownArgs),
}

#[derive(Debug, Args)]
struct UpArgs {
    /// Device name (at most 15 characters).
    name: String,

    /// Address with prefix length (e.g. 172.16.0.1/24).
    cidr: String,
}

#[derive(Debug, Args)]
struct DownArgs {
    /// Device name.
    name: String,
}

impl TapCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            TapSubcommand::Up(args) => up(ctx, args),
            TapSubcommand::Down(args) => down(ctx, args),
        }
    }
}

fn up(ctx: &CommandContext, args: UpArgs) -> Result<()> {
    let device = ctx.provisioner().provision(&args.name, &args.cidr)?;

    match ctx.format {
        OutputFormat::Json => print_single(&device),
        OutputFormat::Table => print_success(&format!(
            "tap device {} is up with {}",
            device.name, device.cidr
        )),
    }
    Ok(())
}

fn down(ctx: &CommandContext, args: DownArgs) -> Result<()> {
    ctx.provisioner().teardown(&args.name)?;
    print_success(&format!("tap device {} deleted", args.name));
    Ok(())
}
