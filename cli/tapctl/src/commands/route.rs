//! Default route lookup.

use anyhow::Result;
use serde_json::json;

use crate::output::{print_info, print_single, OutputFormat};

use super::CommandContext;

pub fn run(ctx: &CommandContext) -> Result<()> {
    let device = ctx.resolver().find_default_route_device()?;

    match ctx.format {
        OutputFormat::Json => print_single(&json!({ "default_route_device": device })),
        OutputFormat::Table if device.is_empty() => print_info("no default route"),
        OutputFormat::Table => println!("{}", device),
    }
    Ok(())
}
