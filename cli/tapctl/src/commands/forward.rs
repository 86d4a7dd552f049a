//! IPv4 forwarding.

use anyhow::Result;
use tapnet_networking::enable_ipv4_forwarding;

use crate::output::print_success;

use super::CommandContext;

pub fn run(ctx: &CommandContext) -> Result<()> {
    enable_ipv4_forwarding(&ctx.config.ip_forward_path)?;
    print_success("IPv4 forwarding enabled");
    Ok(())
}
