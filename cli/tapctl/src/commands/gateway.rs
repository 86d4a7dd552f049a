//! Gateway lookup.

use anyhow::Result;
use clap::Args;

use crate::output::{print_info, print_output, InterfaceRow, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct GatewayCommand {
    /// Device to look the gateway up on. Defaults to the default route's device.
    #[arg(long)]
    dev: Option<String>,
}

impl GatewayCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let resolver = ctx.resolver();
        let info = match self.dev {
            Some(dev) => resolver.find_gateway_info(&dev)?,
            None => resolver.default_gateway()?,
        };

        if info.is_empty() && ctx.format == OutputFormat::Table {
            print_info("no gateway entry found");
            return Ok(());
        }

        print_output(&[InterfaceRow::new("gateway", &info, None)], ctx.format);
        Ok(())
    }
}
