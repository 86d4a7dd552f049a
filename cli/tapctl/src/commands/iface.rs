//! Interface inspection.

use anyhow::Result;
use clap::Args;
use tapnet_networking::{resolve_index, resolve_info};

use crate::output::{print_output, InterfaceRow};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct IfaceCommand {
    /// Interface name (e.g. eth0).
    name: String,
}

impl IfaceCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let index = resolve_index(&self.name)?;
        let info = resolve_info(&self.name)?;

        print_output(&[InterfaceRow::new("interface", &info, Some(index))], ctx.format);
        Ok(())
    }
}
