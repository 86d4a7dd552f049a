//! Raw socket binding check.

use std::os::fd::AsRawFd;

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tapnet_networking::open_bound_raw_socket;

use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct BindCommand {
    /// Interface to bind to.
    name: String,
}

impl BindCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let binding = open_bound_raw_socket(&self.name)?;

        match ctx.format {
            OutputFormat::Json => print_single(&json!({
                "interface": self.name,
                "ifindex": binding.ifindex(),
                "protocol": format!("{:#06x}", binding.protocol()),
                "fd": binding.as_raw_fd(),
            })),
            OutputFormat::Table => print_success(&format!(
                "raw socket fd {} bound to {} (ifindex {}, protocol {:#06x})",
                binding.as_raw_fd(),
                self.name,
                binding.ifindex(),
                binding.protocol()
            )),
        }

        // Closed on drop.
        drop(binding);
        Ok(())
    }
}
