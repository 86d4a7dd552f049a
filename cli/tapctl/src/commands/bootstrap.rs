//! Full host bootstrap.
//!
//! Enables forwarding, provisions the tap device, then discovers the uplink
//! (default route device), its addresses and its gateway, and binds a raw
//! socket to the uplink. A failure after the tap device exists leaves it in
//! place.

use std::os::fd::AsRawFd;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tapnet_networking::{
    enable_ipv4_forwarding, open_bound_raw_socket, resolve_index, resolve_info, InterfaceInfo,
    TapDevice,
};
use tracing::info;

use crate::output::{print_output, print_single, InterfaceRow, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct BootstrapCommand {
    /// Tap device to create.
    #[arg(long)]
    tap: String,

    /// Address with prefix length for the tap device.
    #[arg(long)]
    cidr: String,

    /// Uplink device. Defaults to the default route's device.
    #[arg(long)]
    uplink: Option<String>,
}

/// Discovered topology.
#[derive(Debug, Serialize)]
struct Topology {
    tap: TapDevice,
    uplink: InterfaceInfo,
    uplink_index: u32,
    gateway: InterfaceInfo,
    raw_socket_fd: i32,
}

impl BootstrapCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        enable_ipv4_forwarding(&ctx.config.ip_forward_path)?;

        let tap = ctx
            .provisioner()
            .provision(&self.tap, &self.cidr)
            .with_context(|| format!("failed to provision tap device {}", self.tap))?;

        let resolver = ctx.resolver();
        let uplink_name = match self.uplink {
            Some(name) => name,
            None => resolver.find_default_route_device()?,
        };
        if uplink_name.is_empty() {
            bail!("host has no default route; pass --uplink to choose a device");
        }

        let uplink_index = resolve_index(&uplink_name)?;
        let uplink = resolve_info(&uplink_name)?;
        let gateway = resolver.find_gateway_info(&uplink_name)?;

        let socket = open_bound_raw_socket(&uplink_name)?;

        info!(
            tap = %tap.name,
            uplink = %uplink_name,
            gateway = %gateway.ipv4_address,
            "host network bootstrapped"
        );

        let topology = Topology {
            tap,
            uplink,
            uplink_index,
            gateway,
            raw_socket_fd: socket.as_raw_fd(),
        };

        match ctx.format {
            OutputFormat::Json => print_single(&topology),
            OutputFormat::Table => print_output(
                &[
                    InterfaceRow::new("uplink", &topology.uplink, Some(topology.uplink_index)),
                    InterfaceRow::new("gateway", &topology.gateway, None),
                ],
                ctx.format,
            ),
        }

        Ok(())
    }
}
