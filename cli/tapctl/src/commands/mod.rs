//! CLI commands.

mod bind;
mod bootstrap;
mod forward;
mod gateway;
mod iface;
mod route;
mod tap;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tapnet_networking::{Config, GatewayResolver, IpCommand, KernelTables, TapProvisioner};

use crate::logging::{self, LogFormat};
use crate::output::OutputFormat;

/// tapctl - discover the host's network path and provision tap devices.
#[derive(Debug, Parser)]
#[command(name = "tapctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log line format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Path of the `ip` binary.
    #[arg(long, global = true, env = "TAPNET_IP_BIN")]
    ip_bin: Option<String>,

    /// Address-resolution cache export.
    #[arg(long, global = true, env = "TAPNET_ARP_TABLE")]
    arp_table: Option<PathBuf>,

    /// IPv4 forwarding control file.
    #[arg(long, global = true, env = "TAPNET_IP_FORWARD")]
    ip_forward: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show an interface's index and addresses.
    Iface(iface::IfaceCommand),

    /// Show the default route's device.
    Route,

    /// Show the gateway's addresses on a device.
    Gateway(gateway::GatewayCommand),

    /// Create or delete tap devices.
    Tap(tap::TapCommand),

    /// Enable IPv4 forwarding.
    Forward,

    /// Open a raw socket bound to an interface and report the binding.
    Bind(bind::BindCommand),

    /// Run the full host bootstrap sequence.
    Bootstrap(bootstrap::BootstrapCommand),
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let mut config = Config::from_env();
        if let Some(ip_bin) = self.ip_bin {
            config.ip_binary = ip_bin;
        }
        if let Some(arp_table) = self.arp_table {
            config.arp_table_path = arp_table;
        }
        if let Some(ip_forward) = self.ip_forward {
            config.ip_forward_path = ip_forward;
        }

        logging::init(self.log_format, &config.log_level);

        let ctx = CommandContext {
            config,
            format: self.format,
        };

        match self.command {
            Commands::Iface(cmd) => cmd.run(&ctx),
            Commands::Route => route::run(&ctx),
            Commands::Gateway(cmd) => cmd.run(&ctx),
            Commands::Tap(cmd) => cmd.run(&ctx),
            Commands::Forward => forward::run(&ctx),
            Commands::Bind(cmd) => cmd.run(&ctx),
            Commands::Bootstrap(cmd) => cmd.run(&ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl CommandContext {
    fn ip(&self) -> IpCommand {
        IpCommand::new(self.config.ip_binary.clone())
    }

    /// Gateway resolver over the live kernel tables.
    pub fn resolver(&self) -> GatewayResolver<KernelTables<IpCommand>> {
        GatewayResolver::new(KernelTables::new(
            self.ip(),
            self.config.arp_table_path.clone(),
        ))
    }

    /// Tap provisioner driving the configured `ip` binary.
    pub fn provisioner(&self) -> TapProvisioner<IpCommand> {
        TapProvisioner::new(self.ip())
    }
}
