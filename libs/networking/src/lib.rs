//! Host network bootstrap.
//!
//! This library discovers and provisions the local network topology before
//! a workload's traffic flows:
//! - Interface name to kernel index, IPv4 address and hardware address
//! - Default route device and default gateway from the kernel tables
//! - Raw link-layer sockets bound to one interface
//! - Tap device provisioning through the `ip` tool
//! - IPv4 forwarding control
//!
//! Every call is a blocking point-in-time snapshot; no state is kept between
//! calls.

pub mod byte_order;
pub mod command;
pub mod config;
pub mod error;
pub mod forwarding;
pub mod gateway;
pub mod interface;
pub mod raw_socket;
pub mod tables;
pub mod tap;
pub mod types;

pub use byte_order::{htons, ETH_P_ALL};
pub use command::{CommandRunner, IpCommand};
pub use config::Config;
pub use error::{CommandError, NetworkError};
pub use forwarding::enable_ipv4_forwarding;
pub use gateway::{GatewayResolver, KernelTables, StaticTables, TableSource};
pub use interface::{interface_info, resolve_index, resolve_info};
pub use raw_socket::{open_bound_raw_socket, RawSocketBinding};
pub use tap::{ProvisionStage, TapDevice, TapProvisioner, TapState};
pub use types::{HardwareAddr, InterfaceInfo};
