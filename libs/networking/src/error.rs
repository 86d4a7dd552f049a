//! Error types for host network discovery and provisioning.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

use crate::tap::ProvisionStage;

/// Networking errors.
///
/// Absence of data (no default route, no gateway row) is never reported
/// through this type; those cases come back as empty values.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Interface name does not exist in the current network namespace.
    #[error("interface not found: {name}")]
    InterfaceNotFound { name: String },

    /// A textual field did not parse as an IPv4 address or prefix.
    #[error("invalid IP address: {value}")]
    AddressParse { value: String },

    /// A textual field did not parse as a 6-byte hardware address.
    #[error("invalid hardware address: {value}")]
    HardwareAddressParse { value: String },

    /// Address-resolution row matched but is missing the expected columns.
    #[error("malformed table row: {row:?}")]
    MalformedRow { row: String },

    /// Enumerating interface addresses failed.
    #[error("failed to query interface addresses: {0}")]
    InterfaceQuery(#[source] nix::Error),

    /// A kernel text export could not be read.
    #[error("failed to read {source_name}: {source}")]
    TableRead {
        source_name: String,
        #[source]
        source: io::Error,
    },

    /// Raw link-layer socket could not be allocated.
    #[error("failed to create raw socket: {0}")]
    SocketCreation(#[source] io::Error),

    /// Raw socket could not be bound to the interface.
    #[error("failed to bind raw socket to {interface}: {source}")]
    SocketBind {
        interface: String,
        #[source]
        source: io::Error,
    },

    /// External configuration tool failed at the given stage.
    #[error("device configuration failed at {stage}: {cause}")]
    DeviceConfiguration {
        stage: ProvisionStage,
        #[source]
        cause: CommandError,
    },

    /// IPv4 forwarding control file could not be written.
    #[error("failed to write {path}: {source}")]
    ForwardingWrite {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl NetworkError {
    /// Get the standardized reason code for this error.
    pub fn reason_code(&self) -> &'static str {
        match self {
            NetworkError::InterfaceNotFound { .. } => "interface_not_found",
            NetworkError::AddressParse { .. } => "address_parse_failed",
            NetworkError::HardwareAddressParse { .. } => "hardware_address_parse_failed",
            NetworkError::MalformedRow { .. } => "malformed_row",
            NetworkError::InterfaceQuery(_) => "interface_query_failed",
            NetworkError::TableRead { .. } => "table_read_failed",
            NetworkError::SocketCreation(_) => "socket_creation_failed",
            NetworkError::SocketBind { .. } => "socket_bind_failed",
            NetworkError::DeviceConfiguration { .. } => "device_configuration_failed",
            NetworkError::ForwardingWrite { .. } => "forwarding_write_failed",
        }
    }

    /// Whether the failure is most likely a missing capability.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            NetworkError::SocketCreation(e)
            | NetworkError::SocketBind { source: e, .. }
            | NetworkError::ForwardingWrite { source: e, .. } => {
                e.kind() == io::ErrorKind::PermissionDenied
            }
            NetworkError::DeviceConfiguration { cause, .. } => cause.is_permission_denied(),
            _ => false,
        }
    }
}

/// Errors from invoking the external configuration tool.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program ran and reported failure.
    #[error("`{args}` exited with {status}: {stderr}")]
    Failed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl CommandError {
    fn is_permission_denied(&self) -> bool {
        match self {
            CommandError::Spawn { source, .. } => source.kind() == io::ErrorKind::PermissionDenied,
            CommandError::Failed { stderr, .. } => {
                let stderr = stderr.to_ascii_lowercase();
                stderr.contains("operation not permitted") || stderr.contains("permission denied")
            }
        }
    }
}
