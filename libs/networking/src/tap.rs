//! TAP device provisioning.
//!
//! Creates, addresses and activates a tap device by driving the external
//! `ip` tool. Provisioning is a fixed sequence:
//!
//! 1. `ip tuntap add dev <name> mode tap`
//! 2. `ip addr add <cidr> dev <name>`
//! 3. `ip link set <name> up`
//!
//! Each step is fatal on failure and nothing is rolled back; call
//! [`TapProvisioner::teardown`] to remove a partially provisioned device.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::command::CommandRunner;
use crate::error::NetworkError;

/// Step of the provisioning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStage {
    Create,
    AssignAddress,
    Activate,
    Teardown,
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProvisionStage::Create => "create",
            ProvisionStage::AssignAddress => "assign_address",
            ProvisionStage::Activate => "activate",
            ProvisionStage::Teardown => "teardown",
        })
    }
}

impl ProvisionStage {
    /// State a device is left in when this stage fails.
    ///
    /// `None` means no device was created by the sequence.
    pub fn state_on_failure(self) -> Option<TapState> {
        match self {
            ProvisionStage::Create | ProvisionStage::Teardown => None,
            ProvisionStage::AssignAddress => Some(TapState::Created),
            ProvisionStage::Activate => Some(TapState::Addressed),
        }
    }
}

/// Furthest state a device reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TapState {
    Created,
    Addressed,
    Active,
}

/// A provisioned tap device.
///
/// Purely descriptive; dropping it does not delete the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapDevice {
    pub name: String,
    pub cidr: String,
    pub state: TapState,
}

/// Drives the configuration tool through the provisioning steps.
#[derive(Debug, Clone)]
pub struct TapProvisioner<R> {
    runner: R,
}

impl<R: CommandRunner> TapProvisioner<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Create the tap device.
    pub fn create(&self, name: &str) -> Result<(), NetworkError> {
        info!(tap = %name, "Creating TAP device");
        self.step(
            ProvisionStage::Create,
            &["tuntap", "add", "dev", name, "mode", "tap"],
        )
    }

    /// Assign `cidr` (e.g. `172.16.0.1/24`) to the device.
    pub fn assign_address(&self, name: &str, cidr: &str) -> Result<(), NetworkError> {
        info!(tap = %name, cidr = %cidr, "Assigning address to TAP device");
        self.step(
            ProvisionStage::AssignAddress,
            &["addr", "add", cidr, "dev", name],
        )
    }

    /// Bring the device up.
    pub fn activate(&self, name: &str) -> Result<(), NetworkError> {
        info!(tap = %name, "Bringing TAP device up");
        self.step(ProvisionStage::Activate, &["link", "set", name, "up"])
    }

    /// Create, address and activate a device in order.
    ///
    /// Stops at the first failing step without undoing earlier ones.
    pub fn provision(&self, name: &str, cidr: &str) -> Result<TapDevice, NetworkError> {
        self.create(name)?;
        let mut device = TapDevice {
            name: name.to_string(),
            cidr: cidr.to_string(),
            state: TapState::Created,
        };

        self.assign_address(name, cidr)?;
        device.state = TapState::Addressed;

        self.activate(name)?;
        device.state = TapState::Active;

        debug!(tap = %name, "TAP device created and configured");

        Ok(device)
    }

    /// Delete the device.
    ///
    /// Does not require the device to have been created by this process.
    pub fn teardown(&self, name: &str) -> Result<(), NetworkError> {
        info!(tap = %name, "Deleting TAP device");
        self.step(
            ProvisionStage::Teardown,
            &["tuntap", "del", "dev", name, "mode", "tap"],
        )
    }

    fn step(&self, stage: ProvisionStage, args: &[&str]) -> Result<(), NetworkError> {
        self.runner
            .run(args)
            .map(|_| ())
            .map_err(|cause| NetworkError::DeviceConfiguration { stage, cause })
    }
}
