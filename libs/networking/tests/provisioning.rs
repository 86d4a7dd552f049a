//! Integration tests for tap provisioning through the public API.
//!
//! A recording runner stands in for the `ip` tool, so no device is touched.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Mutex;

use tapnet_networking::{
    CommandError, CommandRunner, NetworkError, ProvisionStage, TapProvisioner, TapState,
};

/// Records invocations; fails any whose arguments contain `fail_on`.
#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    fail_on: Option<&'static str>,
}

impl RecordingRunner {
    fn failing_on(word: &'static str) -> Self {
        Self {
            fail_on: Some(word),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, args: &[&str]) -> Result<String, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_string()).collect());

        if self.fail_on.is_some_and(|word| args.contains(&word)) {
            return Err(CommandError::Failed {
                args: args.join(" "),
                status: ExitStatus::from_raw(1 << 8),
                stderr: "Cannot find device".to_string(),
            });
        }
        Ok(String::new())
    }
}

fn argv(s: &str) -> Vec<String> {
    s.split(' ').map(str::to_string).collect()
}

#[test]
fn test_provision_then_teardown() {
    let runner = RecordingRunner::default();
    let provisioner = TapProvisioner::new(&runner);

    let device = provisioner.provision("tap-vm1", "172.16.0.1/24").unwrap();
    assert_eq!(device.name, "tap-vm1");
    assert_eq!(device.cidr, "172.16.0.1/24");
    assert_eq!(device.state, TapState::Active);

    provisioner.teardown("tap-vm1").unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            argv("tuntap add dev tap-vm1 mode tap"),
            argv("addr add 172.16.0.1/24 dev tap-vm1"),
            argv("link set tap-vm1 up"),
            argv("tuntap del dev tap-vm1 mode tap"),
        ]
    );
}

#[test]
fn test_activate_failure_leaves_addressed_device() {
    let runner = RecordingRunner::failing_on("up");
    let provisioner = TapProvisioner::new(&runner);

    let err = provisioner.provision("tap-vm1", "172.16.0.1/24").unwrap_err();
    let NetworkError::DeviceConfiguration { stage, cause } = err else {
        panic!("expected a device configuration error");
    };
    assert_eq!(stage, ProvisionStage::Activate);
    assert_eq!(stage.state_on_failure(), Some(TapState::Addressed));
    assert!(matches!(cause, CommandError::Failed { .. }));

    // Nothing was rolled back.
    assert_eq!(runner.calls().len(), 3);
}

#[test]
fn test_teardown_without_prior_create() {
    let runner = RecordingRunner::default();
    TapProvisioner::new(&runner).teardown("tap-stale").unwrap();
    assert_eq!(runner.calls(), vec![argv("tuntap del dev tap-stale mode tap")]);
}

#[test]
fn test_teardown_failure_reports_teardown_stage() {
    let runner = RecordingRunner::failing_on("del");
    let err = TapProvisioner::new(&runner).teardown("tap-stale").unwrap_err();

    assert_eq!(err.reason_code(), "device_configuration_failed");
    assert!(matches!(
        err,
        NetworkError::DeviceConfiguration {
            stage: ProvisionStage::Teardown,
            ..
        }
    ));
}
