//! Error display for the CLI.

use colored::Colorize;
use tapnet_networking::NetworkError;

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let Some(net_err) = err.downcast_ref::<NetworkError>() else {
        return;
    };

    eprintln!("Reason: {}", net_err.reason_code());

    if net_err.is_permission_denied() {
        eprintln!(
            "\n{}",
            "Hint: raw sockets need CAP_NET_RAW and device changes need CAP_NET_ADMIN; try running as root."
                .yellow()
        );
        return;
    }

    match net_err {
        NetworkError::InterfaceNotFound { .. } => {
            eprintln!(
                "\n{}",
                "Hint: list interfaces with `ip link` and check the name.".yellow()
            );
        }
        NetworkError::DeviceConfiguration { stage, .. } => {
            if let Some(state) = stage.state_on_failure() {
                eprintln!(
                    "\n{}",
                    format!(
                        "Hint: the device was left in the {:?} state; run `tapctl tap down <name>` to remove it.",
                        state
                    )
                    .yellow()
                );
            }
        }
        _ => {}
    }
}
