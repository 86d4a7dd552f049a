//! Invocation of the external network configuration tool.

use std::process::Command;

use tracing::trace;

use crate::error::CommandError;

/// Runs the configuration tool with an argument list.
///
/// Implementations block until the tool exits and return its stdout.
pub trait CommandRunner {
    fn run(&self, args: &[&str]) -> Result<String, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[&str]) -> Result<String, CommandError> {
        (**self).run(args)
    }
}

/// Runs an `ip`-style binary as a child process.
#[derive(Debug, Clone)]
pub struct IpCommand {
    program: String,
}

impl IpCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the binary being invoked.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CommandRunner for IpCommand {
    fn run(&self, args: &[&str]) -> Result<String, CommandError> {
        trace!(program = %self.program, args = ?args, "running command");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CommandError::Failed {
                args: format!("{} {}", self.program, args.join(" ")),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
