//! Remote command execution and outcome classification

use russh::ChannelMsg;

use crate::error::ProvisionError;
use crate::session::RemoteSession;

/// Captured outcome of one remote command.
///
/// Either fully populated or never produced: a channel that closes without
/// reporting an exit status surfaces as a transport error instead of a
/// half-built result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit status of the remote process
    pub exit_status: u32,
    /// Captured stdout
    pub stdout: Vec<u8>,
    /// Captured stderr
    pub stderr: Vec<u8>,
}

impl CommandResult {
    /// True when the remote process exited 0
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }

    /// Stdout as lossy UTF-8
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stderr as lossy UTF-8
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl RemoteSession {
    /// Run `command` on the node, blocking until the remote process exits.
    ///
    /// With `fail_ok` a non-zero exit is returned to the caller, which is
    /// expected to inspect `exit_status` (stderr carries the diagnostics);
    /// without it a non-zero exit is a [`ProvisionError::Command`]. Advisory
    /// steps like pre-installing a download tool run with `fail_ok`; the
    /// install steps proper run without.
    pub async fn run(&self, command: &str, fail_ok: bool) -> Result<CommandResult, ProvisionError> {
        tracing::info!(address = %self.address(), %command, "executing remote command");

        let mut channel = self
            .handle()
            .channel_open_session()
            .await
            .map_err(|source| self.transport_error(source))?;
        channel
            .exec(true, command)
            .await
            .map_err(|source| self.transport_error(source))?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut exit_status = None;
        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, ext: 1 } => stderr.extend_from_slice(data),
                ChannelMsg::ExitStatus {
                    exit_status: status,
                } => exit_status = Some(status),
                _ => {}
            }
        }

        let Some(exit_status) = exit_status else {
            return Err(ProvisionError::MissingExitStatus {
                address: self.address().to_string(),
                command: command.to_string(),
            });
        };

        let result = CommandResult {
            exit_status,
            stdout,
            stderr,
        };

        if result.success() {
            tracing::info!(
                address = %self.address(),
                output = %result.stdout_lossy().trim_end(),
                "command succeeded"
            );
        } else if fail_ok {
            tracing::warn!(
                address = %self.address(),
                %command,
                exit_status = result.exit_status,
                stderr = %result.stderr_lossy().trim_end(),
                "command failed, continuing"
            );
        } else {
            tracing::error!(
                address = %self.address(),
                %command,
                exit_status = result.exit_status,
                stderr = %result.stderr_lossy().trim_end(),
                "command failed"
            );
            return Err(ProvisionError::Command {
                address: self.address().to_string(),
                command: command.to_string(),
                exit_status: result.exit_status,
                stderr: result.stderr_lossy().trim_end().to_string(),
            });
        }

        Ok(result)
    }
}
