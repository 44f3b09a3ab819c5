//! Provisioning error types

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures raised while provisioning a node.
///
/// [`ProvisionError::Command`] means the remote command itself exited
/// non-zero; every other variant is a session or transport failure. The
/// distinction matters to an operator running unattended: a failed command
/// points at the node's state, everything else points at connectivity or
/// credentials.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// TCP connect or SSH handshake failed
    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: russh::Error,
    },

    /// The connect did not complete within the timeout
    #[error("Connection to {address} timed out after {timeout:?}")]
    ConnectTimeout { address: String, timeout: Duration },

    /// The node rejected the supplied credentials
    #[error("Authentication rejected for {username}@{address}")]
    AuthenticationRejected { username: String, address: String },

    /// The private key named by the descriptor could not be loaded
    #[error("Failed to load private key {path}: {source}")]
    KeyLoad {
        path: PathBuf,
        #[source]
        source: russh_keys::Error,
    },

    /// A remote command exited non-zero while `fail_ok` was off
    #[error("Remote command `{command}` on {address} exited with status {exit_status}: {stderr}")]
    Command {
        address: String,
        command: String,
        exit_status: u32,
        stderr: String,
    },

    /// The channel closed without reporting an exit status
    #[error("Remote command `{command}` on {address} ended without an exit status")]
    MissingExitStatus { address: String, command: String },

    /// Uploading the installer artifact failed
    #[error("Failed to upload {local} to {address}:{remote}: {source:#}")]
    Transfer {
        local: PathBuf,
        address: String,
        remote: String,
        #[source]
        source: anyhow::Error,
    },

    /// The SSH transport failed mid-operation
    #[error("Transport failure on {address}: {source}")]
    Transport {
        address: String,
        #[source]
        source: russh::Error,
    },
}
