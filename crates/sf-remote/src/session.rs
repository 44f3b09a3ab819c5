//! Authenticated SSH sessions to target nodes

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Config, Handle};
use russh::Disconnect;
use russh_keys::key::PublicKey;

use sf_core::{NodeAuth, NodeDescriptor};

use crate::error::ProvisionError;

/// SSH port on target nodes
const SSH_PORT: u16 = 22;

/// How long to wait for the TCP connect plus SSH handshake.
///
/// Generously long: freshly booted cloud images can take minutes before
/// sshd starts answering.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(600);

/// An open, authenticated channel to one node.
///
/// Owned by the install sequence for exactly one node and never reused;
/// close (or drop) it before moving on to the next node.
pub struct RemoteSession {
    handle: Handle<ClientHandler>,
    address: String,
}

impl RemoteSession {
    /// Connect to the node described by `descriptor` and authenticate.
    ///
    /// Exactly one auth path is taken per descriptor: a private key when it
    /// carries a keyfile, a password otherwise.
    pub async fn open(
        descriptor: &NodeDescriptor,
        timeout: Duration,
    ) -> Result<Self, ProvisionError> {
        let config = Arc::new(Config::default());
        let address = descriptor.address.clone();

        tracing::debug!(%address, "connecting");
        let mut handle = tokio::time::timeout(
            timeout,
            client::connect(config, (address.as_str(), SSH_PORT), ClientHandler),
        )
        .await
        .map_err(|_| ProvisionError::ConnectTimeout {
            address: address.clone(),
            timeout,
        })?
        .map_err(|source| ProvisionError::Connect {
            address: address.clone(),
            source,
        })?;

        let authenticated = match &descriptor.auth {
            NodeAuth::Keyfile(path) => {
                let path = expand_home(path);
                let key = russh_keys::load_secret_key(&path, None).map_err(|source| {
                    ProvisionError::KeyLoad {
                        path: path.clone(),
                        source,
                    }
                })?;
                handle
                    .authenticate_publickey(&descriptor.username, Arc::new(key))
                    .await
                    .map_err(|source| ProvisionError::Transport {
                        address: address.clone(),
                        source,
                    })?
            }
            NodeAuth::Password(password) => handle
                .authenticate_password(&descriptor.username, password)
                .await
                .map_err(|source| ProvisionError::Transport {
                    address: address.clone(),
                    source,
                })?,
        };

        if !authenticated {
            return Err(ProvisionError::AuthenticationRejected {
                username: descriptor.username.clone(),
                address,
            });
        }

        tracing::debug!(%address, username = %descriptor.username, "authenticated");
        Ok(Self { handle, address })
    }

    /// Address of the node this session is bound to
    pub fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn handle(&self) -> &Handle<ClientHandler> {
        &self.handle
    }

    pub(crate) fn transport_error(&self, source: russh::Error) -> ProvisionError {
        ProvisionError::Transport {
            address: self.address.clone(),
            source,
        }
    }

    /// Send an application-level disconnect.
    ///
    /// Best-effort: dropping the session tears the transport down either way.
    pub async fn close(self) {
        let _ = self
            .handle
            .disconnect(Disconnect::ByApplication, "install finished", "en")
            .await;
    }
}

/// Client-side handler for node connections.
///
/// Host keys are accepted unconditionally (trust-on-first-use): fleet
/// targets are typically freshly provisioned machines whose keys are not
/// known ahead of time, and the tool favors unattended throughput over
/// host-key pinning. Point this only at hosts reached over a network you
/// trust; pinning is the right call where an active attacker is in scope.
pub(crate) struct ClientHandler;

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Expand a leading `~` to the user's home directory
pub(crate) fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
