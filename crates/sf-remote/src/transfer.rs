//! Installer artifact upload over SFTP

use std::path::Path;

use anyhow::Context;
use russh_sftp::client::SftpSession;
use tokio::io::AsyncWriteExt;

use crate::error::ProvisionError;
use crate::session::RemoteSession;

impl RemoteSession {
    /// Copy `local_path` to `remote_path` on the node over the session's
    /// SFTP sub-channel.
    ///
    /// The channel's own integrity guarantees are trusted; no post-transfer
    /// checksum is taken.
    pub async fn upload(&self, local_path: &Path, remote_path: &str) -> Result<(), ProvisionError> {
        tracing::info!(
            address = %self.address(),
            local = %local_path.display(),
            remote = %remote_path,
            "uploading installer artifact"
        );

        self.upload_inner(local_path, remote_path)
            .await
            .map_err(|source| ProvisionError::Transfer {
                local: local_path.to_path_buf(),
                address: self.address().to_string(),
                remote: remote_path.to_string(),
                source,
            })
    }

    async fn upload_inner(&self, local_path: &Path, remote_path: &str) -> anyhow::Result<()> {
        let payload = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("reading {}", local_path.display()))?;

        let mut channel = self.handle().channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .context("starting sftp subsystem")?;

        let mut remote = sftp
            .create(remote_path)
            .await
            .with_context(|| format!("creating remote file {remote_path}"))?;
        remote.write_all(&payload).await?;
        remote.shutdown().await?;

        sftp.close().await.context("closing sftp subsystem")?;
        Ok(())
    }
}
