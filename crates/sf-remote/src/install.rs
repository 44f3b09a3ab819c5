//! Per-node install sequencing

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use sf_core::{ClusterTarget, NodeDescriptor};

use crate::error::ProvisionError;
use crate::session::{RemoteSession, DEFAULT_CONNECT_TIMEOUT};

/// Drives the install procedure for a single node.
///
/// The fleet loop depends on this seam rather than on [`DriverInstaller`]
/// directly, so a concurrent fleet runner (or a test double) can drive many
/// nodes without touching the node-level logic.
#[async_trait]
pub trait NodeInstaller {
    /// Install the driver on `node`, pointing it at `cluster`.
    async fn install(
        &self,
        cluster: &ClusterTarget,
        node: &NodeDescriptor,
    ) -> Result<(), ProvisionError>;
}

/// Installs the docker volume driver on one node over SSH.
///
/// The procedure is fixed and ordered; the first failing step aborts the
/// node and propagates its error:
/// 1. open a session for the node's credentials
/// 2. upload the installer script under its base name
/// 3. `chmod +x` the script
/// 4. best-effort install of `curl` (the script downloads through it on
///    some images; absence must not abort the node)
/// 5. invoke the script against the cluster
///
/// The session is closed after step 5 regardless of outcome.
pub struct DriverInstaller {
    script_path: PathBuf,
    connect_timeout: Duration,
}

impl DriverInstaller {
    /// Create an installer that uploads the script at `script_path`
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Override the session connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Remote name the installer script is uploaded under (its base name)
    fn remote_script_name(&self) -> String {
        self.script_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "install-driver.sh".to_string())
    }

    async fn run_sequence(
        &self,
        session: &RemoteSession,
        cluster: &ClusterTarget,
    ) -> Result<(), ProvisionError> {
        let script = self.remote_script_name();

        session.upload(&self.script_path, &script).await?;
        session
            .run(&shell_command(["chmod", "+x", script.as_str()]), false)
            .await?;
        session
            .run(
                &shell_command(["sudo", "apt-get", "install", "-y", "curl"]),
                true,
            )
            .await?;
        session.run(&install_command(&script, cluster), false).await?;
        Ok(())
    }
}

#[async_trait]
impl NodeInstaller for DriverInstaller {
    async fn install(
        &self,
        cluster: &ClusterTarget,
        node: &NodeDescriptor,
    ) -> Result<(), ProvisionError> {
        tracing::info!(address = %node.address, "connecting to node");
        let session = RemoteSession::open(node, self.connect_timeout).await?;

        let result = self.run_sequence(&session, cluster).await;
        session.close().await;
        result
    }
}

/// Render the driver install invocation for the uploaded script.
fn install_command(script: &str, cluster: &ClusterTarget) -> String {
    let invocation = format!("./{script}");
    shell_command([
        invocation.as_str(),
        cluster.address.as_str(),
        "--cluster-username",
        cluster.username.as_str(),
        "--cluster-password",
        cluster.password.as_str(),
        "--cluster-tenant",
        cluster.tenant.as_str(),
    ])
}

/// Join `args` into a single shell command line, quoting each argument.
///
/// Remote exec always goes through the node's login shell; quoting per
/// argument keeps credential values containing shell metacharacters from
/// being interpreted as syntax.
pub fn shell_command<'a>(args: impl IntoIterator<Item = &'a str>) -> String {
    args.into_iter()
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote one argument for POSIX sh
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote_leaves_plain_words_alone() {
        assert_eq!(shell_quote("chmod"), "chmod");
        assert_eq!(shell_quote("./install-driver.sh"), "./install-driver.sh");
        assert_eq!(shell_quote("10.0.0.1"), "10.0.0.1");
    }

    #[test]
    fn test_shell_quote_neutralizes_metacharacters() {
        assert_eq!(shell_quote("p@ss word"), "'p@ss word'");
        assert_eq!(shell_quote("$(reboot)"), "'$(reboot)'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_shell_quote_escapes_embedded_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_install_command_quotes_credentials() {
        let mut cluster = ClusterTarget::new("10.0.0.1");
        cluster.password = "se;cret".to_string();

        let command = install_command("install-driver.sh", &cluster);
        assert_eq!(
            command,
            "./install-driver.sh 10.0.0.1 --cluster-username admin \
             --cluster-password 'se;cret' --cluster-tenant root"
        );
    }

    #[test]
    fn test_remote_script_name_is_base_name() {
        let installer = DriverInstaller::new("scripts/install-driver.sh");
        assert_eq!(installer.remote_script_name(), "install-driver.sh");
    }
}
