//! storfleet CLI
//!
//! Installs the storfleet docker volume driver across a fleet of nodes over
//! SSH and points every installed driver at one storage cluster. Node
//! credentials arrive as comma-delimited descriptors; each node is validated
//! up front and then provisioned strictly one at a time.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sf_core::{cluster, ClusterTarget};
use sf_remote::DriverInstaller;
use storfleet::fleet;

/// Installer payload shipped alongside the tool
const DEFAULT_SCRIPT: &str = "scripts/install-driver.sh";

#[derive(Parser)]
#[command(name = "storfleet")]
#[command(
    author,
    version,
    about = "Install the storfleet docker volume driver across a fleet of nodes"
)]
struct Cli {
    /// Management address of the storage cluster the drivers register against
    cluster_address: String,

    /// Node descriptor in the form `username,address,password` or
    /// `username,address,,keyfile` (exactly one credential per node)
    #[arg(required = true)]
    node: Vec<String>,

    /// Cluster API username handed to the installer script
    #[arg(long, default_value = cluster::DEFAULT_CLUSTER_USERNAME)]
    cluster_username: String,

    /// Cluster API password handed to the installer script
    #[arg(long, default_value = cluster::DEFAULT_CLUSTER_PASSWORD)]
    cluster_password: String,

    /// Cluster tenant handed to the installer script
    #[arg(long, default_value = cluster::DEFAULT_CLUSTER_TENANT)]
    cluster_tenant: String,

    /// Installer script uploaded to every node
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    script: PathBuf,

    /// Seconds to wait for each node's SSH handshake (mid-boot cloud images
    /// can take a while)
    #[arg(long, default_value_t = 600)]
    connect_timeout: u64,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to info so every remote command and its result is echoed as
    // the run progresses.
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cluster = ClusterTarget {
        address: cli.cluster_address,
        username: cli.cluster_username,
        password: cli.cluster_password,
        tenant: cli.cluster_tenant,
    };

    let installer = DriverInstaller::new(cli.script)
        .with_connect_timeout(Duration::from_secs(cli.connect_timeout));

    fleet::run(&cluster, &cli.node, &installer).await?;
    Ok(())
}
