//! sf-remote: Remote node provisioning engine
//!
//! Opens authenticated SSH sessions to target nodes, uploads the installer
//! artifact, runs the fixed install sequence, and classifies failures so
//! that "the remote command failed" is distinguishable from "the session or
//! transport failed" when the tool runs unattended against many hosts.

pub mod error;
pub mod exec;
pub mod install;
pub mod session;
pub mod transfer;

pub use error::ProvisionError;
pub use exec::CommandResult;
pub use install::{DriverInstaller, NodeInstaller};
pub use session::{RemoteSession, DEFAULT_CONNECT_TIMEOUT};
