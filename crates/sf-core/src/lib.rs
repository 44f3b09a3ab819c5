//! sf-core: Shared domain types for the storfleet driver installer
//!
//! This crate holds the types passed between the CLI and the remote
//! provisioning engine: node descriptors and their parser, the cluster
//! target the installed driver registers against, and the per-run install
//! report. It deliberately has no transport dependencies.

pub mod cluster;
pub mod descriptor;
pub mod error;
pub mod report;

pub use cluster::ClusterTarget;
pub use descriptor::{NodeAuth, NodeDescriptor};
pub use error::DescriptorError;
pub use report::{InstallReport, NodeOutcome, ReportEntry};
