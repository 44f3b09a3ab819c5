//! Fleet orchestration: validate every node up front, then install one node
//! at a time in input order.

use thiserror::Error;

use sf_core::{ClusterTarget, DescriptorError, InstallReport, NodeDescriptor, NodeOutcome};
use sf_remote::{NodeInstaller, ProvisionError};

use crate::output::{self, print_error, print_info, print_success};

/// A fleet run that stopped early
#[derive(Error, Debug)]
pub enum FleetError {
    /// A node token failed validation; no node was contacted
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// A node's install sequence failed; later nodes were not attempted
    #[error("Install failed on node {address}")]
    NodeFailed {
        address: String,
        #[source]
        source: ProvisionError,
    },
}

/// Install the driver on every node, stopping at the first failure.
///
/// Two phases: every raw token is parsed before any network activity, so a
/// typo in the last node aborts the run before the first node is touched;
/// then nodes are installed strictly sequentially in input order. The first
/// failing node aborts the run and leaves later nodes untouched — a node
/// interrupted mid-sequence is re-run by invoking the tool again.
pub async fn run<I: NodeInstaller + Sync>(
    cluster: &ClusterTarget,
    raw_nodes: &[String],
    installer: &I,
) -> Result<InstallReport, FleetError> {
    let nodes: Vec<NodeDescriptor> = raw_nodes
        .iter()
        .map(|token| NodeDescriptor::parse(token))
        .collect::<Result<_, _>>()?;

    println!();
    println!("Setting up the following nodes");
    println!("==============================");
    println!("Cluster: {}", cluster.address);
    println!("{}", output::node_summary_table(&nodes));

    let mut report = InstallReport::new();
    for node in &nodes {
        print_info(&format!(
            "Installing driver on {}@{}",
            node.username, node.address
        ));
        match installer.install(cluster, node).await {
            Ok(()) => {
                print_success(&format!("Node {} installed", node.address));
                report.record(node.clone(), NodeOutcome::Success);
            }
            Err(source) => {
                print_error(&format!("Node {} failed: {}", node.address, source));
                report.record(node.clone(), NodeOutcome::Failed(source.to_string()));
                println!("{}", output::report_table(&report));
                return Err(FleetError::NodeFailed {
                    address: node.address.clone(),
                    source,
                });
            }
        }
    }

    println!("{}", output::report_table(&report));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Records every install attempt; fails when asked to.
    #[derive(Default)]
    struct RecordingInstaller {
        attempted: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl NodeInstaller for RecordingInstaller {
        async fn install(
            &self,
            _cluster: &ClusterTarget,
            node: &NodeDescriptor,
        ) -> Result<(), ProvisionError> {
            self.attempted.lock().unwrap().push(node.address.clone());
            if self.fail_on.as_deref() == Some(node.address.as_str()) {
                return Err(ProvisionError::Command {
                    address: node.address.clone(),
                    command: "chmod +x install-driver.sh".to_string(),
                    exit_status: 1,
                    stderr: "chmod: cannot access 'install-driver.sh'".to_string(),
                });
            }
            Ok(())
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_malformed_token_aborts_before_any_connect() {
        let installer = RecordingInstaller::default();
        let raw = tokens(&["root,10.0.0.2,pw1", "root10.0.0.3", "root,10.0.0.4,pw3"]);

        let err = run(&ClusterTarget::new("10.0.0.1"), &raw, &installer)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FleetError::Descriptor(DescriptorError::Malformed(_))
        ));
        assert!(installer.attempted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_aborts_on_first_failing_node() {
        let installer = RecordingInstaller {
            fail_on: Some("10.0.0.3".to_string()),
            ..Default::default()
        };
        let raw = tokens(&[
            "root,10.0.0.2,pw1",
            "root,10.0.0.3,pw2",
            "root,10.0.0.4,pw3",
        ]);

        let err = run(&ClusterTarget::new("10.0.0.1"), &raw, &installer)
            .await
            .unwrap_err();

        assert!(
            matches!(err, FleetError::NodeFailed { ref address, .. } if address.as_str() == "10.0.0.3")
        );
        // Node 4 was never attempted
        assert_eq!(
            *installer.attempted.lock().unwrap(),
            vec!["10.0.0.2", "10.0.0.3"]
        );
    }

    #[tokio::test]
    async fn test_successful_run_reports_every_node() {
        let installer = RecordingInstaller::default();
        let raw = tokens(&["root,10.0.0.2,pw1", "root,10.0.0.3,,/home/user/.ssh/id_rsa"]);

        let report = run(&ClusterTarget::new("10.0.0.1"), &raw, &installer)
            .await
            .unwrap();

        assert_eq!(report.len(), 2);
        assert!(report.all_succeeded());
        assert_eq!(
            *installer.attempted.lock().unwrap(),
            vec!["10.0.0.2", "10.0.0.3"]
        );
    }
}
