//! Per-run install report

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::NodeDescriptor;

/// Outcome of one node's install sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeOutcome {
    /// Every step completed
    Success,
    /// The sequence aborted with the given reason
    Failed(String),
}

impl fmt::Display for NodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOutcome::Success => write!(f, "ok"),
            NodeOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// One row of the install report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The node the outcome applies to
    pub node: NodeDescriptor,
    /// What happened
    pub outcome: NodeOutcome,
}

/// Ordered record of what happened to each node, in input order.
///
/// Under the abort-on-first-failure policy the report covers the nodes
/// attempted up to and including the failing one; later nodes never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    entries: Vec<ReportEntry>,
}

impl InstallReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome for `node`
    pub fn record(&mut self, node: NodeDescriptor, outcome: NodeOutcome) {
        self.entries.push(ReportEntry { node, outcome });
    }

    /// Entries in input order
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// True when every recorded node succeeded
    pub fn all_succeeded(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.outcome == NodeOutcome::Success)
    }

    /// Number of recorded nodes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no node has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
