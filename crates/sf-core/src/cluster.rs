//! Storage cluster target configuration

use serde::{Deserialize, Serialize};

/// Default cluster API username
pub const DEFAULT_CLUSTER_USERNAME: &str = "admin";
/// Default cluster API password
pub const DEFAULT_CLUSTER_PASSWORD: &str = "password";
/// Default cluster tenant
pub const DEFAULT_CLUSTER_TENANT: &str = "root";

/// The storage cluster every installed driver binary registers against.
///
/// Built once from CLI arguments and passed by reference for the whole run;
/// there is no module-level endpoint state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterTarget {
    /// Management address of the cluster
    pub address: String,
    /// API username
    pub username: String,
    /// API password
    pub password: String,
    /// Tenant the driver operates under
    pub tenant: String,
}

impl ClusterTarget {
    /// Create a target for `address` with the default credentials
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            username: DEFAULT_CLUSTER_USERNAME.to_string(),
            password: DEFAULT_CLUSTER_PASSWORD.to_string(),
            tenant: DEFAULT_CLUSTER_TENANT.to_string(),
        }
    }
}
