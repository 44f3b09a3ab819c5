//! Input-validation error types

use thiserror::Error;

/// Failures detected while validating a node descriptor token.
///
/// Every variant is raised before any network activity begins, so a typo in
/// the last node argument aborts the run before the first node is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Token did not split into 3 or 4 comma-delimited fields
    #[error("Malformed node descriptor `{0}`: expected `username,address,password[,keyfile]`")]
    Malformed(String),

    /// Both a password and a keyfile were supplied
    #[error("Node descriptor `{0}` supplies both a password and a keyfile; provide exactly one")]
    CredentialConflict(String),

    /// Neither a password nor a keyfile was supplied
    #[error("Node descriptor `{0}` supplies neither a password nor a keyfile; provide exactly one")]
    CredentialMissing(String),
}
