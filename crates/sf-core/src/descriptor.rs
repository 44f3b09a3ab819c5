//! Per-node connection descriptors and their parser

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

/// Credential used to authenticate against one node.
///
/// Exactly one mechanism applies per node; tokens offering both (or neither)
/// are rejected at parse time, so a constructed descriptor can never carry a
/// conflicting credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeAuth {
    /// Username/password authentication
    Password(String),
    /// Private key on the local filesystem (e.g. cloud images that ship
    /// without passwords)
    Keyfile(PathBuf),
}

/// Connection and credential record for a single target node.
///
/// Constructed once from one CLI token, consumed by exactly one
/// session-establishment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// SSH username on the node
    pub username: String,
    /// Hostname or IP address of the node
    pub address: String,
    /// Authentication mechanism
    pub auth: NodeAuth,
}

impl NodeDescriptor {
    /// Parse a raw CLI token.
    ///
    /// Accepted forms, after stripping leading/trailing commas:
    /// - `username,address,password`
    /// - `username,address,password,keyfile` (either credential slot may be
    ///   empty, but not both and not neither)
    pub fn parse(token: &str) -> Result<Self, DescriptorError> {
        let fields: Vec<&str> = token.trim_matches(',').split(',').collect();
        let (username, address, password, keyfile) = match fields.as_slice() {
            [username, address, password] => (*username, *address, *password, ""),
            [username, address, password, keyfile] => (*username, *address, *password, *keyfile),
            _ => return Err(DescriptorError::Malformed(token.to_string())),
        };

        let auth = match (password.is_empty(), keyfile.is_empty()) {
            (false, true) => NodeAuth::Password(password.to_string()),
            (true, false) => NodeAuth::Keyfile(PathBuf::from(keyfile)),
            (false, false) => return Err(DescriptorError::CredentialConflict(token.to_string())),
            (true, true) => return Err(DescriptorError::CredentialMissing(token.to_string())),
        };

        Ok(Self {
            username: username.to_string(),
            address: address.to_string(),
            auth,
        })
    }

    /// Password, if this node authenticates with one
    pub fn password(&self) -> Option<&str> {
        match &self.auth {
            NodeAuth::Password(password) => Some(password),
            NodeAuth::Keyfile(_) => None,
        }
    }

    /// Private key path, if this node authenticates with one
    pub fn keyfile(&self) -> Option<&Path> {
        match &self.auth {
            NodeAuth::Password(_) => None,
            NodeAuth::Keyfile(path) => Some(path),
        }
    }

    /// Render the canonical token form; [`NodeDescriptor::parse`] round-trips it.
    pub fn to_token(&self) -> String {
        match &self.auth {
            NodeAuth::Password(password) => {
                format!("{},{},{}", self.username, self.address, password)
            }
            NodeAuth::Keyfile(path) => {
                format!("{},{},,{}", self.username, self.address, path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_field_password() {
        let node = NodeDescriptor::parse("alice,10.0.0.5,secret").unwrap();
        assert_eq!(node.username, "alice");
        assert_eq!(node.address, "10.0.0.5");
        assert_eq!(node.auth, NodeAuth::Password("secret".to_string()));
    }

    #[test]
    fn test_parse_four_field_keyfile() {
        let node = NodeDescriptor::parse("ubuntu,10.0.0.7,,/home/user/.ssh/id_rsa").unwrap();
        assert_eq!(node.username, "ubuntu");
        assert_eq!(
            node.auth,
            NodeAuth::Keyfile(PathBuf::from("/home/user/.ssh/id_rsa"))
        );
    }

    #[test]
    fn test_parse_four_field_password_with_empty_keyfile() {
        let node = NodeDescriptor::parse("alice,10.0.0.5,secret,").unwrap();
        assert_eq!(node.password(), Some("secret"));
        assert_eq!(node.keyfile(), None);
    }

    #[test]
    fn test_parse_strips_surrounding_commas() {
        // Shell-completion artifacts like `testuser,1.1.1.1,testpass,,`
        let node = NodeDescriptor::parse("testuser,1.1.1.1,testpass,,").unwrap();
        assert_eq!(node.password(), Some("testpass"));
    }

    #[test]
    fn test_parse_rejects_both_credentials() {
        let err = NodeDescriptor::parse("alice,10.0.0.5,secret,/key").unwrap_err();
        assert!(matches!(err, DescriptorError::CredentialConflict(_)));
    }

    #[test]
    fn test_parse_rejects_neither_credential() {
        let err = NodeDescriptor::parse("alice,10.0.0.5,,").unwrap_err();
        assert!(matches!(err, DescriptorError::CredentialMissing(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        for token in ["alice,10.0.0.5", "alice", "", "a,b,c,d,e"] {
            let err = NodeDescriptor::parse(token).unwrap_err();
            assert!(matches!(err, DescriptorError::Malformed(_)), "{token}");
        }
    }

    #[test]
    fn test_token_round_trip() {
        let password = NodeDescriptor::parse("root,10.0.0.2,pw1").unwrap();
        assert_eq!(NodeDescriptor::parse(&password.to_token()).unwrap(), password);

        let keyfile = NodeDescriptor::parse("root,10.0.0.3,,/home/user/.ssh/id_rsa").unwrap();
        assert_eq!(NodeDescriptor::parse(&keyfile.to_token()).unwrap(), keyfile);
    }
}
