//! # Node Identity
//!
//! A node's address-level identity is the first 20 bytes of the SHA-256
//! digest of its Ed25519 public key, written as 40 hex characters. The same
//! rule resolves the identity a peer proved during the handshake, so a
//! claimed and an actual identity compare byte for byte.

use std::fmt;
use std::str::FromStr;

use shared_crypto::{sha256_truncated, Ed25519KeyPair, Ed25519PublicKey, TRUNCATED_HASH_SIZE};
use thiserror::Error;

/// Node ID length in bytes.
pub const NODE_ID_SIZE: usize = TRUNCATED_HASH_SIZE;

/// Node ID length in hex characters.
pub const NODE_ID_HEX_LEN: usize = NODE_ID_SIZE * 2;

/// Fingerprint of an Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId([u8; NODE_ID_SIZE]);

impl NodeId {
    /// Wrap raw fingerprint bytes.
    pub fn new(bytes: [u8; NODE_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Derive the node ID of a public key.
    pub fn from_public_key(public_key: &Ed25519PublicKey) -> Self {
        Self(sha256_truncated(public_key.as_bytes()))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; NODE_ID_SIZE] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self)
    }
}

/// Reasons a claimed node ID string is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdentityParseError {
    /// Wrong number of hex characters
    #[error("node ID must be {expected} hex characters, got {actual}")]
    InvalidLength {
        /// Expected length in characters
        expected: usize,
        /// Actual length in characters
        actual: usize,
    },

    /// Not valid hex
    #[error("node ID is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl FromStr for NodeId {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != NODE_ID_HEX_LEN {
            return Err(IdentityParseError::InvalidLength {
                expected: NODE_ID_HEX_LEN,
                actual: s.len(),
            });
        }
        let mut bytes = [0u8; NODE_ID_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// Throwaway key pair used to authenticate this run's outgoing handshakes.
///
/// Generated once per run and shared read-only by every validation task.
/// It is never written anywhere.
#[derive(Debug)]
pub struct EphemeralIdentity {
    keypair: Ed25519KeyPair,
    node_id: NodeId,
}

impl EphemeralIdentity {
    /// Generate a fresh identity.
    pub fn generate() -> Self {
        Self::from_keypair(Ed25519KeyPair::generate())
    }

    /// Use an existing key pair.
    pub fn from_keypair(keypair: Ed25519KeyPair) -> Self {
        let node_id = NodeId::from_public_key(&keypair.public_key());
        Self { keypair, node_id }
    }

    /// Signing key pair for the handshake.
    pub fn keypair(&self) -> &Ed25519KeyPair {
        &self.keypair
    }

    /// Public key presented to peers.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Node ID peers will resolve for us.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }
}
