//! # SHA-256 Hashing
//!
//! Node identities are the first 20 bytes of the SHA-256 digest of the
//! Ed25519 public key, so both the full and the truncated form live here.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Sha256Hash = [u8; 32];

/// Size of a truncated digest in bytes.
pub const TRUNCATED_HASH_SIZE: usize = 20;

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Sha256Hash {
    Sha256::digest(data).into()
}

/// Hash data with SHA-256 and keep the first [`TRUNCATED_HASH_SIZE`] bytes.
pub fn sha256_truncated(data: &[u8]) -> [u8; TRUNCATED_HASH_SIZE] {
    let digest = sha256(data);
    let mut out = [0u8; TRUNCATED_HASH_SIZE];
    out.copy_from_slice(&digest[..TRUNCATED_HASH_SIZE]);
    out
}
