//! # Shared Crypto - Secret Connection Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Long-term node identity, challenge signing |
//! | `hashing` | SHA-256 | Node ID derivation (truncated digest) |
//! | `key_exchange` | X25519 | Ephemeral Diffie-Hellman per handshake |
//! | `symmetric` | ChaCha20-Poly1305 | Frame encryption with counter nonces |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **X25519**: Non-contributory (small-order) results are surfaced, never used
//! - **ChaCha20-Poly1305**: Counter nonces never wrap; overflow is an error

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod key_exchange;
pub mod signatures;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_truncated, Sha256Hash, TRUNCATED_HASH_SIZE};
pub use key_exchange::{EphemeralKeyPair, SharedSecret, EPHEMERAL_KEY_SIZE};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use symmetric::{FrameCipher, Nonce, SecretKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
