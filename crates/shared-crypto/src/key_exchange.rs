//! # X25519 Key Exchange
//!
//! One ephemeral key pair per handshake. The secret half is consumed by the
//! Diffie-Hellman step, so it cannot be reused for a second exchange.

use crate::CryptoError;
use x25519_dalek::{EphemeralSecret, PublicKey};

/// X25519 public key length in bytes.
pub const EPHEMERAL_KEY_SIZE: usize = 32;

/// Ephemeral X25519 key pair.
pub struct EphemeralKeyPair {
    secret: EphemeralSecret,
    public: PublicKey,
}

impl EphemeralKeyPair {
    /// Generate a fresh key pair.
    pub fn generate() -> Self {
        let secret = EphemeralSecret::random_from_rng(rand::thread_rng());
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Public half, as sent on the wire.
    pub fn public_bytes(&self) -> [u8; EPHEMERAL_KEY_SIZE] {
        self.public.to_bytes()
    }

    /// Complete the exchange with the remote public key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::NonContributoryKeyAgreement` when the remote key
    /// is a low-order point and the shared secret carries no entropy.
    pub fn diffie_hellman(
        self,
        remote: &[u8; EPHEMERAL_KEY_SIZE],
    ) -> Result<SharedSecret, CryptoError> {
        let shared = self.secret.diffie_hellman(&PublicKey::from(*remote));
        if !shared.was_contributory() {
            return Err(CryptoError::NonContributoryKeyAgreement);
        }
        Ok(SharedSecret(shared))
    }
}

/// Shared Diffie-Hellman secret (zeroized on drop).
pub struct SharedSecret(x25519_dalek::SharedSecret);

impl SharedSecret {
    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}
