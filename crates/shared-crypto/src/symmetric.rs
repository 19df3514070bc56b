//! # Symmetric Encryption
//!
//! ChaCha20-Poly1305 with 96-bit counter nonces, one cipher per direction.
//!
//! ## Nonce Layout
//!
//! ```text
//! [0 0 0 0 | c0 c1 c2 c3 c4 c5 c6 c7]
//!            └── little-endian u64 counter
//! ```
//!
//! The counter starts at zero and is bumped after every sealed or opened
//! frame. It never wraps: reaching `u64::MAX` is an error.

use crate::CryptoError;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce as AeadNonce,
};
use zeroize::Zeroize;

/// Key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag appended to every ciphertext.
pub const TAG_SIZE: usize = 16;

/// Secret key (256-bit).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; KEY_SIZE]);

impl SecretKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice of key material.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Counter nonce for one direction of a connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Nonce with a zero counter.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Current counter value.
    pub fn counter(&self) -> u64 {
        let mut counter = [0u8; 8];
        counter.copy_from_slice(&self.0[4..]);
        u64::from_le_bytes(counter)
    }

    /// Advance the counter by one.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::NonceOverflow` if the counter is exhausted.
    pub fn increment(&mut self) -> Result<(), CryptoError> {
        let next = self
            .counter()
            .checked_add(1)
            .ok_or(CryptoError::NonceOverflow)?;
        self.0[4..].copy_from_slice(&next.to_le_bytes());
        Ok(())
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }

    #[cfg(test)]
    fn with_counter(counter: u64) -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        bytes[4..].copy_from_slice(&counter.to_le_bytes());
        Self(bytes)
    }
}

/// ChaCha20-Poly1305 cipher bound to one key.
pub struct FrameCipher {
    inner: ChaCha20Poly1305,
}

impl FrameCipher {
    /// Create a cipher for the given key.
    pub fn new(key: &SecretKey) -> Self {
        Self {
            inner: ChaCha20Poly1305::new(key.as_bytes().into()),
        }
    }

    /// Encrypt and authenticate `plaintext`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EncryptionFailed` if encryption fails.
    pub fn seal(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.inner
            .encrypt(AeadNonce::from_slice(nonce.as_bytes()), plaintext)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
    }

    /// Authenticate and decrypt `ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::DecryptionFailed` if the tag does not verify.
    pub fn open(&self, nonce: &Nonce, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.inner
            .decrypt(AeadNonce::from_slice(nonce.as_bytes()), ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)
    }
}
