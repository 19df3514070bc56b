//! Secret connection error types.

use std::io;
use std::time::Duration;

use shared_crypto::CryptoError;
use thiserror::Error;

use super::codec::CodecError;
use super::DATA_MAX_SIZE;

/// Errors on an established encrypted stream.
#[derive(Debug, Error)]
pub enum SecretConnectionError {
    /// Underlying transport failed
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Frame failed authentication
    #[error("failed to decrypt frame")]
    Decrypt,

    /// Decrypted frame claims more data than a frame can hold
    #[error("frame announces {0} bytes, maximum is {DATA_MAX_SIZE}")]
    OversizedChunk(u32),

    /// Nonce exhaustion or cipher failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Malformed length-delimited message
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors while establishing a secret connection.
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// Deadline elapsed before the exchange completed
    #[error("handshake timed out after {0:?}")]
    Timeout(Duration),

    /// Underlying transport failed
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Malformed handshake message
    #[error("malformed handshake message: {0}")]
    Codec(#[from] CodecError),

    /// Ephemeral key of the wrong size
    #[error("ephemeral key must be 32 bytes, got {0}")]
    InvalidEphemeralKey(usize),

    /// Remote ephemeral key is a low-order point
    #[error("remote ephemeral key has small order")]
    SmallOrderRemoteKey,

    /// Auth message without a public key
    #[error("remote did not send a public key")]
    MissingRemoteKey,

    /// Auth message with a non-Ed25519 key
    #[error("expected an ed25519 public key")]
    UnsupportedKeyType,

    /// Remote failed to prove possession of its key
    #[error("challenge signature verification failed")]
    ChallengeVerification,

    /// HKDF refused the requested output length
    #[error("session key derivation failed")]
    KeyDerivation,

    /// Key material or signature rejected
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Failure on the encrypted stream during the auth exchange
    #[error(transparent)]
    Connection(#[from] SecretConnectionError),
}

impl HandshakeError {
    /// Whether this is a deadline failure rather than a protocol one.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
