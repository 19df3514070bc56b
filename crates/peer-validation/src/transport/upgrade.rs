//! Deadline-bounded connection upgrade.

use std::time::Duration;

use shared_crypto::Ed25519KeyPair;
use tokio::io::{AsyncRead, AsyncWrite};

use super::secret_connection::{HandshakeError, SecretConnection};

/// Upgrades raw streams into secret connections under a deadline.
#[derive(Debug, Clone, Copy)]
pub struct HandshakeUpgrader {
    timeout: Duration,
}

impl HandshakeUpgrader {
    /// Upgrader that abandons handshakes running longer than `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Perform the handshake as `identity`.
    ///
    /// On any failure the stream has already been dropped, closing the
    /// underlying connection, by the time this returns.
    pub async fn upgrade<S>(
        &self,
        io: S,
        identity: &Ed25519KeyPair,
    ) -> Result<SecretConnection<S>, HandshakeError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        match tokio::time::timeout(self.timeout, SecretConnection::handshake(io, identity)).await {
            Ok(result) => result,
            Err(_) => Err(HandshakeError::Timeout(self.timeout)),
        }
    }
}
