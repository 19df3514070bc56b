//! # Driven Ports (Outbound SPI)
//!
//! Implemented by the host. Production wiring uses
//! [`TcpDialer`](crate::adapters::TcpDialer) and
//! [`ConsoleReporter`](crate::adapters::ConsoleReporter).

use std::fmt;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::domain::NodeId;
use crate::error::ValidationError;

// =============================================================================
// DIALER
// =============================================================================

/// Opens outbound byte streams.
///
/// # Thread Safety
///
/// Shared by every validation task of a run, so implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait Dialer: Send + Sync + 'static {
    /// Stream type handed to the handshake.
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    /// Connect to `host:port`.
    ///
    /// `host` is a hostname, an IPv4 literal or an unbracketed IPv6 literal.
    /// The caller bounds this call with its dial deadline.
    async fn dial(&self, host: &str, port: u16) -> Result<Self::Stream, DialError>;
}

/// Errors from dialing.
#[derive(Debug, Error)]
pub enum DialError {
    /// Connection not established within the deadline
    #[error("dial {addr} timed out after {after:?}")]
    Timeout {
        /// Target
        addr: String,
        /// Deadline that elapsed
        after: Duration,
    },

    /// Resolution or connect failed
    #[error("dial {addr}: {source}")]
    Io {
        /// Target
        addr: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

// =============================================================================
// REPORTER
// =============================================================================

/// Sink for per-peer diagnostics.
///
/// Called concurrently from validation tasks; each call must emit one
/// complete line.
pub trait ValidationReporter: Send + Sync + 'static {
    /// Emit one diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

/// One per-peer diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Token failed to parse
    InvalidAddress {
        /// Offending token
        token: String,
        /// Parse failure
        error: String,
    },
    /// TCP connect failed
    DialFailed {
        /// Offending token
        token: String,
        /// Dial failure
        error: String,
    },
    /// Secret connection handshake failed or timed out
    HandshakeFailed {
        /// Offending token
        token: String,
        /// Handshake failure
        error: String,
    },
    /// Peer proved an identity other than the one in its address
    IdentityMismatch {
        /// Offending token
        token: String,
        /// Identity in the address
        claimed: NodeId,
        /// Identity proved
        actual: NodeId,
    },
}

impl Diagnostic {
    /// Diagnostic for a rejected token.
    pub fn rejected(token: &str, error: &ValidationError) -> Self {
        let token = token.to_string();
        let error_text = error.to_string();
        match error {
            ValidationError::AddressFormat(_) => Self::InvalidAddress {
                token,
                error: error_text,
            },
            ValidationError::Dial(_) => Self::DialFailed {
                token,
                error: error_text,
            },
            ValidationError::HandshakeTimeout(_) | ValidationError::HandshakeProtocol(_) => {
                Self::HandshakeFailed {
                    token,
                    error: error_text,
                }
            }
        }
    }

    /// Token this diagnostic is about.
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidAddress { token, .. }
            | Self::DialFailed { token, .. }
            | Self::HandshakeFailed { token, .. }
            | Self::IdentityMismatch { token, .. } => token,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress { token, error } => {
                write!(f, "Invalid peer address: {token}: {error}")
            }
            Self::DialFailed { token, error } => {
                write!(f, "Failed to dial peer: {token}: {error}")
            }
            Self::HandshakeFailed { token, error } => {
                write!(f, "Failed to upgrade connection: {token}: {error}")
            }
            Self::IdentityMismatch {
                token,
                claimed,
                actual,
            } => write!(
                f,
                "Identity mismatch: dialed {claimed}, connected to {actual}: {token}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AddressFormatError;

    #[test]
    fn test_rejection_lines() {
        let parse = Diagnostic::rejected("x", &AddressFormatError::MissingPort.into());
        assert!(parse.to_string().starts_with("Invalid peer address: x: "));

        let dial = Diagnostic::rejected(
            "1.2.3.4:1",
            &DialError::Timeout {
                addr: "1.2.3.4:1".into(),
                after: Duration::from_secs(1),
            }
            .into(),
        );
        assert!(dial.to_string().starts_with("Failed to dial peer: 1.2.3.4:1: "));

        let handshake = Diagnostic::rejected(
            "1.2.3.4:1",
            &ValidationError::HandshakeTimeout(Duration::from_secs(1)),
        );
        assert!(handshake
            .to_string()
            .starts_with("Failed to upgrade connection: 1.2.3.4:1: "));
    }

    #[test]
    fn test_mismatch_line() {
        let claimed = NodeId::new([0xaa; 20]);
        let actual = NodeId::new([0xbb; 20]);
        let diagnostic = Diagnostic::IdentityMismatch {
            token: "tok".into(),
            claimed,
            actual,
        };

        assert_eq!(
            diagnostic.to_string(),
            format!("Identity mismatch: dialed {claimed}, connected to {actual}: tok")
        );
        assert_eq!(diagnostic.token(), "tok");
    }
}
