//! # Validation Errors
//!
//! Why a single address was rejected. Each variant maps to exactly one
//! diagnostic kind on the reporter.

use std::time::Duration;

use thiserror::Error;

use crate::domain::AddressFormatError;
use crate::ports::DialError;
use crate::transport::HandshakeError;

/// Reason an address produced no accepted result.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Token did not parse
    #[error(transparent)]
    AddressFormat(#[from] AddressFormatError),

    /// TCP connection could not be established
    #[error(transparent)]
    Dial(#[from] DialError),

    /// Handshake did not finish within the deadline
    #[error("handshake timed out after {0:?}")]
    HandshakeTimeout(Duration),

    /// Handshake failed for a protocol or I/O reason
    #[error(transparent)]
    HandshakeProtocol(HandshakeError),
}

impl From<HandshakeError> for ValidationError {
    fn from(err: HandshakeError) -> Self {
        match err {
            HandshakeError::Timeout(after) => Self::HandshakeTimeout(after),
            other => Self::HandshakeProtocol(other),
        }
    }
}

impl ValidationError {
    /// Whether the failure happened after the TCP connection was made.
    pub fn is_handshake_failure(&self) -> bool {
        matches!(self, Self::HandshakeTimeout(_) | Self::HandshakeProtocol(_))
    }
}
