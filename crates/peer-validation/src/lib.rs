//! # Tendermint Peer Address Validation
//!
//! Checks `id@host:port` peer addresses against the nodes behind them.
//! Each address is dialed, upgraded with the Tendermint secret connection
//! handshake, and the identity the peer proves is compared with the one
//! written in the address.
//!
//! ## Architecture
//!
//! - **Domain Layer:** address grammar, node IDs, reconciliation, bounded results
//! - **Transport Layer:** secret connection handshake and encrypted framing
//! - **Ports Layer:** `Dialer` and `ValidationReporter` traits
//! - **Service Layer:** `PeerValidator`, one task per address, joined
//! - **Adapters Layer:** TCP dialer and stdout reporter
//!
//! ## Example
//!
//! ```rust,no_run
//! use tmp2p_validation::{PeerValidator, ValidatorConfig};
//!
//! # async fn run() {
//! let validator = PeerValidator::tcp(ValidatorConfig::default());
//! let peers = validator
//!     .validate_peers("1.2.3.4:26656,5.6.7.8:26656", 0)
//!     .await;
//! println!("{}", peers.join(","));
//! # }
//! ```

#![warn(missing_docs)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod transport;

/// Test utilities (MockPeer, RecordingReporter)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain
pub use domain::{
    reconcile, AddressFormatError, EphemeralIdentity, IdentityParseError, NodeId, PeerAddress,
    ResultAggregator, ValidationOutcome, ValidatorConfig, DEFAULT_DIAL_TIMEOUT,
    DEFAULT_HANDSHAKE_TIMEOUT,
};

// Errors
pub use error::ValidationError;

// Ports
pub use ports::{Diagnostic, DialError, Dialer, ValidationReporter};

// Transport
pub use transport::{HandshakeError, HandshakeUpgrader, SecretConnection, SecretConnectionError};

// Adapters
pub use adapters::{ConsoleReporter, TcpDialer};

// Service
pub use service::PeerValidator;

/// Protocol implemented by the handshake.
pub const PROTOCOL: &str = "tendermint-secret-connection/v0.34";
