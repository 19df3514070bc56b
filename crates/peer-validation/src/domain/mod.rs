//! # Domain Layer
//!
//! Pure types and policy: address parsing, identity derivation,
//! reconciliation and the bounded result collector. No I/O.

pub mod address;
pub mod aggregator;
pub mod config;
pub mod identity;
pub mod outcome;

pub use address::{AddressFormatError, PeerAddress};
pub use aggregator::ResultAggregator;
pub use config::{ValidatorConfig, DEFAULT_DIAL_TIMEOUT, DEFAULT_HANDSHAKE_TIMEOUT};
pub use identity::{EphemeralIdentity, IdentityParseError, NodeId, NODE_ID_HEX_LEN, NODE_ID_SIZE};
pub use outcome::{reconcile, ValidationOutcome};
