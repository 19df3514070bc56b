//! # Identity Reconciliation
//!
//! Compares the identity a peer proved during the handshake with the one
//! written in its address and decides what (if anything) is accepted.
//!
//! | Claimed | Actual | Outcome |
//! |---------|--------|---------|
//! | `X` | `X` | `Valid(original token)` |
//! | `X` | `Y` | `MismatchCorrected(Y@host:port)`, warn |
//! | none | `Y` | `MismatchCorrected(Y@host:port)`, silent |

use super::address::PeerAddress;
use super::identity::NodeId;
use crate::error::ValidationError;

/// Result of validating one address.
#[derive(Debug)]
pub enum ValidationOutcome {
    /// Peer proved the identity in its address.
    Valid(String),
    /// Peer proved a different identity (or none was claimed).
    MismatchCorrected {
        /// `actual@host:port`
        address: String,
        /// Identity written in the address, if any.
        claimed: Option<NodeId>,
        /// Identity the peer proved.
        actual: NodeId,
    },
    /// Address could not be validated.
    Rejected(ValidationError),
}

impl ValidationOutcome {
    /// Address string to submit to the aggregator, if any.
    pub fn accepted_address(&self) -> Option<&str> {
        match self {
            Self::Valid(address) | Self::MismatchCorrected { address, .. } => Some(address),
            Self::Rejected(_) => None,
        }
    }

    /// Whether a mismatch warning must be reported.
    ///
    /// Only addresses that carried an identity can mismatch meaningfully.
    pub fn is_reportable_mismatch(&self) -> bool {
        matches!(self, Self::MismatchCorrected { claimed: Some(_), .. })
    }
}

/// Apply the reconciliation policy to a completed handshake.
pub fn reconcile(address: &PeerAddress, actual: NodeId) -> ValidationOutcome {
    match address.claimed_id() {
        Some(claimed) if claimed == actual => ValidationOutcome::Valid(address.raw().to_string()),
        claimed => ValidationOutcome::MismatchCorrected {
            address: address.with_id(actual),
            claimed,
            actual,
        },
    }
}
