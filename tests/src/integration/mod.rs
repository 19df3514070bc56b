//! # Integration Tests
//!
//! Each module drives `PeerValidator` over real loopback TCP.

pub mod limits;
pub mod timeouts;
pub mod validation_flows;

#[cfg(test)]
pub(crate) mod harness {
    use std::sync::Arc;

    use tmp2p_validation::test_utils::{MockPeer, RecordingReporter};
    use tmp2p_validation::{Diagnostic, PeerValidator, TcpDialer, ValidatorConfig};

    /// Validator over TCP with test deadlines and a recording reporter.
    pub fn validator() -> (PeerValidator<TcpDialer>, Arc<RecordingReporter>) {
        validator_with(ValidatorConfig::for_testing())
    }

    pub fn validator_with(
        config: ValidatorConfig,
    ) -> (PeerValidator<TcpDialer>, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::new());
        let validator = PeerValidator::new(config, TcpDialer::new(), reporter.clone());
        (validator, reporter)
    }

    pub async fn honest_peers(count: usize) -> Vec<MockPeer> {
        let mut peers = Vec::with_capacity(count);
        for _ in 0..count {
            peers.push(MockPeer::honest().await.unwrap());
        }
        peers
    }

    pub fn join(tokens: impl IntoIterator<Item = String>) -> String {
        tokens.into_iter().collect::<Vec<_>>().join(",")
    }

    pub fn is_dial_failure(d: &Diagnostic) -> bool {
        matches!(d, Diagnostic::DialFailed { .. })
    }

    pub fn is_handshake_failure(d: &Diagnostic) -> bool {
        matches!(d, Diagnostic::HandshakeFailed { .. })
    }

    pub fn is_invalid_address(d: &Diagnostic) -> bool {
        matches!(d, Diagnostic::InvalidAddress { .. })
    }

    pub fn is_mismatch(d: &Diagnostic) -> bool {
        matches!(d, Diagnostic::IdentityMismatch { .. })
    }
}
