//! # Deadlines
//!
//! Dial and handshake timeouts are per task and independent.

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use tmp2p_validation::test_utils::MockPeer;
    use tmp2p_validation::{ValidationError, ValidationOutcome, ValidatorConfig};

    use crate::integration::harness::*;

    #[tokio::test]
    async fn test_silent_peer_fails_after_handshake_deadline() {
        let peer = MockPeer::silent().await.unwrap();
        let deadline = Duration::from_millis(200);
        let (validator, reporter) =
            validator_with(ValidatorConfig::for_testing().with_handshake_timeout(deadline));

        let started = Instant::now();
        let outcome = validator.validate_one(&peer.address()).await;
        let elapsed = started.elapsed();

        assert!(matches!(
            outcome,
            ValidationOutcome::Rejected(ValidationError::HandshakeTimeout(d)) if d == deadline
        ));
        assert!(elapsed >= deadline);
        assert!(elapsed < deadline * 10);
        assert_eq!(reporter.count(is_handshake_failure), 1);
    }

    #[tokio::test]
    async fn test_generous_deadline_lets_honest_peer_through() {
        let peer = MockPeer::honest().await.unwrap();
        let (validator, reporter) = validator_with(
            ValidatorConfig::default().with_handshake_timeout(Duration::from_secs(5)),
        );

        let outcome = validator.validate_one(&peer.address()).await;

        assert!(matches!(outcome, ValidationOutcome::Valid(_)));
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn test_slow_peers_run_concurrently() {
        let silent = [
            MockPeer::silent().await.unwrap(),
            MockPeer::silent().await.unwrap(),
            MockPeer::silent().await.unwrap(),
            MockPeer::silent().await.unwrap(),
        ];
        let deadline = Duration::from_millis(300);
        let (validator, reporter) =
            validator_with(ValidatorConfig::for_testing().with_handshake_timeout(deadline));

        let started = Instant::now();
        let accepted = validator
            .validate_peers(&join(silent.iter().map(MockPeer::address)), 0)
            .await;
        let elapsed = started.elapsed();

        assert!(accepted.is_empty());
        assert_eq!(reporter.count(is_handshake_failure), 4);
        // Sequential execution would take at least 4 deadlines.
        assert!(elapsed < deadline * 3);
    }

    #[tokio::test]
    async fn test_slow_peer_does_not_hold_back_fast_one() {
        let silent = MockPeer::silent().await.unwrap();
        let honest = MockPeer::honest().await.unwrap();
        let (validator, reporter) = validator();

        let list = format!("{},{}", silent.address(), honest.address());
        let accepted = validator.validate_peers(&list, 0).await;

        assert_eq!(accepted, vec![honest.address()]);
        assert_eq!(reporter.count(is_handshake_failure), 1);
    }
}
