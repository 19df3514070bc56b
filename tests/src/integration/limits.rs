//! # Limit Law
//!
//! The result set never exceeds the limit, and reaching the limit never
//! stops work already started.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tmp2p_validation::test_utils::MockPeer;

    use crate::integration::harness::*;

    const SETTLE: Duration = Duration::from_secs(3);

    #[tokio::test]
    async fn test_limit_one_still_completes_every_handshake() {
        let peers = honest_peers(5).await;
        let (validator, reporter) = validator();

        let accepted = validator
            .validate_peers(&join(peers.iter().map(MockPeer::address)), 1)
            .await;

        assert_eq!(accepted.len(), 1);
        assert!(peers.iter().any(|p| p.address() == accepted[0]));
        for peer in &peers {
            assert!(
                peer.wait_for_handshakes(1, SETTLE).await,
                "peer {} was never handshaken",
                peer.host_port()
            );
        }
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn test_result_never_exceeds_limit() {
        let peers = honest_peers(6).await;
        let list = join(peers.iter().map(MockPeer::host_port));

        for limit in 1..=6 {
            let (validator, _) = validator();
            let accepted = validator.validate_peers(&list, limit).await;
            assert_eq!(accepted.len(), limit);
        }
    }

    #[tokio::test]
    async fn test_zero_limit_keeps_every_success() {
        let peers = honest_peers(6).await;
        let (validator, _) = validator();

        let accepted = validator
            .validate_peers(&join(peers.iter().map(MockPeer::address)), 0)
            .await;

        assert_eq!(accepted.len(), peers.len());
    }

    #[tokio::test]
    async fn test_limit_above_successes_keeps_all() {
        let peers = honest_peers(2).await;
        let (validator, reporter) = validator();
        let mut tokens: Vec<String> = peers.iter().map(MockPeer::address).collect();
        tokens.push("bogus".to_string());

        let accepted = validator.validate_peers(&join(tokens), 10).await;

        assert_eq!(accepted.len(), 2);
        assert_eq!(reporter.count(is_invalid_address), 1);
    }

    #[tokio::test]
    async fn test_failures_do_not_consume_limit() {
        let good = MockPeer::honest().await.unwrap();
        let silent = MockPeer::silent().await.unwrap();
        let (validator, _) = validator();

        let list = format!("{},{}", silent.address(), good.address());
        let accepted = validator.validate_peers(&list, 1).await;

        assert_eq!(accepted, vec![good.address()]);
    }
}
