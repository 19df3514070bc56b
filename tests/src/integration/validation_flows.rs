//! # Validation Flows
//!
//! Mixed peer lists through the full dial, handshake and reconcile path.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tmp2p_validation::test_utils::{unreachable_address, MockPeer, PeerBehavior};
    use tmp2p_validation::{Diagnostic, NodeId, ValidationOutcome};

    use crate::integration::harness::*;

    #[tokio::test]
    async fn test_known_and_unknown_identity_peers() {
        // "ID1@host1,host2" where host1 proves ID1 and host2 had no ID.
        let first = MockPeer::honest().await.unwrap();
        let second = MockPeer::honest().await.unwrap();
        let (validator, reporter) = validator();

        let list = format!("{},{}", first.address(), second.host_port());
        let accepted: HashSet<String> = validator.validate_peers(&list, 0).await.into_iter().collect();

        let expected: HashSet<String> = [
            first.address(),
            format!("{}@{}", second.node_id(), second.host_port()),
        ]
        .into_iter()
        .collect();
        assert_eq!(accepted, expected);
        assert_eq!(reporter.count(is_mismatch), 0);
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn test_single_unreachable_address() {
        let (validator, reporter) = validator();

        let accepted = validator
            .validate_peers(&unreachable_address().unwrap(), 5)
            .await;

        assert!(accepted.is_empty());
        assert_eq!(reporter.len(), 1);
        assert_eq!(reporter.count(is_dial_failure), 1);
        assert_eq!(reporter.count(is_handshake_failure), 0);
    }

    #[tokio::test]
    async fn test_wrong_identity_is_corrected_with_one_warning() {
        let peer = MockPeer::honest().await.unwrap();
        let (validator, reporter) = validator();
        let wrong = NodeId::new([0x11; 20]);

        let accepted = validator
            .validate_peers(&peer.address_claiming(wrong), 0)
            .await;

        assert_eq!(accepted, vec![peer.address()]);
        assert_eq!(reporter.len(), 1);
        assert_eq!(
            reporter.lines(),
            vec![format!(
                "Identity mismatch: dialed {wrong}, connected to {}: {}",
                peer.node_id(),
                peer.address_claiming(wrong)
            )]
        );
    }

    #[tokio::test]
    async fn test_one_diagnostic_per_rejected_address() {
        let good = MockPeer::honest().await.unwrap();
        let silent = MockPeer::silent().await.unwrap();
        let small_order = MockPeer::spawn(PeerBehavior::SmallOrderKey).await.unwrap();
        let garbage = MockPeer::spawn(PeerBehavior::Garbage).await.unwrap();
        let (validator, reporter) = validator();

        let tokens = vec![
            good.address(),
            silent.address(),
            small_order.host_port(),
            garbage.host_port(),
            unreachable_address().unwrap(),
            "zz@1.2.3.4:26656".to_string(),
            "1.2.3.4".to_string(),
            "[::1:26656".to_string(),
        ];
        let accepted = validator.validate_peers(&join(tokens.clone()), 0).await;

        assert_eq!(accepted, vec![good.address()]);
        assert_eq!(reporter.len(), tokens.len() - 1);
        assert_eq!(reporter.count(is_handshake_failure), 3);
        assert_eq!(reporter.count(is_dial_failure), 1);
        assert_eq!(reporter.count(is_invalid_address), 3);

        let reported: HashSet<String> = reporter
            .diagnostics()
            .iter()
            .map(|d| d.token().to_string())
            .collect();
        let rejected: HashSet<String> = tokens[1..].iter().cloned().collect();
        assert_eq!(reported, rejected);
    }

    #[tokio::test]
    async fn test_diagnostic_lines_name_the_token() {
        let (validator, reporter) = validator();

        validator.validate_peers("not-a-peer", 0).await;

        let lines = reporter.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Invalid peer address: not-a-peer: "));
    }

    #[tokio::test]
    async fn test_ipv6_loopback_canonical_form() {
        // Skipped silently on hosts without IPv6 loopback.
        let Ok(listener) = tokio::net::TcpListener::bind("[::1]:0").await else {
            return;
        };
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let (validator, reporter) = validator();

        let token = format!("[::1]:{port}");
        let outcome = validator.validate_one(&token).await;

        assert!(matches!(outcome, ValidationOutcome::Rejected(_)));
        assert!(matches!(
            reporter.diagnostics().as_slice(),
            [Diagnostic::DialFailed { error, .. }] if error.contains(&format!("[::1]:{port}"))
        ));
    }

    #[tokio::test]
    async fn test_empty_list_reports_one_invalid_address() {
        let (validator, reporter) = validator();

        let accepted = validator.validate_peers("", 0).await;

        assert!(accepted.is_empty());
        assert_eq!(reporter.count(is_invalid_address), 1);
    }

    #[tokio::test]
    async fn test_separate_runs_are_outcome_equivalent() {
        let first = MockPeer::honest().await.unwrap();
        let second = MockPeer::honest().await.unwrap();
        let list = join([
            first.address(),
            second.host_port(),
            unreachable_address().unwrap(),
        ]);

        let (run_a, reporter_a) = validator();
        let (run_b, reporter_b) = validator();
        assert_ne!(run_a.node_id(), run_b.node_id());

        let mut accepted_a = run_a.validate_peers(&list, 0).await;
        let mut accepted_b = run_b.validate_peers(&list, 0).await;
        accepted_a.sort();
        accepted_b.sort();

        assert_eq!(accepted_a.len(), 2);
        assert_eq!(accepted_a, accepted_b);
        assert_eq!(reporter_a.len(), reporter_b.len());
        assert_eq!(reporter_a.count(is_dial_failure), 1);
        assert_eq!(reporter_b.count(is_dial_failure), 1);
    }
}
