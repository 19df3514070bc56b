//! # Peer Validator
//!
//! One task per token, all joined before returning:
//!
//! ```text
//! token ─► PeerAddress::parse ─► Dialer::dial ─► HandshakeUpgrader::upgrade
//!                                                      │
//!        ResultAggregator::try_add ◄─ reconcile ◄─ NodeId::from_public_key
//! ```
//!
//! Tasks are never cancelled. Once the aggregator is full the remaining
//! tasks still dial and handshake; their results are simply not kept.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, Instrument};

use crate::adapters::tcp_dialer::display_addr;
use crate::adapters::{ConsoleReporter, TcpDialer};
use crate::domain::{
    reconcile, EphemeralIdentity, NodeId, PeerAddress, ResultAggregator, ValidationOutcome,
    ValidatorConfig,
};
use crate::error::ValidationError;
use crate::ports::{Diagnostic, DialError, Dialer, ValidationReporter};
use crate::transport::HandshakeUpgrader;

/// Validates Tendermint peer addresses concurrently.
///
/// Cheap to clone; clones share the identity, dialer and reporter.
pub struct PeerValidator<D: Dialer> {
    inner: Arc<ValidatorInner<D>>,
}

struct ValidatorInner<D> {
    identity: EphemeralIdentity,
    config: ValidatorConfig,
    dialer: D,
    upgrader: HandshakeUpgrader,
    reporter: Arc<dyn ValidationReporter>,
}

impl PeerValidator<TcpDialer> {
    /// Production validator: TCP dialing, diagnostics on stdout.
    pub fn tcp(config: ValidatorConfig) -> Self {
        Self::new(config, TcpDialer::new(), Arc::new(ConsoleReporter::new()))
    }
}

impl<D: Dialer> PeerValidator<D> {
    /// Create a validator with a freshly generated node key.
    pub fn new(config: ValidatorConfig, dialer: D, reporter: Arc<dyn ValidationReporter>) -> Self {
        Self::with_identity(config, dialer, reporter, EphemeralIdentity::generate())
    }

    /// Create a validator that authenticates as `identity`.
    pub fn with_identity(
        config: ValidatorConfig,
        dialer: D,
        reporter: Arc<dyn ValidationReporter>,
        identity: EphemeralIdentity,
    ) -> Self {
        debug!(node_id = %identity.node_id(), "validator identity");
        Self {
            inner: Arc::new(ValidatorInner {
                identity,
                upgrader: HandshakeUpgrader::new(config.handshake_timeout),
                config,
                dialer,
                reporter,
            }),
        }
    }

    /// Node ID presented to peers.
    pub fn node_id(&self) -> NodeId {
        self.inner.identity.node_id()
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.inner.config
    }

    /// Validate a single token and report its diagnostic, if any.
    pub async fn validate_one(&self, token: &str) -> ValidationOutcome {
        let token = token.trim();
        let outcome = self.inner.validate(token).await;
        self.inner.report(token, &outcome);
        outcome
    }

    /// Validate every comma-separated token in `peer_list`.
    ///
    /// Returns at most `limit` accepted addresses (`0` = unbounded) in
    /// completion order. Per-token failures are reported, never returned.
    pub async fn validate_peers(&self, peer_list: &str, limit: usize) -> Vec<String> {
        let aggregator = Arc::new(ResultAggregator::new(limit));
        let mut tasks = JoinSet::new();

        for token in peer_list.split(',') {
            let token = token.trim().to_string();
            let inner = Arc::clone(&self.inner);
            let aggregator = Arc::clone(&aggregator);
            let span = info_span!("validate_peer", peer = %token);

            tasks.spawn(
                async move {
                    let outcome = inner.validate(&token).await;
                    inner.report(&token, &outcome);
                    if let Some(address) = outcome.accepted_address() {
                        if !aggregator.try_add(address.to_string()) {
                            debug!("limit reached, result discarded");
                        }
                    }
                }
                .instrument(span),
            );
        }

        let spawned = tasks.len();
        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                error!(error = %err, "validation task failed");
            }
        }

        let accepted = aggregator.snapshot();
        info!(spawned, accepted = accepted.len(), limit, "validation finished");
        accepted
    }
}

impl<D: Dialer> Clone for PeerValidator<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: Dialer> ValidatorInner<D> {
    async fn validate(&self, token: &str) -> ValidationOutcome {
        self.check(token)
            .await
            .unwrap_or_else(ValidationOutcome::Rejected)
    }

    async fn check(&self, token: &str) -> Result<ValidationOutcome, ValidationError> {
        let address = PeerAddress::parse(token)?;

        let stream = self.dial(&address).await?;
        let connection = self
            .upgrader
            .upgrade(stream, self.identity.keypair())
            .await?;

        let actual = NodeId::from_public_key(connection.remote_public_key());
        if let Err(err) = connection.close().await {
            debug!(error = %err, "close after handshake failed");
        }

        Ok(reconcile(&address, actual))
    }

    async fn dial(&self, address: &PeerAddress) -> Result<D::Stream, DialError> {
        let after = self.config.dial_timeout;
        match tokio::time::timeout(after, self.dialer.dial(address.host(), address.port())).await {
            Ok(result) => result,
            Err(_) => Err(DialError::Timeout {
                addr: display_addr(address.host(), address.port()),
                after,
            }),
        }
    }

    fn report(&self, token: &str, outcome: &ValidationOutcome) {
        match outcome {
            ValidationOutcome::Valid(_) => debug!("identity confirmed"),
            ValidationOutcome::MismatchCorrected {
                claimed: Some(claimed),
                actual,
                ..
            } => {
                debug!(%claimed, %actual, "identity mismatch");
                self.reporter.report(&Diagnostic::IdentityMismatch {
                    token: token.to_string(),
                    claimed: *claimed,
                    actual: *actual,
                });
            }
            ValidationOutcome::MismatchCorrected {
                claimed: None,
                actual,
                ..
            } => debug!(%actual, "identity learned"),
            ValidationOutcome::Rejected(err) => {
                debug!(error = %err, "peer rejected");
                self.reporter.report(&Diagnostic::rejected(token, err));
            }
        }
    }
}
