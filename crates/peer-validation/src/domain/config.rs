//! Validator configuration.

use std::time::Duration;

/// Default bound on TCP connection establishment.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(1);

/// Default bound on the secret connection handshake.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Per-task network deadlines.
///
/// Both are independent hard deadlines; nothing cancels a task early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Connect timeout for each dial
    pub dial_timeout: Duration,
    /// Deadline for the whole handshake exchange
    pub handshake_timeout: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}

impl ValidatorConfig {
    /// Override the dial timeout.
    #[must_use]
    pub fn with_dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    /// Override the handshake timeout.
    #[must_use]
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Short deadlines for loopback tests.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_testing() -> Self {
        Self {
            dial_timeout: Duration::from_millis(500),
            handshake_timeout: Duration::from_millis(750),
        }
    }
}
