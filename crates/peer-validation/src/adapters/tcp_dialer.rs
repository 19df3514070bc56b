//! TCP dialer.

use async_trait::async_trait;
use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::ports::{DialError, Dialer};

// ============================================================================
// TcpDialer - Production Dialer
// ============================================================================

/// Dials plain TCP, resolving hostnames through the system resolver.
///
/// Carries no deadline of its own; the validator bounds every dial with
/// `ValidatorConfig::dial_timeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

impl TcpDialer {
    /// Create a dialer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dialer for TcpDialer {
    type Stream = TcpStream;

    async fn dial(&self, host: &str, port: u16) -> Result<TcpStream, DialError> {
        trace!(host, port, "dialing");

        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| DialError::Io {
                addr: display_addr(host, port),
                source,
            })?;
        if let Err(e) = stream.set_nodelay(true) {
            debug!(host, port, error = %e, "failed to set TCP_NODELAY");
        }
        Ok(stream)
    }
}

/// `host:port`, bracketing IPv6 literals.
pub(crate) fn display_addr(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
