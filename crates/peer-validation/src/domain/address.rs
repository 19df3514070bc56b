//! # Peer Address Parsing
//!
//! Grammar:
//!
//! ```text
//! token := [ "tcp://" ] [ node_id "@" ] host ":" port
//! ```
//!
//! The identity segment is optional. When it is missing the address is
//! still dialable, but there is nothing to compare the handshake result
//! against, so `claimed_id()` is `None`. No DNS lookups happen here; host
//! names are resolved by the dialer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::identity::{IdentityParseError, NodeId};

/// The only scheme accepted in front of an address.
const TCP_SCHEME: &str = "tcp";

/// Reasons an address token is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddressFormatError {
    /// Token is empty after trimming
    #[error("empty address")]
    Empty,

    /// Scheme other than `tcp://`
    #[error("unsupported scheme {0:?}")]
    UnsupportedScheme(String),

    /// Identity segment is not a node ID
    #[error("invalid node ID {id:?}: {source}")]
    InvalidIdentity {
        /// The identity segment as written
        id: String,
        /// Why it failed to parse
        #[source]
        source: IdentityParseError,
    },

    /// No `:port` suffix
    #[error("missing port")]
    MissingPort,

    /// Port is not a decimal number in 1..=65535
    #[error("invalid port {0:?}")]
    InvalidPort(String),

    /// Host segment is empty
    #[error("empty host")]
    EmptyHost,

    /// Host contains characters no host name or IP literal can contain
    #[error("invalid host {0:?}")]
    InvalidHost(String),

    /// IPv6 literal without brackets
    #[error("too many colons in {0:?} (IPv6 hosts must be bracketed)")]
    TooManyColons(String),
}

/// A parsed peer address.
///
/// Immutable once parsed. `raw` keeps the trimmed input so a validated
/// address can be reported exactly as it was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddress {
    raw: String,
    claimed_id: Option<NodeId>,
    host: String,
    port: u16,
}

impl PeerAddress {
    /// Parse one address token.
    pub fn parse(token: &str) -> Result<Self, AddressFormatError> {
        let raw = token.trim();
        if raw.is_empty() {
            return Err(AddressFormatError::Empty);
        }

        let rest = match raw.split_once("://") {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case(TCP_SCHEME) => rest,
            Some((scheme, _)) => return Err(AddressFormatError::UnsupportedScheme(scheme.into())),
            None => raw,
        };

        let (claimed_id, endpoint) = match rest.split_once('@') {
            Some((id, endpoint)) => {
                let node_id = id
                    .parse::<NodeId>()
                    .map_err(|source| AddressFormatError::InvalidIdentity {
                        id: id.to_string(),
                        source,
                    })?;
                (Some(node_id), endpoint)
            }
            None => (None, rest),
        };

        let (host, port) = split_host_port(endpoint)?;

        Ok(Self {
            raw: raw.to_string(),
            claimed_id,
            host: host.to_string(),
            port,
        })
    }

    /// The trimmed token this address was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Identity written in the address, if any.
    pub fn claimed_id(&self) -> Option<NodeId> {
        self.claimed_id
    }

    /// Whether the token carried an identity segment.
    pub fn has_explicit_id(&self) -> bool {
        self.claimed_id.is_some()
    }

    /// Host name or IP literal (IPv6 without brackets).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, bracketing IPv6 literals.
    pub fn host_port(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// This endpoint rendered with the given identity: `id@host:port`.
    pub fn with_id(&self, id: NodeId) -> String {
        format!("{}@{}", id, self.host_port())
    }
}

impl FromStr for PeerAddress {
    type Err = AddressFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split `host:port` on the last colon, honouring `[v6]:port`.
fn split_host_port(endpoint: &str) -> Result<(&str, u16), AddressFormatError> {
    let (host, port) = if let Some(bracketed) = endpoint.strip_prefix('[') {
        let (host, after) = bracketed
            .split_once(']')
            .ok_or_else(|| AddressFormatError::InvalidHost(endpoint.to_string()))?;
        let port = after.strip_prefix(':').ok_or(AddressFormatError::MissingPort)?;
        (host, port)
    } else {
        let (host, port) = endpoint
            .rsplit_once(':')
            .ok_or(AddressFormatError::MissingPort)?;
        if host.contains(':') {
            return Err(AddressFormatError::TooManyColons(endpoint.to_string()));
        }
        (host, port)
    };

    if host.is_empty() {
        return Err(AddressFormatError::EmptyHost);
    }
    if host
        .chars()
        .any(|c| matches!(c, '@' | '/' | '[' | ']') || c.is_whitespace())
    {
        return Err(AddressFormatError::InvalidHost(host.to_string()));
    }

    Ok((host, parse_port(port)?))
}

fn parse_port(port: &str) -> Result<u16, AddressFormatError> {
    let invalid = || AddressFormatError::InvalidPort(port.to_string());
    // u16::from_str accepts a leading '+'
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(p) => Ok(p),
    }
}
