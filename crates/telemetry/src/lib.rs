//! # tmp2p Telemetry
//!
//! Structured logging for the tmp2p tools.
//!
//! Logs go to **stderr** so that stdout carries only the validation
//! results and per-peer diagnostics.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tmp2p_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Application code here
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TMP2P_LOG_LEVEL` | `warn` | Filter directive (falls back to `RUST_LOG`) |
//! | `TMP2P_JSON_LOGS` | `false` | One JSON object per log line |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_LOG_LEVEL};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Log level directive did not parse
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter {
        /// Directive as configured
        directive: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(String),
}

/// Install the global tracing subscriber described by `config`.
///
/// Call once, before any other work.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}
