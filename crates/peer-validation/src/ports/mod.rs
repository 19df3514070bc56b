//! # Ports
//!
//! Interfaces the validator requires from its host: a way to open TCP
//! streams and a sink for per-peer diagnostics.

pub mod outbound;

pub use outbound::{Diagnostic, DialError, Dialer, ValidationReporter};
