//! # Adapters
//!
//! Production implementations of the outbound ports.
//!
//! - `TcpDialer` - tokio TCP connect with a deadline
//! - `ConsoleReporter` - diagnostics as lines on stdout

pub mod console_reporter;
pub mod tcp_dialer;

pub use console_reporter::ConsoleReporter;
pub use tcp_dialer::TcpDialer;
