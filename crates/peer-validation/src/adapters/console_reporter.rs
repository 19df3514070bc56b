//! Console reporter.

use tracing::debug;

use crate::ports::{Diagnostic, ValidationReporter};

/// Writes each diagnostic as one line on stdout.
///
/// `println!` holds the stdout lock for the whole line, so lines from
/// concurrent tasks never interleave.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Create a reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ValidationReporter for ConsoleReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        debug!(token = diagnostic.token(), "peer diagnostic");
        println!("{diagnostic}");
    }
}
