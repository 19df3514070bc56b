//! # Result Aggregator
//!
//! Limit-capped collector of accepted address strings.
//!
//! The lock is held only for the length check and the push; callers never
//! hold it across network I/O. Insertion order is completion order.

use parking_lot::Mutex;

/// Bounded, thread-safe list of accepted addresses.
///
/// A `limit` of zero means unbounded.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    limit: usize,
    accepted: Mutex<Vec<String>>,
}

impl ResultAggregator {
    /// Create an empty aggregator.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            accepted: Mutex::new(Vec::new()),
        }
    }

    /// Append `address` unless the limit has been reached.
    ///
    /// Returns `false` (and leaves the list untouched) when full.
    pub fn try_add(&self, address: String) -> bool {
        let mut accepted = self.accepted.lock();
        if self.limit > 0 && accepted.len() >= self.limit {
            return false;
        }
        accepted.push(address);
        true
    }

    /// Copy of the accepted addresses.
    ///
    /// Only meaningful once every writer has finished.
    pub fn snapshot(&self) -> Vec<String> {
        self.accepted.lock().clone()
    }
}
