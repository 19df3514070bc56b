//! # tmp2p Test Suite
//!
//! End-to-end validation runs against in-process mock peers.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── validation_flows.rs   # mixed lists, mismatch policy, diagnostics
//! │   ├── limits.rs             # limit law and no-cancellation
//! │   └── timeouts.rs           # dial and handshake deadlines
//! └── benches/
//!     └── validation_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tmp2p-tests
//! cargo bench -p tmp2p-tests
//! ```

pub mod integration;
