//! # Service Layer
//!
//! The orchestrator that fans validation out over a peer list.

mod validator;


pub use validator::PeerValidator;
