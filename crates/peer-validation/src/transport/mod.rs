//! # Transport
//!
//! The Tendermint secret connection and the deadline-bounded upgrade that
//! turns a dialed stream into an authenticated session.

pub mod secret_connection;
pub mod upgrade;

pub use secret_connection::{HandshakeError, SecretConnection, SecretConnectionError};
pub use upgrade::HandshakeUpgrader;
