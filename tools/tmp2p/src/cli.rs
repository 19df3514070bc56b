//! Command line definition.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tmp2p_validation::ValidatorConfig;

/// tmp2p: Tendermint p2p address validator
#[derive(Parser, Debug)]
#[command(name = "tmp2p")]
#[command(about = "Validate Tendermint p2p peer addresses against the nodes behind them")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dial every peer, run the handshake and print the addresses that check out
    #[command(visible_alias = "v")]
    Validate(ValidateArgs),

    /// Print build information
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Comma-separated `[tcp://][id@]host:port` addresses
    #[arg(value_name = "PEERS")]
    pub peers: String,

    /// Keep at most this many valid peers (0 keeps all)
    #[arg(value_name = "LIMIT", default_value_t = 0)]
    pub limit: usize,

    /// TCP connect timeout per peer, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub dial_timeout_ms: u64,

    /// Handshake timeout per peer, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub handshake_timeout_ms: u64,
}

impl ValidateArgs {
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig::default()
            .with_dial_timeout(Duration::from_millis(self.dial_timeout_ms))
            .with_handshake_timeout(Duration::from_millis(self.handshake_timeout_ms))
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print as JSON instead of YAML
    #[arg(short, long)]
    pub json: bool,
}
