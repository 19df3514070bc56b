//! # tmp2p
//!
//! Command line front end for the Tendermint p2p address validator.
//!
//! ```text
//! tmp2p validate <PEERS> [LIMIT]     (alias: v)
//! tmp2p version [--json]
//! ```
//!
//! Validation results and per-peer diagnostics go to stdout; logs go to
//! stderr (see `TMP2P_LOG_LEVEL`).

mod cli;
mod version;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cli::{Cli, Command, ValidateArgs};
use tmp2p_telemetry::{init_telemetry, TelemetryConfig};
use tmp2p_validation::PeerValidator;
use version::VersionInfo;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::from_env().with_verbosity(cli.verbose);
    init_telemetry(&telemetry).context("Failed to initialize logging")?;

    match cli.command {
        Command::Validate(args) => validate(args).await,
        Command::Version(args) => {
            print!("{}", ensure_newline(VersionInfo::current().render(args.json)?));
            Ok(())
        }
    }
}

async fn validate(args: ValidateArgs) -> Result<()> {
    let validator = PeerValidator::tcp(args.validator_config());
    info!(node_id = %validator.node_id(), limit = args.limit, "validating peers");

    let accepted = validator.validate_peers(&args.peers, args.limit).await;
    println!("{}", summary_line(&accepted));
    Ok(())
}

fn summary_line(accepted: &[String]) -> String {
    if accepted.is_empty() {
        "No valid peers".to_string()
    } else {
        format!("Valid peers: {}", accepted.join(","))
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
