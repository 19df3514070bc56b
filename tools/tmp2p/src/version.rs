//! `tmp2p version` output.

use anyhow::{Context, Result};
use serde::Serialize;

/// Build information.
#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub protocol: &'static str,
    pub target: String,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("TMP2P_COMMIT").unwrap_or("unknown"),
            protocol: tmp2p_validation::PROTOCOL,
            target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
        }
    }

    /// YAML by default, JSON on request.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            serde_json::to_string_pretty(self).context("serializing version as JSON")
        } else {
            serde_yaml::to_string(self).context("serializing version as YAML")
        }
    }
}
