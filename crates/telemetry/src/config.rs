//! Telemetry configuration from environment variables.

use std::env;

/// Filter used when neither `TMP2P_LOG_LEVEL` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration for the log subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Filter directive (trace, debug, info, warn, error, or per-target)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to colour human-readable output
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TMP2P_LOG_LEVEL` or `RUST_LOG`: Filter directive (default: warn)
    /// - `TMP2P_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `NO_COLOR`: Disable ANSI colours when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: lookup("TMP2P_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),

            json_logs: lookup("TMP2P_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),

            ansi: lookup("NO_COLOR").is_none(),
        }
    }

    /// Override the filter directive.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Raise verbosity by `steps` levels above the configured default.
    ///
    /// Only applies when the directive is a bare level name.
    #[must_use]
    pub fn with_verbosity(mut self, steps: u8) -> Self {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        if steps == 0 {
            return self;
        }
        if let Some(current) = LEVELS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(self.log_level.trim()))
        {
            let raised = (current + usize::from(steps)).min(LEVELS.len() - 1);
            self.log_level = LEVELS[raised].to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config.log_level, "warn");
        assert!(!config.json_logs);
        assert!(config.ansi);
    }

    #[test]
    fn test_own_variable_wins_over_rust_log() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("TMP2P_LOG_LEVEL", "debug"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rust_log_fallback() {
        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "tmp2p_validation=trace")]));
        assert_eq!(config.log_level, "tmp2p_validation=trace");
    }

    #[test]
    fn test_json_and_color_flags() {
        let config =
            TelemetryConfig::from_lookup(lookup(&[("TMP2P_JSON_LOGS", "TRUE"), ("NO_COLOR", "")]));
        assert!(config.json_logs);
        assert!(!config.ansi);
    }

    #[test]
    fn test_verbosity_steps() {
        let config = TelemetryConfig::default();
        assert_eq!(config.clone().with_verbosity(1).log_level, "info");
        assert_eq!(config.clone().with_verbosity(9).log_level, "trace");
        assert_eq!(config.with_verbosity(0).log_level, "warn");

        let custom = TelemetryConfig::default().with_log_level("tmp2p=debug");
        assert_eq!(custom.with_verbosity(2).log_level, "tmp2p=debug");
    }
}
