//! Simulation configuration with TOML file support.

use dagledger_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use crate::SimError;

/// Configuration for a proposer simulation.
///
/// Can be loaded from a TOML file via [`SimConfig::from_toml_file`] or built
/// programmatically (e.g. for tests). Every field has a default, so an empty
/// file is valid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of concurrent proposers.
    #[serde(default = "default_proposers")]
    pub proposers: usize,

    /// Wall-clock length of a run, in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Shortest pause between two proposals of one proposer.
    #[serde(default = "default_min_pause_ms")]
    pub min_pause_ms: u64,

    /// Longest pause between two proposals of one proposer.
    #[serde(default = "default_max_pause_ms")]
    pub max_pause_ms: u64,

    /// Each proposal mints a value in `1..=max_mint_value` to its proposer.
    #[serde(default = "default_max_mint_value")]
    pub max_mint_value: u64,

    /// Base RNG seed; proposer `n` uses `seed + n`. Entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_proposers() -> usize {
    3
}

fn default_duration_ms() -> u64 {
    5_000
}

fn default_min_pause_ms() -> u64 {
    100
}

fn default_max_pause_ms() -> u64 {
    600
}

fn default_max_mint_value() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SimConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SimError> {
        toml::from_str(s).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SimError> {
        toml::to_string_pretty(self).map_err(|e| SimError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.proposers == 0 {
            return Err(SimError::Config("proposers must be at least 1".into()));
        }
        if self.min_pause_ms > self.max_pause_ms {
            return Err(SimError::Config(format!(
                "min_pause_ms ({}) exceeds max_pause_ms ({})",
                self.min_pause_ms, self.max_pause_ms
            )));
        }
        if self.max_mint_value == 0 {
            return Err(SimError::Config("max_mint_value must be at least 1".into()));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn pause_range_ms(&self) -> RangeInclusive<u64> {
        self.min_pause_ms..=self.max_pause_ms
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            proposers: default_proposers(),
            duration_ms: default_duration_ms(),
            min_pause_ms: default_min_pause_ms(),
            max_pause_ms: default_max_pause_ms(),
            max_mint_value: default_max_mint_value(),
            seed: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = SimConfig {
            seed: Some(42),
            ..Default::default()
        };
        let toml_str = config.to_toml_string().unwrap();
        let parsed = SimConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.proposers, config.proposers);
        assert_eq!(parsed.duration_ms, config.duration_ms);
        assert_eq!(parsed.seed, Some(42));
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = SimConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.proposers, 3);
        assert_eq!(config.duration_ms, 5_000);
        assert_eq!(config.pause_range_ms(), 100..=600);
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            proposers = 8
            duration_ms = 250
            log_format = "json"
        "#;
        let config = SimConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.proposers, 8);
        assert_eq!(config.duration(), Duration::from_millis(250));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_mint_value, 100); // default
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = SimConfig::from_toml_str("proposers = \"many\"").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "proposers = 2\nseed = 9").unwrap();
        let config = SimConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.proposers, 2);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SimConfig::from_toml_file("/nonexistent/dagledger.toml").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero = SimConfig {
            proposers: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let inverted = SimConfig {
            min_pause_ms: 10,
            max_pause_ms: 5,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let no_value = SimConfig {
            max_mint_value: 0,
            ..Default::default()
        };
        assert!(no_value.validate().is_err());
    }
}
