// src/core/config_loader.rs

//! TOML configuration of the interceptor.

use crate::constants::{DEFAULT_LOG_TARGET, MAX_MULTIPLES_LOG, MAX_TIMEOUT};
use crate::core::formatter::SignatureFormatter;
use log::Level;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Failures while loading or writing an [`InterceptorConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Could not read configuration file '{path}': {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The content is not valid TOML for this configuration.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be written as TOML.
    #[error("Failed to serialize configuration to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// `target` was empty or blank.
    #[error("The log target must not be empty.")]
    EmptyTarget,
}

/// Tunables of the timing interceptor and signature formatter.
///
/// Every key is optional in TOML; missing keys keep their defaults:
///
/// ```toml
/// threshold_ms = 5000
/// element_cap = 10
/// target = "callprobe"
/// slow_call_level = "warn"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Calls running strictly longer than this are reported.
    #[serde(rename = "threshold_ms", with = "duration_millis")]
    pub threshold: Duration,
    /// Maximum number of elements rendered per container.
    pub element_cap: usize,
    /// Log target every line is written under.
    pub target: String,
    /// Level of the slow-call report.
    pub slow_call_level: Level,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            threshold: MAX_TIMEOUT,
            element_cap: MAX_MULTIPLES_LOG,
            target: DEFAULT_LOG_TARGET.to_string(),
            slow_call_level: Level::Warn,
        }
    }
}

impl InterceptorConfig {
    /// Parses a TOML document, rejecting an empty target.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: InterceptorConfig = toml::from_str(content)?;
        if config.target.trim().is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        Ok(config)
    }

    /// Pretty TOML rendering of every key.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Signature formatter honouring `element_cap`.
    pub fn formatter(&self) -> SignatureFormatter {
        SignatureFormatter::new(self.element_cap)
    }
}

/// Reads an [`InterceptorConfig`] from a TOML file.
pub fn load_config(path: &Path) -> Result<InterceptorConfig, ConfigError> {
    log::debug!("Loading interceptor config from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    InterceptorConfig::from_toml_str(&content)
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_fixed_constants() {
        let config = InterceptorConfig::default();
        assert_eq!(config.threshold, Duration::from_secs(5));
        assert_eq!(config.element_cap, 10);
        assert_eq!(config.target, "callprobe");
        assert_eq!(config.slow_call_level, Level::Warn);
        assert_eq!(config.formatter().element_cap(), 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = InterceptorConfig::from_toml_str("element_cap = 3\nslow_call_level = \"debug\"").unwrap();
        assert_eq!(config.element_cap, 3);
        assert_eq!(config.slow_call_level, Level::Debug);
        assert_eq!(config.threshold, MAX_TIMEOUT);
        assert_eq!(config.target, DEFAULT_LOG_TARGET);
    }

    #[test]
    fn test_empty_target_is_rejected() {
        let result = InterceptorConfig::from_toml_str("target = \"  \"");
        assert!(matches!(result, Err(ConfigError::EmptyTarget)));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = InterceptorConfig::from_toml_str("threshold_ms = \"soon\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_round_trip_through_file() {
        let original = InterceptorConfig {
            threshold: Duration::from_millis(250),
            element_cap: 4,
            target: "profiling".to_string(),
            slow_call_level: Level::Info,
        };
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(original.to_toml_string().unwrap().as_bytes())
            .unwrap();
        temp_file.flush().unwrap();

        let loaded = load_config(temp_file.path()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let result = load_config(Path::new("non_existent_callprobe_config.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
