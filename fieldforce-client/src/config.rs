//! Configuration loading for the fieldforce client.
//!
//! All fields are required unless explicitly marked optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL for authenticated API calls, e.g. `https://host/api`.
    pub api_base_url: String,
    /// URL probed by the reachability monitor (the service root).
    pub health_url: String,
    /// Directory holding the persisted credential entries.
    pub credential_dir: PathBuf,
    /// Timeout budget for a single health probe.
    #[serde(default = "default_probe_ms")]
    pub probe_timeout_ms: u64,
    /// Interval between health probes. No backoff, no jitter.
    #[serde(default = "default_probe_ms")]
    pub probe_interval_ms: u64,
    /// Optional client-enforced timeout for authenticated calls.
    /// Absent by default: only the health probe is bounded.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_probe_ms() -> u64 {
    8_000
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or FIELDFORCE_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.health_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "health_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.credential_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "credential_dir",
                reason: "must not be empty".to_string(),
            });
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.probe_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0 when set".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("FIELDFORCE_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ClientConfig {
        ClientConfig {
            api_base_url: "http://localhost:3000/api".to_string(),
            health_url: "http://localhost:3000/".to_string(),
            credential_dir: "tmp/fieldforce".into(),
            probe_timeout_ms: 8_000,
            probe_interval_ms: 8_000,
            request_timeout_ms: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn empty_base_url_rejected() {
        let mut config = base_config();
        config.api_base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_probe_interval_rejected() {
        let mut config = base_config();
        config.probe_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn probe_fields_default_to_eight_seconds() {
        let config: ClientConfig = toml::from_str(
            r#"
            api_base_url = "http://localhost:3000/api"
            health_url = "http://localhost:3000/"
            credential_dir = "tmp/fieldforce"
            "#,
        )
        .unwrap();
        assert_eq!(config.probe_timeout_ms, 8_000);
        assert_eq!(config.probe_interval_ms, 8_000);
        assert_eq!(config.request_timeout_ms, None);
    }
}
