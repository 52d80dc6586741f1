//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! The global config file is searched in order:
//! 1. `$FLEETWORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/fleetwork/config.toml`
//! 3. `~/.fleetwork/config.toml` (canonical location)
//!
//! A missing file yields the defaults; a present file must parse and
//! validate. CLI flags override config values (precedence: defaults →
//! config file → flags; flags are not handled here).
//!
//! # Example
//!
//! ```toml
//! company = "TransCo"
//! data_dir = "/var/lib/fleetwork"
//! action_log = "/var/log/fleetwork/actions.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Global configuration (user scope).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default company name for new fleets
    pub company: Option<String>,

    /// Directory holding fleet snapshots (default: `data/`)
    pub data_dir: Option<PathBuf>,

    /// Action-log file (default: `logs/actions.log`)
    pub action_log: Option<PathBuf>,
}

impl GlobalConfig {
    /// Load the global config from the default locations.
    ///
    /// Returns defaults when no config file exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError`/`ParseError` for an unreadable or
    /// malformed file, `ConfigError::InvalidValue` for bad values.
    pub fn load() -> Result<Self, ConfigError> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(company) = &self.company {
            if company.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "company cannot be empty".to_string(),
                ));
            }
        }
        if let Some(data_dir) = &self.data_dir {
            if data_dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "data_dir cannot be empty".to_string(),
                ));
            }
        }
        if let Some(action_log) = &self.action_log {
            if action_log.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "action_log cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Find the first existing config file in the search order.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("FLEETWORK_CONFIG") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("fleetwork").join("config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let path = home.join(".fleetwork").join("config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: GlobalConfig = toml::from_str(
            r#"
            company = "TransCo"
            data_dir = "/var/lib/fleetwork"
            action_log = "/var/log/fleetwork/actions.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.company.as_deref(), Some("TransCo"));
        assert_eq!(
            config.data_dir.as_deref(),
            Some(Path::new("/var/lib/fleetwork"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_config_is_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<GlobalConfig, _> = toml::from_str("fleet_color = \"red\"");
        assert!(result.is_err());
    }

    #[test]
    fn blank_company_fails_validation() {
        let config = GlobalConfig {
            company: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn load_from_missing_file_is_read_error() {
        let result = GlobalConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
