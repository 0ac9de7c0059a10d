//! Configuration file loading.
//!
//! The CLI reads an optional TOML file:
//!
//! ```toml
//! [analytics]
//! risk_free_annual_rate = 0.02
//! periods_per_year = 252
//! rolling_window = 7
//! parallel = true
//! parallel_threshold = 64
//! ```
//!
//! An explicit `--config` path must exist. Without one, the file in the user
//! config directory is used when present, otherwise the defaults.

use fundscope_portfolio::AnalyticsConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Engine parameters.
    pub analytics: AnalyticsConfig,
}

impl CliConfig {
    /// Loads the configuration from `explicit`, or the default location.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(CliError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parses a configuration file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses configuration text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

/// Default configuration file location.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("fundscope").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = CliConfig::from_toml("[analytics]\nperiods_per_year = 12\n").unwrap();
        assert_eq!(config.analytics.periods_per_year, 12);
        assert_eq!(config.analytics.rolling_window, 7);
        assert!((config.analytics.risk_free_annual_rate - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_round_trip_defaults() {
        let text = CliConfig::default().to_toml().unwrap();
        assert!(text.contains("[analytics]"));
        assert_eq!(CliConfig::from_toml(&text).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = CliConfig::from_toml("[analytics]\nperiods_per_year = \"daily\"\n").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/fundscope.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
