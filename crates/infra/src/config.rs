//! Configuration loading and representation.
//!
//! Layers, later wins:
//! 1. built-in defaults
//! 2. an optional JSON settings file named by `STRATUS_CONFIG`
//! 3. individual `STRATUS_*` environment variables
//!
//! The loaded config is validated once, before the app is built.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stratus_weather::MAX_SUMMARY_LEN;

pub const CONFIG_PATH_VAR: &str = "STRATUS_CONFIG";
pub const BIND_ADDR_VAR: &str = "STRATUS_BIND_ADDR";
pub const SEED_SAMPLE_DATA_VAR: &str = "STRATUS_SEED_SAMPLE_DATA";
pub const USE_EXPERIMENTAL_REPOSITORY_VAR: &str = "STRATUS_FEATURE_USE_EXPERIMENTAL_REPOSITORY";
pub const ALLOW_GET_FORECAST_BY_DATE_VAR: &str = "STRATUS_FEATURE_ALLOW_GET_FORECAST_BY_DATE";
pub const EXPERIMENTAL_SUMMARY_SUFFIX_VAR: &str = "STRATUS_EXPERIMENTAL_SUMMARY_SUFFIX";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{var} must be a boolean, but found '{value}'")]
    InvalidBool { var: &'static str, value: String },

    #[error("{var} must be a socket address, but found '{value}'")]
    InvalidAddr { var: &'static str, value: String },

    #[error("invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Runtime switches. Both default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Route storage calls to the experimental store.
    pub use_experimental_repository: bool,
    /// Expose lookup by location and date.
    pub allow_get_forecast_by_date: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalRepositorySettings {
    /// Appended to every summary the experimental store writes.
    pub summary_suffix: String,
}

impl Default for ExperimentalRepositorySettings {
    fn default() -> Self {
        Self {
            summary_suffix: " (experimental)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub seed_sample_data: bool,
    pub features: FeatureFlags,
    pub experimental_repository: ExperimentalRepositorySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_sample_data: true,
            features: FeatureFlags::default(),
            experimental_repository: ExperimentalRepositorySettings::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON settings file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(BIND_ADDR_VAR) {
            self.bind_addr = value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                var: BIND_ADDR_VAR,
                value,
            })?;
        }
        if let Some(value) = lookup(SEED_SAMPLE_DATA_VAR) {
            self.seed_sample_data = parse_bool(SEED_SAMPLE_DATA_VAR, value)?;
        }
        if let Some(value) = lookup(USE_EXPERIMENTAL_REPOSITORY_VAR) {
            self.features.use_experimental_repository =
                parse_bool(USE_EXPERIMENTAL_REPOSITORY_VAR, value)?;
        }
        if let Some(value) = lookup(ALLOW_GET_FORECAST_BY_DATE_VAR) {
            self.features.allow_get_forecast_by_date =
                parse_bool(ALLOW_GET_FORECAST_BY_DATE_VAR, value)?;
        }
        if let Some(value) = lookup(EXPERIMENTAL_SUMMARY_SUFFIX_VAR) {
            self.experimental_repository.summary_suffix = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.features.use_experimental_repository {
            let len = self.experimental_repository.summary_suffix.chars().count();
            if !(1..=MAX_SUMMARY_LEN).contains(&len) {
                return Err(ConfigError::Invalid {
                    field: "experimental_repository.summary_suffix",
                    message: format!("must be 1 to {MAX_SUMMARY_LEN} characters, but found {len}"),
                });
            }
        }
        Ok(())
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!config.features.use_experimental_repository);
        assert!(!config.features.allow_get_forecast_by_date);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn env_overrides_defaults() {
        let config = load(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (SEED_SAMPLE_DATA_VAR, "false"),
            (USE_EXPERIMENTAL_REPOSITORY_VAR, "TRUE"),
            (ALLOW_GET_FORECAST_BY_DATE_VAR, "1"),
            (EXPERIMENTAL_SUMMARY_SUFFIX_VAR, " [v2]"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert!(!config.seed_sample_data);
        assert!(config.features.use_experimental_repository);
        assert!(config.features.allow_get_forecast_by_date);
        assert_eq!(config.experimental_repository.summary_suffix, " [v2]");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            load(&[(ALLOW_GET_FORECAST_BY_DATE_VAR, "maybe")]),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert!(matches!(
            load(&[(BIND_ADDR_VAR, "localhost")]),
            Err(ConfigError::InvalidAddr { .. })
        ));
    }

    #[test]
    fn suffix_is_only_checked_when_experimental_store_is_on() {
        assert!(load(&[(EXPERIMENTAL_SUMMARY_SUFFIX_VAR, "")]).is_ok());

        let err = load(&[
            (USE_EXPERIMENTAL_REPOSITORY_VAR, "true"),
            (EXPERIMENTAL_SUMMARY_SUFFIX_VAR, ""),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let too_long = "x".repeat(MAX_SUMMARY_LEN + 1);
        assert!(load(&[
            (USE_EXPERIMENTAL_REPOSITORY_VAR, "true"),
            (EXPERIMENTAL_SUMMARY_SUFFIX_VAR, too_long.as_str()),
        ])
        .is_err());
    }

    #[test]
    fn file_layer_sits_under_env() {
        let path = std::env::temp_dir().join(format!("stratus-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "seed_sample_data": false, "features": { "allow_get_forecast_by_date": true } }"#,
        )
        .unwrap();
        let path_str = path.to_string_lossy().to_string();

        let from_file = load(&[(CONFIG_PATH_VAR, path_str.as_str())]).unwrap();
        assert!(!from_file.seed_sample_data);
        assert!(from_file.features.allow_get_forecast_by_date);
        assert_eq!(from_file.bind_addr, AppConfig::default().bind_addr);

        let overridden = load(&[
            (CONFIG_PATH_VAR, path_str.as_str()),
            (ALLOW_GET_FORECAST_BY_DATE_VAR, "off"),
        ])
        .unwrap();
        assert!(!overridden.features.allow_get_forecast_by_date);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            load(&[(CONFIG_PATH_VAR, "/definitely/not/here.json")]),
            Err(ConfigError::Read { .. })
        ));
    }
}
