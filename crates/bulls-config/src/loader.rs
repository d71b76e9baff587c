//! Configuration loading with environment variable overrides.

use crate::schema::Config;
use bulls_common::BullsError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "BULLS_CONFIG_PATH";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "bulls.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] BullsError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for BullsError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config_with_source("Failed to load configuration", other),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        info!(path = %path.display(), season = %config.team.season, "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration text without overrides or validation.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the environment, a file, or defaults.
    ///
    /// Order: `BULLS_CONFIG_PATH`, then `bulls.toml` in the working
    /// directory, then built-in defaults. Overrides apply in every case.
    pub fn load() -> bulls_common::Result<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_config(DEFAULT_CONFIG_FILE)?
        } else {
            debug!("No configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate()?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> bulls_common::Result<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `BULLS_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup` instead of the process environment.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(season) = lookup("BULLS_SEASON") {
            config.team.season = season;
        }

        if let Some(id) = lookup("BULLS_TEAM_ID") {
            config.team.id = parse_var("BULLS_TEAM_ID", &id)?;
        }

        if let Some(abbr) = lookup("BULLS_TEAM_ABBR") {
            config.team.abbreviation = abbr.to_uppercase();
        }

        if let Some(delay) = lookup("BULLS_API_DELAY_MS") {
            config.api.request_delay_ms = parse_var("BULLS_API_DELAY_MS", &delay)?;
        }

        if let Some(timeout) = lookup("BULLS_API_TIMEOUT") {
            config.api.timeout_seconds = parse_var("BULLS_API_TIMEOUT", &timeout)?;
        }

        if let Some(dir) = lookup("BULLS_OUTPUT_DIR") {
            config.output.output_dir = PathBuf::from(dir);
        }

        if let Some(level) = lookup("BULLS_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [team]
            season = "2024-25"

            [analysis]
            trend_threshold = 0.15
            "#,
        )
        .unwrap();

        assert_eq!(config.team.season, "2024-25");
        assert_eq!(config.team.abbreviation, "CHI");
        assert!((config.analysis.trend_threshold - 0.15).abs() < f64::EPSILON);
        assert_eq!(config.analysis.trend_window, 5);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [api]
            request_delay_ms = 0

            [graphs]
            width = 800
            height = 600
            "#
        )
        .unwrap();

        let config = ConfigLoader::load_config(file.path()).unwrap();
        assert_eq!(config.api.request_delay_ms, 0);
        assert_eq!((config.graphs.width, config.graphs.height), (800, 600));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConfigLoader::load_config("/nonexistent/bulls.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[team]\nseason = \"next year\"").unwrap();

        let err = ConfigLoader::load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(
            &mut config,
            lookup(&[
                ("BULLS_SEASON", "2024-25"),
                ("BULLS_TEAM_ID", "1610612752"),
                ("BULLS_TEAM_ABBR", "nyk"),
                ("BULLS_API_DELAY_MS", "250"),
                ("BULLS_OUTPUT_DIR", "/tmp/charts"),
            ]),
        )
        .unwrap();

        assert_eq!(config.team.season, "2024-25");
        assert_eq!(config.team.id, 1_610_612_752);
        assert_eq!(config.team.abbreviation, "NYK");
        assert_eq!(config.api.request_delay_ms, 250);
        assert_eq!(config.output.output_dir, PathBuf::from("/tmp/charts"));
    }

    #[test]
    fn test_env_parse_error_names_variable() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides_from(
            &mut config,
            lookup(&[("BULLS_API_DELAY_MS", "soon")]),
        )
        .unwrap_err();

        assert!(err.to_string().contains("BULLS_API_DELAY_MS"));
        let converted: BullsError = err.into();
        assert_eq!(converted.category(), "config");
    }
}
