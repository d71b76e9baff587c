//! Error types and utilities for Bulls Analytics

use thiserror::Error;

/// Result type alias for Bulls Analytics operations
pub type Result<T> = std::result::Result<T, BullsError>;

/// Main error type for Bulls Analytics operations
#[derive(Error, Debug)]
pub enum BullsError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (HTTP requests, etc.)
    #[error("Network error: {message}")]
    Network {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stats API answered with an error status or an unusable payload
    #[error("Stats API error: {message}")]
    Api {
        /// Human readable description
        message: String,
        /// HTTP status code, when one was received
        status_code: Option<u16>,
    },

    /// A lookup that must produce a value found nothing
    #[error("Not found: {message}")]
    NotFound {
        /// Human readable description
        message: String,
    },

    /// A response could be read but not interpreted
    #[error("Parse error: {message}")]
    Parse {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Image decoding or encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
        /// Offending field, if known
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Human readable description
        message: String,
        /// Underlying cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BullsError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new stats API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api {
            message: msg.into(),
            status_code: None,
        }
    }

    /// Create a new stats API error with status code
    pub fn api_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Api {
            message: msg.into(),
            status_code: Some(status),
        }
    }

    /// Create a new not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether repeating the same call later could succeed.
    ///
    /// Nothing in the workspace retries automatically; callers use this to
    /// word their messages.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Api { status_code, .. } => {
                matches!(status_code, Some(code) if *code == 429 || *code >= 500)
            }
            _ => false,
        }
    }

    /// Short category label used in log fields.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
            Self::Network { .. } => "network",
            Self::Api { .. } => "api",
            Self::NotFound { .. } => "not_found",
            Self::Parse { .. } => "parse",
            Self::Serialization(_) => "serialization",
            Self::Image(_) => "image",
            Self::Graph { .. } => "graph",
            Self::Validation { .. } => "validation",
            Self::Generic { .. } => "generic",
        }
    }
}

// Error conversion implementations for external types

/// Convert from `reqwest::Error` to `BullsError`
impl From<reqwest::Error> for BullsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map_or(0, |s| s.as_u16());
            Self::api_with_status(format!("HTTP error: {status_code}"), status_code)
        } else if err.is_decode() {
            Self::parse_with_source("Response body could not be decoded", err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from `toml::de::Error` to `BullsError`
impl From<toml::de::Error> for BullsError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to `BullsError`
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for BullsError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = BullsError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = BullsError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let api_error = BullsError::api_with_status("Server error", 500);
        assert!(api_error.to_string().contains("Stats API error"));
        assert!(api_error.to_string().contains("Server error"));

        let validation_error = BullsError::validation_field("Invalid input", "season");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));

        let not_found = BullsError::not_found("No games found for the current season");
        assert_eq!(
            not_found.to_string(),
            "Not found: No games found for the current season"
        );
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = BullsError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let parse_error = BullsError::parse_with_source(
            "Bad row",
            io::Error::new(io::ErrorKind::InvalidData, "truncated"),
        );
        assert!(parse_error.to_string().contains("Parse error"));
        assert!(parse_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: BullsError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
        assert_eq!(error.category(), "io");
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let error: BullsError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let error: BullsError = toml_error.into();

        assert!(error.to_string().contains("TOML parsing error"));
        assert_eq!(error.category(), "config");
    }

    #[test]
    fn test_plain_constructors_have_no_source() {
        use std::error::Error;

        assert!(BullsError::graph("no data").source().is_none());
        assert!(BullsError::config("bad").source().is_none());
        assert!(BullsError::new("oops").source().is_none());
    }

    #[test]
    fn test_transient_classification() {
        assert!(BullsError::network("reset").is_transient());
        assert!(BullsError::api_with_status("busy", 503).is_transient());
        assert!(BullsError::api_with_status("slow down", 429).is_transient());
        assert!(!BullsError::api_with_status("missing", 404).is_transient());
        assert!(!BullsError::not_found("no games").is_transient());
        assert!(!BullsError::graph("no data").is_transient());
    }
}
