//! Structured logging infrastructure for Bulls Analytics

use crate::error::{BullsError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "`bulls_data=trace`")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Whether to enable pretty multi-line formatting
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to log span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. When a file path is
/// configured the returned guard must be kept alive for buffered lines to be
/// flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| BullsError::config_with_source("Invalid log level filter", e))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let (layer, guard): (BoxedLayer, Option<WorkerGuard>) = match &config.file_path {
        Some(file_path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(file_path));
            let base = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_span_events(span_events)
                .with_target(config.include_targets);
            let layer = if config.json_format {
                base.json().boxed()
            } else {
                base.boxed()
            };
            (layer, Some(guard))
        }
        None => {
            let base = fmt::layer()
                .with_span_events(span_events)
                .with_target(config.include_targets);
            let layer = if config.json_format {
                base.json().boxed()
            } else if config.pretty_format {
                base.pretty().boxed()
            } else {
                base.compact().boxed()
            };
            (layer, None)
        }
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| BullsError::config_with_source("Failed to initialize logging", e))?;

    Ok(guard)
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<Option<WorkerGuard>> {
    init_logging(&LoggingConfig::default())
}

fn file_appender(file_path: &str) -> tracing_appender::rolling::RollingFileAppender {
    let path = Path::new(file_path);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map_or_else(|| "bulls.log".into(), |name| name.to_os_string());
    tracing_appender::rolling::never(directory, file_name)
}
