//! Configuration schema definitions.

use bulls_common::{LoggingConfig, PlayerId, TeamId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Bulls Analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Team and season selection.
    pub team: TeamConfig,
    /// Upstream stats API configuration.
    pub api: ApiConfig,
    /// Aggregation policy constants.
    pub analysis: AnalysisConfig,
    /// Output locations.
    pub output: OutputConfig,
    /// Chart styling.
    pub graphs: GraphsConfig,
    /// Social graphic layout.
    pub graphic: GraphicConfig,
    /// Logging configuration.
    pub logging: LogConfig,
}

impl Config {
    /// Validates the configuration, returning the first problem found.
    pub fn validate(&self) -> bulls_common::Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }
}

/// Team and season selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Franchise id.
    pub id: u32,
    /// Three-letter abbreviation.
    pub abbreviation: String,
    /// Display name.
    pub name: String,
    /// Current season, "YYYY-YY".
    pub season: String,
    /// Previous season, "YYYY-YY".
    pub previous_season: String,
}

impl TeamConfig {
    /// Typed franchise id.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        TeamId(self.id)
    }
}

/// Upstream stats API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the stats endpoints.
    pub stats_base_url: String,
    /// Headshot URL with a `{player_id}` placeholder.
    pub headshot_url_template: String,
    /// Fixed pause before every stats request, in milliseconds.
    pub request_delay_ms: u64,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ApiConfig {
    /// Delay inserted before each stats request.
    #[must_use]
    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Headshot URL for a player.
    #[must_use]
    pub fn headshot_url(&self, player_id: PlayerId) -> String {
        self.headshot_url_template
            .replace("{player_id}", &player_id.to_string())
    }
}

/// Aggregation policy constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Games in each trend window.
    pub trend_window: usize,
    /// Relative change that flips a trend away from stable.
    pub trend_threshold: f64,
    /// Coefficient of variation bands.
    pub consistency: ConsistencyConfig,
    /// Default number of recent games for player commands.
    pub recent_games: usize,
    /// Minimum field goal attempts per game for roster efficiency.
    pub roster_min_fga: f64,
}

/// Upper CV bounds for each consistency label. Values are ratios, not percents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsistencyConfig {
    /// Below this CV a metric is very consistent.
    pub very_consistent: f64,
    /// Below this CV a metric is consistent.
    pub consistent: f64,
    /// Below this CV a metric is moderate; at or above, volatile.
    pub moderate: f64,
}

/// Output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where charts are written.
    pub output_dir: PathBuf,
    /// Directory holding fonts and other assets.
    pub assets_dir: PathBuf,
}

/// Chart styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphsConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Font family used for all text.
    pub font_family: String,
    /// League average true shooting percentage reference line.
    pub league_avg_ts_pct: f64,
    /// Palette.
    pub colors: ColorsConfig,
}

/// Palette, as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Primary brand color.
    pub primary: String,
    /// Secondary brand color.
    pub secondary: String,
    /// Chart background.
    pub background: String,
    /// Graphic background.
    pub dark_background: String,
    /// Main text color on dark backgrounds.
    pub text: String,
    /// Muted text and reference lines.
    pub muted: String,
    /// Wins and positive deltas.
    pub win: String,
    /// Losses and negative deltas.
    pub loss: String,
}

/// Social graphic layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Footer handle.
    pub footer: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level filter, e.g. "info" or "`bulls_data=debug`".
    pub level: String,
    /// Emit JSON lines.
    pub json_format: bool,
    /// Optional log file.
    pub file_path: Option<String>,
}

impl LogConfig {
    /// Convert into the subscriber configuration.
    #[must_use]
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json_format,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}
