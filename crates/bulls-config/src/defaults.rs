//! Default values: the Chicago Bulls, current season.

use crate::schema::*;
use std::path::PathBuf;

/// Chicago's franchise id.
pub const DEFAULT_TEAM_ID: u32 = 1_610_612_741;

/// Season the workspace targets by default.
pub const DEFAULT_SEASON: &str = "2025-26";

/// Stats endpoints base URL.
pub const DEFAULT_STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// Headshot CDN template.
pub const DEFAULT_HEADSHOT_URL: &str =
    "https://cdn.nba.com/headshots/nba/latest/1040x760/{player_id}.png";

/// Browser-like user agent; the stats endpoints reject bare clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

impl Default for Config {
    fn default() -> Self {
        Self {
            team: TeamConfig::default(),
            api: ApiConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            graphs: GraphsConfig::default(),
            graphic: GraphicConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_TEAM_ID,
            abbreviation: "CHI".to_string(),
            name: "Chicago Bulls".to_string(),
            season: DEFAULT_SEASON.to_string(),
            previous_season: "2024-25".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            stats_base_url: DEFAULT_STATS_BASE_URL.to_string(),
            headshot_url_template: DEFAULT_HEADSHOT_URL.to_string(),
            request_delay_ms: 600,
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_window: 5,
            trend_threshold: 0.10,
            consistency: ConsistencyConfig::default(),
            recent_games: 10,
            roster_min_fga: 5.0,
        }
    }
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            very_consistent: 0.20,
            consistent: 0.35,
            moderate: 0.50,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 900,
            font_family: "sans-serif".to_string(),
            league_avg_ts_pct: 57.0,
            colors: ColorsConfig::default(),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            primary: "#CE1141".to_string(),
            secondary: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            dark_background: "#0A0A0A".to_string(),
            text: "#FFFFFF".to_string(),
            muted: "#666666".to_string(),
            win: "#22C55E".to_string(),
            loss: "#EF4444".to_string(),
        }
    }
}

impl Default for GraphicConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1350,
            footer: "@bullsanalytics".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
        }
    }
}
