//! Runtime validation of a loaded configuration.

use crate::schema::{ColorsConfig, Config};
use bulls_common::{BullsError, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, returning the first problem found.
    pub fn validate(config: &Config) -> Result<()> {
        let team = &config.team;
        if team.id == 0 {
            return Err(BullsError::validation_field("team id must be set", "team.id"));
        }
        if team.abbreviation.trim().is_empty() {
            return Err(BullsError::validation_field(
                "team abbreviation cannot be empty",
                "team.abbreviation",
            ));
        }
        Self::validate_season(&team.season, "team.season")?;
        Self::validate_season(&team.previous_season, "team.previous_season")?;

        let api = &config.api;
        url::Url::parse(&api.stats_base_url).map_err(|e| {
            BullsError::validation_field(format!("invalid stats URL: {e}"), "api.stats_base_url")
        })?;
        if !api.headshot_url_template.contains("{player_id}") {
            return Err(BullsError::validation_field(
                "headshot URL template must contain {player_id}",
                "api.headshot_url_template",
            ));
        }
        if api.timeout_seconds == 0 {
            return Err(BullsError::validation_field(
                "timeout must be positive",
                "api.timeout_seconds",
            ));
        }

        let analysis = &config.analysis;
        if analysis.trend_window == 0 {
            return Err(BullsError::validation_field(
                "trend window must be positive",
                "analysis.trend_window",
            ));
        }
        if !(analysis.trend_threshold > 0.0 && analysis.trend_threshold < 1.0) {
            return Err(BullsError::validation_field(
                "trend threshold must be between 0 and 1",
                "analysis.trend_threshold",
            ));
        }
        let bands = &analysis.consistency;
        if !(0.0 < bands.very_consistent
            && bands.very_consistent < bands.consistent
            && bands.consistent < bands.moderate)
        {
            return Err(BullsError::validation_field(
                "consistency bands must be positive and strictly increasing",
                "analysis.consistency",
            ));
        }
        if analysis.roster_min_fga < 0.0 {
            return Err(BullsError::validation_field(
                "minimum FGA cannot be negative",
                "analysis.roster_min_fga",
            ));
        }

        let graphs = &config.graphs;
        if graphs.width == 0 || graphs.height == 0 {
            return Err(BullsError::validation_field(
                "chart dimensions must be positive",
                "graphs",
            ));
        }
        if config.graphic.width == 0 || config.graphic.height == 0 {
            return Err(BullsError::validation_field(
                "graphic dimensions must be positive",
                "graphic",
            ));
        }
        Self::validate_colors(&graphs.colors)
    }

    /// Whether `value` looks like `#RRGGBB`.
    #[must_use]
    pub fn is_hex_color(value: &str) -> bool {
        value
            .strip_prefix('#')
            .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
    }

    fn validate_season(season: &str, field: &str) -> Result<()> {
        let bytes = season.as_bytes();
        let valid = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if valid {
            Ok(())
        } else {
            Err(BullsError::validation_field(
                format!("season '{season}' must look like 2025-26"),
                field,
            ))
        }
    }

    fn validate_colors(colors: &ColorsConfig) -> Result<()> {
        let named = [
            ("primary", &colors.primary),
            ("secondary", &colors.secondary),
            ("background", &colors.background),
            ("dark_background", &colors.dark_background),
            ("text", &colors.text),
            ("muted", &colors.muted),
            ("win", &colors.win),
            ("loss", &colors.loss),
        ];
        for (name, value) in named {
            if !Self::is_hex_color(value) {
                return Err(BullsError::validation_field(
                    format!("color '{value}' is not #RRGGBB"),
                    format!("graphs.colors.{name}"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_hex_colors() {
        assert!(ConfigValidator::is_hex_color("#CE1141"));
        assert!(ConfigValidator::is_hex_color("#0a0a0a"));
        assert!(!ConfigValidator::is_hex_color("CE1141"));
        assert!(!ConfigValidator::is_hex_color("#CE11"));
        assert!(!ConfigValidator::is_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_rejects_bad_season() {
        let mut config = Config::default();
        config.team.season = "2025".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("2025-26"));
    }

    #[test]
    fn test_rejects_unordered_bands() {
        let mut config = Config::default();
        config.analysis.consistency.consistent = 0.10;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        let mut config = Config::default();
        config.analysis.trend_threshold = 0.0;
        assert!(ConfigValidator::validate(&config).is_err());
        config.analysis.trend_threshold = 1.5;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let mut config = Config::default();
        config.api.headshot_url_template = "https://cdn.nba.com/x.png".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
