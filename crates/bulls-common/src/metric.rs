//! Typed selector for per-game statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A per-game statistic that can be averaged, trended or plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Points scored
    Points,
    /// Total rebounds
    Rebounds,
    /// Assists
    Assists,
    /// Steals
    Steals,
    /// Blocks
    Blocks,
    /// Turnovers
    Turnovers,
    /// Field goals made
    FgMade,
    /// Field goals attempted
    FgAttempted,
    /// Three-pointers made
    Fg3Made,
    /// Three-pointers attempted
    Fg3Attempted,
    /// Free throws made
    FtMade,
    /// Free throws attempted
    FtAttempted,
    /// Field goal percentage
    FgPct,
    /// Three-point percentage
    Fg3Pct,
    /// Free throw percentage
    FtPct,
    /// True shooting percentage
    TsPct,
    /// Effective field goal percentage
    EfgPct,
    /// Minutes played, as decimal minutes
    Minutes,
}

impl Metric {
    /// Every metric, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Points,
        Self::Rebounds,
        Self::Assists,
        Self::Steals,
        Self::Blocks,
        Self::Turnovers,
        Self::FgMade,
        Self::FgAttempted,
        Self::Fg3Made,
        Self::Fg3Attempted,
        Self::FtMade,
        Self::FtAttempted,
        Self::FgPct,
        Self::Fg3Pct,
        Self::FtPct,
        Self::TsPct,
        Self::EfgPct,
        Self::Minutes,
    ];

    /// Field name used in tables and chart selectors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Rebounds => "rebounds",
            Self::Assists => "assists",
            Self::Steals => "steals",
            Self::Blocks => "blocks",
            Self::Turnovers => "turnovers",
            Self::FgMade => "fg_made",
            Self::FgAttempted => "fg_attempted",
            Self::Fg3Made => "fg3_made",
            Self::Fg3Attempted => "fg3_attempted",
            Self::FtMade => "ft_made",
            Self::FtAttempted => "ft_attempted",
            Self::FgPct => "fg_pct",
            Self::Fg3Pct => "fg3_pct",
            Self::FtPct => "ft_pct",
            Self::TsPct => "ts_pct",
            Self::EfgPct => "efg_pct",
            Self::Minutes => "minutes",
        }
    }

    /// Axis label for charts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Points => "Points",
            Self::Rebounds => "Rebounds",
            Self::Assists => "Assists",
            Self::Steals => "Steals",
            Self::Blocks => "Blocks",
            Self::Turnovers => "Turnovers",
            Self::FgMade => "FGM",
            Self::FgAttempted => "FGA",
            Self::Fg3Made => "3PM",
            Self::Fg3Attempted => "3PA",
            Self::FtMade => "FTM",
            Self::FtAttempted => "FTA",
            Self::FgPct => "FG%",
            Self::Fg3Pct => "3P%",
            Self::FtPct => "FT%",
            Self::TsPct => "TS%",
            Self::EfgPct => "eFG%",
            Self::Minutes => "Minutes",
        }
    }

    /// Whether the metric is a percentage on a 0-100 scale.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        matches!(
            self,
            Self::FgPct | Self::Fg3Pct | Self::FtPct | Self::TsPct | Self::EfgPct
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = crate::BullsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let alias = match wanted.as_str() {
            "pts" => "points",
            "reb" | "rebounds_total" => "rebounds",
            "ast" => "assists",
            "stl" => "steals",
            "blk" => "blocks",
            "tov" => "turnovers",
            "min" => "minutes",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|m| m.name() == alias)
            .ok_or_else(|| {
                crate::BullsError::validation_field(format!("unknown metric '{s}'"), "metric")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.name().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("PTS".parse::<Metric>().unwrap(), Metric::Points);
        assert_eq!("reb".parse::<Metric>().unwrap(), Metric::Rebounds);
        assert!("dunks".parse::<Metric>().is_err());
    }

    #[test]
    fn test_percentage_flag() {
        assert!(Metric::TsPct.is_percentage());
        assert!(!Metric::Points.is_percentage());
    }
}
