//! Recent-versus-previous trend classification.
//!
//! Observations are ordered most recent first. The first `window` values form
//! the recent window; the next `window` values (or whatever remains when
//! fewer than `2 * window` exist) form the previous window. The recent mean
//! must beat the previous mean by more than `threshold` (relative) to count
//! as a move; landing exactly on the boundary is stable.

use crate::averages::metric_values;
use crate::stats::{max, mean, min};
use bulls_common::{Metric, PlayerGame};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of recent performance relative to the prior window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Recent mean above the previous mean by more than the threshold
    Up,
    /// Recent mean below the previous mean by more than the threshold
    Down,
    /// Within the threshold either way
    Stable,
}

impl TrendDirection {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }

    /// Arrow glyph for compact output.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Stable => "▶",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Window size and relative threshold for trend classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Observations per window
    pub window: usize,
    /// Relative change needed to leave "stable", e.g. 0.10 for 10%
    pub threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 5,
            threshold: 0.10,
        }
    }
}

/// Result of comparing the two windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendClassification {
    /// Classified direction
    pub direction: TrendDirection,
    /// Mean of the recent window
    pub recent_avg: f64,
    /// Mean of the previous window (equal to `recent_avg` when it was empty)
    pub previous_avg: f64,
}

/// Classify a most-recent-first series. Returns `None` for an empty series.
#[must_use]
pub fn classify_trend(values: &[f64], config: &TrendConfig) -> Option<TrendClassification> {
    let window = config.window.max(1);
    let recent = &values[..values.len().min(window)];
    let previous = if values.len() >= window * 2 {
        &values[window..window * 2]
    } else {
        &values[recent.len()..]
    };

    let recent_avg = mean(recent)?;
    let previous_avg = mean(previous).unwrap_or(recent_avg);

    let direction = if recent_avg > previous_avg * (1.0 + config.threshold) {
        TrendDirection::Up
    } else if recent_avg < previous_avg * (1.0 - config.threshold) {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    Some(TrendClassification {
        direction,
        recent_avg,
        previous_avg,
    })
}

/// Trend summary for one metric over a player's games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Metric the report covers
    pub metric: Metric,
    /// Classified direction
    pub direction: TrendDirection,
    /// Mean over every game supplied
    pub average: f64,
    /// Mean of the recent window
    pub recent_avg: f64,
    /// Mean of the previous window
    pub previous_avg: f64,
    /// Highest value
    pub high: f64,
    /// Lowest value
    pub low: f64,
    /// Most recent value
    pub last_game: f64,
    /// Number of games supplied
    pub games: usize,
}

/// Trend report for `metric` over `games` (most recent first).
///
/// Returns `None` when there are no games.
#[must_use]
pub fn scoring_trend(
    games: &[PlayerGame],
    metric: Metric,
    config: &TrendConfig,
) -> Option<TrendReport> {
    let values = metric_values(games, metric);
    let classification = classify_trend(&values, config)?;
    Some(TrendReport {
        metric,
        direction: classification.direction,
        average: mean(&values)?,
        recent_avg: classification.recent_avg,
        previous_avg: classification.previous_avg,
        high: max(&values)?,
        low: min(&values)?,
        last_game: values[0],
        games: values.len(),
    })
}
