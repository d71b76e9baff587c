//! Trailing rolling averages.

use bulls_common::{FieldValue, Metric, PlayerGame, Tabular};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Default window sizes.
pub const DEFAULT_WINDOWS: [usize; 3] = [3, 5, 10];

/// Trailing mean of a most-recent-first series, emitted most recent first.
///
/// Each position averages itself and up to `window - 1` older values, so
/// the oldest entries average over fewer values rather than being dropped.
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    (0..values.len())
        .map(|i| {
            let span = &values[i..values.len().min(i + window)];
            span.iter().sum::<f64>() / span.len() as f64
        })
        .collect()
}

/// A game plus its rolling columns, keyed `{metric}_roll_{window}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingRow {
    /// Underlying game
    pub game: PlayerGame,
    /// Rolling values by column name
    pub values: BTreeMap<String, f64>,
}

impl RollingRow {
    /// Rolling value for a metric and window.
    #[must_use]
    pub fn get(&self, metric: Metric, window: usize) -> Option<f64> {
        self.values.get(&column_name(metric, window)).copied()
    }
}

impl Tabular for RollingRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.values
            .get(name)
            .map(|&value| FieldValue::Number(value))
            .or_else(|| self.game.field(name))
    }
}

/// Column name for a rolling metric.
#[must_use]
pub fn column_name(metric: Metric, window: usize) -> String {
    format!("{metric}_roll_{window}")
}

/// Rolling averages of each metric for each window, one row per game.
///
/// Zero-sized windows are skipped. Empty input yields no rows.
#[must_use]
pub fn rolling_averages(
    games: &[PlayerGame],
    metrics: &[Metric],
    windows: &[usize],
) -> Vec<RollingRow> {
    let mut rows: Vec<RollingRow> = games
        .iter()
        .map(|game| RollingRow {
            game: game.clone(),
            values: BTreeMap::new(),
        })
        .collect();

    for &window in windows {
        if window == 0 {
            warn!("Skipping zero-sized rolling window");
            continue;
        }
        for &metric in metrics {
            let series: Vec<f64> = games.iter().map(|g| g.metric(metric)).collect();
            for (row, value) in rows.iter_mut().zip(rolling_mean(&series, window)) {
                row.values.insert(column_name(metric, window), value);
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulls_common::test_utils::{assert_approx_eq, fixtures};

    #[test]
    fn test_rolling_mean_min_periods() {
        let result = rolling_mean(&[30.0, 20.0, 10.0], 2);
        assert_eq!(result, vec![25.0, 15.0, 10.0]);
    }

    #[test]
    fn test_rolling_mean_window_larger_than_series() {
        let result = rolling_mean(&[30.0, 20.0, 10.0], 10);
        assert_eq!(result, vec![20.0, 15.0, 10.0]);
        assert!(rolling_mean(&[1.0], 0).is_empty());
    }

    #[test]
    fn test_rolling_columns() {
        let games = fixtures::sample_player_games();
        let rows = rolling_averages(&games, &crate::DEFAULT_METRICS, &DEFAULT_WINDOWS);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].values.len(), 9);
        assert!(rows[0].number("points_roll_3").is_some());
        assert!(rows[0].number("assists_roll_10").is_some());
        // latest three: 25, 18, 30
        assert_approx_eq(rows[0].get(Metric::Points, 3).unwrap(), 73.0 / 3.0, 1e-9);
        // oldest row only averages itself
        assert_approx_eq(rows[4].get(Metric::Points, 5).unwrap(), 28.0, 1e-9);
        // base columns still reachable
        assert_eq!(rows[0].number("points"), Some(25.0));
    }

    #[test]
    fn test_rolling_empty_input() {
        assert!(rolling_averages(&[], &crate::DEFAULT_METRICS, &DEFAULT_WINDOWS).is_empty());
    }
}
