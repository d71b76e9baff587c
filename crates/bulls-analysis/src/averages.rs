//! Season and window averages.

use crate::stats::mean;
use bulls_common::{GameRecord, Metric, PlayerGame, StatLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean per-game production over a set of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAverages {
    /// Number of games averaged
    pub games: usize,
    /// Points per game
    pub points: f64,
    /// Rebounds per game
    pub rebounds: f64,
    /// Assists per game
    pub assists: f64,
    /// Steals per game
    pub steals: f64,
    /// Blocks per game
    pub blocks: f64,
    /// Mean of the per-game field goal percentages
    pub fg_pct: f64,
    /// Mean of the per-game three-point percentages
    pub fg3_pct: f64,
}

/// Averages every row in `games`. Returns `None` when there are no games.
#[must_use]
pub fn season_averages(games: &[PlayerGame]) -> Option<SeasonAverages> {
    let avg = |metric: Metric| metric_mean(games, metric);
    Some(SeasonAverages {
        games: games.len(),
        points: avg(Metric::Points)?,
        rebounds: avg(Metric::Rebounds)?,
        assists: avg(Metric::Assists)?,
        steals: avg(Metric::Steals)?,
        blocks: avg(Metric::Blocks)?,
        fg_pct: avg(Metric::FgPct)?,
        fg3_pct: avg(Metric::Fg3Pct)?,
    })
}

/// Means of arbitrary metrics plus the row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowAverages {
    /// Number of games averaged
    pub games: usize,
    /// Mean value per metric
    pub means: BTreeMap<Metric, f64>,
}

impl WindowAverages {
    /// Mean of one metric, if it was requested.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.means.get(&metric).copied()
    }
}

/// Averages the chosen metrics over `games`. Returns `None` when there are no games.
#[must_use]
pub fn window_averages(games: &[PlayerGame], metrics: &[Metric]) -> Option<WindowAverages> {
    if games.is_empty() {
        return None;
    }
    let means = metrics
        .iter()
        .filter_map(|&metric| metric_mean(games, metric).map(|value| (metric, value)))
        .collect();
    Some(WindowAverages {
        games: games.len(),
        means,
    })
}

/// How one game compares with the averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VsAverage {
    /// Points above (positive) or below average
    pub points: f64,
    /// Rebounds above or below average
    pub rebounds: f64,
    /// Assists above or below average
    pub assists: f64,
}

/// Difference between one stat line and the averages.
#[must_use]
pub fn vs_average(game: &StatLine, averages: &SeasonAverages) -> VsAverage {
    VsAverage {
        points: f64::from(game.points) - averages.points,
        rebounds: f64::from(game.rebounds) - averages.rebounds,
        assists: f64::from(game.assists) - averages.assists,
    }
}

/// Team record over a set of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    /// Games played
    pub games: usize,
    /// Wins
    pub wins: usize,
    /// Losses
    pub losses: usize,
    /// Wins over games, as a percentage
    pub win_pct: f64,
    /// Points per game
    pub points: f64,
    /// Mean point differential
    pub plus_minus: f64,
}

/// Summarizes team games. Returns `None` when there are no games.
#[must_use]
pub fn team_summary(games: &[GameRecord]) -> Option<TeamSummary> {
    let points: Vec<f64> = games.iter().map(|g| f64::from(g.points)).collect();
    let plus_minus: Vec<f64> = games.iter().map(|g| f64::from(g.plus_minus)).collect();
    let wins = games.iter().filter(|g| g.result.is_win()).count();
    Some(TeamSummary {
        games: games.len(),
        wins,
        losses: games.len() - wins,
        win_pct: wins as f64 / games.len().max(1) as f64 * 100.0,
        points: mean(&points)?,
        plus_minus: mean(&plus_minus)?,
    })
}

pub(crate) fn metric_values(games: &[PlayerGame], metric: Metric) -> Vec<f64> {
    games.iter().map(|game| game.metric(metric)).collect()
}

fn metric_mean(games: &[PlayerGame], metric: Metric) -> Option<f64> {
    mean(&metric_values(games, metric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulls_common::test_utils::{assert_approx_eq, fixtures};

    #[test]
    fn test_empty_input_yields_none() {
        assert!(season_averages(&[]).is_none());
        assert!(window_averages(&[], &[Metric::Points]).is_none());
        assert!(team_summary(&[]).is_none());
    }

    #[test]
    fn test_points_average() {
        let games = fixtures::games_with_points(&[20, 25, 30]);
        let averages = season_averages(&games).unwrap();
        assert_eq!(averages.games, 3);
        assert!((averages.points - 25.0).abs() < f64::EPSILON);

        let games = fixtures::games_with_points(&[10, 20, 30]);
        assert!((season_averages(&games).unwrap().points - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sample_season() {
        let averages = season_averages(&fixtures::sample_player_games()).unwrap();
        assert_eq!(averages.games, 5);
        assert_approx_eq(averages.points, 24.6, 1e-9);
        assert_approx_eq(averages.rebounds, 5.0, 1e-9);
        assert_approx_eq(averages.assists, 6.0, 1e-9);
        assert_approx_eq(averages.steals, 1.8, 1e-9);
        assert_approx_eq(averages.blocks, 0.6, 1e-9);
        // (50.0 + 38.9 + 54.5 + 45.0 + 52.4) / 5
        assert_approx_eq(averages.fg_pct, 48.16, 1e-9);
    }

    #[test]
    fn test_window_averages_selected_metrics() {
        let games = fixtures::sample_player_games();
        let window = window_averages(&games[..2], &[Metric::Points, Metric::Turnovers]).unwrap();
        assert_eq!(window.games, 2);
        assert_approx_eq(window.get(Metric::Points).unwrap(), 21.5, 1e-9);
        assert_approx_eq(window.get(Metric::Turnovers).unwrap(), 2.5, 1e-9);
        assert!(window.get(Metric::Assists).is_none());
    }

    #[test]
    fn test_vs_average() {
        let averages = SeasonAverages {
            games: 10,
            points: 20.0,
            rebounds: 5.0,
            assists: 5.0,
            steals: 1.0,
            blocks: 0.5,
            fg_pct: 45.0,
            fg3_pct: 35.0,
        };
        let diff = vs_average(&fixtures::line(28, 5, 7), &averages);
        assert_approx_eq(diff.points, 8.0, 0.0);
        assert_approx_eq(diff.rebounds, 0.0, 0.0);
        assert_approx_eq(diff.assists, 2.0, 0.0);
    }

    #[test]
    fn test_team_summary() {
        let summary = team_summary(&fixtures::sample_games()).unwrap();
        assert_eq!(summary.games, 3);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_approx_eq(summary.points, 105.0, 1e-9);
        assert_approx_eq(summary.plus_minus, -1.0 / 3.0, 1e-9);
    }
}
