//! Shooting efficiency: true shooting and effective field goal percentage.

use bulls_common::{
    effective_fg_pct, round1, true_shooting_pct, BoxScorePlayer, FieldValue, PlayerGame,
    PlayerId, Tabular,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate efficiency over a set of games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    /// Games included
    pub games: usize,
    /// True shooting percentage over the combined attempts
    pub ts_pct: f64,
    /// Effective field goal percentage over the combined attempts
    pub efg_pct: f64,
}

/// Efficiency over all of `games` combined. Returns `None` for no games.
#[must_use]
pub fn efficiency_metrics(games: &[PlayerGame]) -> Option<EfficiencySummary> {
    if games.is_empty() {
        return None;
    }
    let total = |f: fn(&PlayerGame) -> u32| f64::from(games.iter().map(f).sum::<u32>());
    let points = total(|g| g.stats.points);
    let fga = total(|g| g.stats.fg_attempted);
    let fta = total(|g| g.stats.ft_attempted);
    let fgm = total(|g| g.stats.fg_made);
    let fg3m = total(|g| g.stats.fg3_made);

    Some(EfficiencySummary {
        games: games.len(),
        ts_pct: round1(true_shooting_pct(points, fga, fta)),
        efg_pct: round1(effective_fg_pct(fgm, fg3m, fga)),
    })
}

/// One game with its efficiency columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEfficiency {
    /// Underlying game
    pub game: PlayerGame,
    /// True shooting percentage, one decimal
    pub ts_pct: f64,
    /// Effective field goal percentage, one decimal
    pub efg_pct: f64,
}

impl Tabular for GameEfficiency {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "ts_pct" => Some(self.ts_pct.into()),
            "efg_pct" => Some(self.efg_pct.into()),
            other => self.game.field(other),
        }
    }
}

/// Per-game efficiency, in input order.
#[must_use]
pub fn game_efficiency(games: &[PlayerGame]) -> Vec<GameEfficiency> {
    games
        .iter()
        .map(|game| GameEfficiency {
            game: game.clone(),
            ts_pct: round1(game.stats.ts_pct()),
            efg_pct: round1(game.stats.efg_pct()),
        })
        .collect()
}

/// One rotation player's volume and efficiency over several games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEfficiency {
    /// Player identifier
    pub player_id: PlayerId,
    /// Display name
    pub name: String,
    /// Games appeared in
    pub games: usize,
    /// Total points
    pub points: u32,
    /// Total field goal attempts
    pub fga: u32,
    /// Total free throw attempts
    pub fta: u32,
    /// Field goal attempts per game, one decimal
    pub fga_per_game: f64,
    /// True shooting percentage, one decimal
    pub ts_pct: f64,
}

impl Tabular for RosterEfficiency {
    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "player_id" => FieldValue::Number(f64::from(self.player_id.0)),
            "name" => self.name.clone().into(),
            "games" => FieldValue::Number(self.games as f64),
            "points" => self.points.into(),
            "fga" => self.fga.into(),
            "fta" => self.fta.into(),
            "fga_per_game" => self.fga_per_game.into(),
            "ts_pct" => self.ts_pct.into(),
            _ => return None,
        })
    }
}

/// Aggregate box scores (one `Vec` per game) into per-player efficiency.
///
/// Players averaging fewer than `min_fga_per_game` attempts are dropped.
/// Output is sorted by attempts per game, highest first.
#[must_use]
pub fn roster_efficiency(
    box_scores: &[Vec<BoxScorePlayer>],
    min_fga_per_game: f64,
) -> Vec<RosterEfficiency> {
    let mut by_player: HashMap<PlayerId, RosterEfficiency> = HashMap::new();
    for game in box_scores {
        for player in game {
            let entry = by_player
                .entry(player.player_id)
                .or_insert_with(|| RosterEfficiency {
                    player_id: player.player_id,
                    name: player.name(),
                    games: 0,
                    points: 0,
                    fga: 0,
                    fta: 0,
                    fga_per_game: 0.0,
                    ts_pct: 0.0,
                });
            entry.games += 1;
            entry.points += player.stats.points;
            entry.fga += player.stats.fg_attempted;
            entry.fta += player.stats.ft_attempted;
        }
    }

    let mut rows: Vec<RosterEfficiency> = by_player
        .into_values()
        .filter_map(|mut row| {
            let per_game = f64::from(row.fga) / row.games.max(1) as f64;
            if per_game < min_fga_per_game {
                return None;
            }
            row.fga_per_game = round1(per_game);
            row.ts_pct = round1(true_shooting_pct(
                f64::from(row.points),
                f64::from(row.fga),
                f64::from(row.fta),
            ));
            Some(row)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.fga_per_game
            .total_cmp(&a.fga_per_game)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulls_common::test_utils::{assert_approx_eq, fixtures};
    use bulls_common::StatLine;

    fn shooting_game(points: u32, fgm: u32, fga: u32, fg3m: u32, fta: u32) -> PlayerGame {
        let mut game = fixtures::player_game(points, 0, 0);
        game.stats = StatLine {
            points,
            fg_made: fgm,
            fg_attempted: fga,
            fg3_made: fg3m,
            ft_attempted: fta,
            ..StatLine::default()
        };
        game
    }

    #[test]
    fn test_empty_input() {
        assert!(efficiency_metrics(&[]).is_none());
        assert!(game_efficiency(&[]).is_empty());
        assert!(roster_efficiency(&[], 5.0).is_empty());
    }

    #[test]
    fn test_ts_and_efg() {
        let games = vec![shooting_game(30, 12, 20, 2, 4)];
        let summary = efficiency_metrics(&games).unwrap();
        let expected_ts = 30.0 / (2.0 * (20.0 + 0.44 * 4.0)) * 100.0;
        let expected_efg = (12.0 + 0.5 * 2.0) / 20.0 * 100.0;
        assert_approx_eq(summary.ts_pct, expected_ts, 0.05);
        assert_approx_eq(summary.efg_pct, expected_efg, 0.05);
        assert_eq!(summary.games, 1);
    }

    #[test]
    fn test_zero_attempts() {
        let summary = efficiency_metrics(&[shooting_game(0, 0, 0, 0, 0)]).unwrap();
        assert!(summary.ts_pct.abs() < f64::EPSILON);
        assert!(summary.efg_pct.abs() < f64::EPSILON);
    }

    #[test]
    fn test_game_efficiency_columns() {
        let rows = game_efficiency(&fixtures::sample_player_games());
        assert_eq!(rows.len(), 5);
        assert!(rows[0].number("ts_pct").is_some());
        assert!(rows[0].number("efg_pct").is_some());
        assert_eq!(rows[0].number("points"), Some(25.0));
    }

    #[test]
    fn test_roster_efficiency_filters_and_sorts() {
        let game = fixtures::sample_box_score();
        let bench = fixtures::box_player(
            1,
            "Deep",
            "Bench",
            StatLine {
                points: 2,
                fg_made: 1,
                fg_attempted: 2,
                ..StatLine::default()
            },
        );
        let mut with_bench = game.clone();
        with_bench.push(bench);

        let rows = roster_efficiency(&[with_bench, game], 5.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Zach LaVine");
        assert_eq!(rows[0].games, 2);
        assert_approx_eq(rows[0].fga_per_game, 20.0, 1e-9);
        // 56 / (2 * (40 + 0.44 * 10)) * 100
        assert_approx_eq(rows[0].ts_pct, 63.1, 1e-9);
        assert_eq!(rows[1].name, "Coby White");
    }
}
