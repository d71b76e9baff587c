//! Test utilities and shared fixtures for Bulls Analytics.
//!
//! Fixtures mirror the shape of real stats API rows so that aggregation,
//! fetch and rendering tests work from the same sample season.

use std::sync::Once;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sample records for the Chicago Bulls.
pub mod fixtures {
    use crate::records::{BoxScorePlayer, GameRecord, PlayerGame, ShotRecord, StatLine};
    use crate::types::{GameId, GameResult, PlayerId, ShotType, ShotZone, TeamId};
    use chrono::NaiveDate;

    /// Chicago's franchise id.
    pub const CHI: TeamId = TeamId(1_610_612_741);

    /// Build a date, panicking on invalid input.
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// A stat line with only points, rebounds and assists set.
    pub fn line(points: u32, rebounds: u32, assists: u32) -> StatLine {
        StatLine {
            points,
            rebounds,
            assists,
            minutes: "30:00".to_string(),
            ..StatLine::default()
        }
    }

    /// A player game with the given headline numbers on an arbitrary date.
    pub fn player_game(points: u32, rebounds: u32, assists: u32) -> PlayerGame {
        PlayerGame {
            game_id: GameId::from("0022500001"),
            date: date(2026, 1, 1),
            matchup: "CHI vs. MIA".to_string(),
            result: GameResult::Win,
            stats: line(points, rebounds, assists),
        }
    }

    /// Player games whose points follow `points`, most recent first.
    pub fn games_with_points(points: &[u32]) -> Vec<PlayerGame> {
        points
            .iter()
            .enumerate()
            .map(|(i, &pts)| {
                let mut game = player_game(pts, 5, 5);
                game.game_id = GameId(format!("00225{i:05}"));
                game
            })
            .collect()
    }

    /// Five games for one player, most recent first.
    pub fn sample_player_games() -> Vec<PlayerGame> {
        let rows: [(&str, NaiveDate, &str, GameResult, [u32; 12]); 5] = [
            ("001", date(2026, 1, 10), "CHI vs. MIA", GameResult::Win, [25, 5, 6, 2, 0, 2, 10, 20, 3, 8, 2, 3]),
            ("002", date(2026, 1, 8), "CHI @ BOS", GameResult::Loss, [18, 4, 4, 1, 1, 3, 7, 18, 2, 7, 2, 2]),
            ("003", date(2026, 1, 6), "CHI vs. NYK", GameResult::Win, [30, 6, 8, 2, 0, 1, 12, 22, 4, 9, 2, 3]),
            ("004", date(2026, 1, 4), "CHI @ LAL", GameResult::Loss, [22, 3, 5, 1, 1, 4, 9, 20, 2, 8, 2, 3]),
            ("005", date(2026, 1, 2), "CHI vs. GSW", GameResult::Win, [28, 7, 7, 3, 1, 2, 11, 21, 4, 10, 2, 2]),
        ];
        rows.into_iter()
            .map(|(id, date, matchup, result, s)| PlayerGame {
                game_id: GameId::from(id),
                date,
                matchup: matchup.to_string(),
                result,
                stats: StatLine {
                    points: s[0],
                    rebounds: s[1],
                    assists: s[2],
                    steals: s[3],
                    blocks: s[4],
                    turnovers: s[5],
                    fg_made: s[6],
                    fg_attempted: s[7],
                    fg3_made: s[8],
                    fg3_attempted: s[9],
                    ft_made: s[10],
                    ft_attempted: s[11],
                    minutes: "34:00".to_string(),
                },
            })
            .collect()
    }

    /// Three team games, most recent first.
    pub fn sample_games() -> Vec<GameRecord> {
        vec![
            GameRecord {
                game_id: GameId::from("0022500503"),
                date: date(2026, 1, 10),
                matchup: "CHI vs. MIA".to_string(),
                opponent: "MIA".to_string(),
                is_home: true,
                result: GameResult::Win,
                points: 112,
                plus_minus: 8,
            },
            GameRecord {
                game_id: GameId::from("0022500489"),
                date: date(2026, 1, 8),
                matchup: "CHI @ BOS".to_string(),
                opponent: "BOS".to_string(),
                is_home: false,
                result: GameResult::Loss,
                points: 98,
                plus_minus: -12,
            },
            GameRecord {
                game_id: GameId::from("0022500475"),
                date: date(2026, 1, 6),
                matchup: "CHI vs. NYK".to_string(),
                opponent: "NYK".to_string(),
                is_home: true,
                result: GameResult::Win,
                points: 105,
                plus_minus: 3,
            },
        ]
    }

    /// A box score player with a full stat line.
    pub fn box_player(id: u32, first: &str, family: &str, stats: StatLine) -> BoxScorePlayer {
        BoxScorePlayer {
            player_id: PlayerId(id),
            team_id: CHI,
            first_name: first.to_string(),
            family_name: family.to_string(),
            stats,
        }
    }

    /// Two-player Chicago box score.
    pub fn sample_box_score() -> Vec<BoxScorePlayer> {
        vec![
            box_player(
                1_629_632,
                "Coby",
                "White",
                StatLine {
                    points: 22,
                    rebounds: 4,
                    assists: 5,
                    steals: 1,
                    blocks: 0,
                    turnovers: 2,
                    fg_made: 8,
                    fg_attempted: 16,
                    fg3_made: 3,
                    fg3_attempted: 7,
                    ft_made: 3,
                    ft_attempted: 4,
                    minutes: "32:15".to_string(),
                },
            ),
            box_player(
                203_897,
                "Zach",
                "LaVine",
                StatLine {
                    points: 28,
                    rebounds: 6,
                    assists: 4,
                    steals: 2,
                    blocks: 1,
                    turnovers: 3,
                    fg_made: 10,
                    fg_attempted: 20,
                    fg3_made: 4,
                    fg3_attempted: 9,
                    ft_made: 4,
                    ft_attempted: 5,
                    minutes: "35:42".to_string(),
                },
            ),
        ]
    }

    /// A single shot.
    pub fn shot(zone: ShotZone, made: bool, game_id: &str) -> ShotRecord {
        let shot_type = if zone.is_three() {
            ShotType::Three
        } else {
            ShotType::Two
        };
        let (loc_x, loc_y) = zone.center();
        ShotRecord {
            loc_x,
            loc_y,
            made,
            shot_type,
            zone,
            distance: (loc_x.hypot(loc_y) / 10.0).round(),
            game_id: GameId::from(game_id),
            game_date: None,
            player_id: None,
            player_name: None,
            team_id: None,
            team_abbr: None,
        }
    }

    /// A shot tagged with shooter and team.
    pub fn tagged_shot(
        zone: ShotZone,
        made: bool,
        game_id: &str,
        player: (u32, &str),
        team: &str,
    ) -> ShotRecord {
        ShotRecord {
            player_id: Some(PlayerId(player.0)),
            player_name: Some(player.1.to_string()),
            team_abbr: Some(team.to_string()),
            ..shot(zone, made, game_id)
        }
    }

    /// Four shots across two games.
    pub fn sample_shots() -> Vec<ShotRecord> {
        vec![
            ShotRecord {
                loc_x: 0.0,
                loc_y: 50.0,
                distance: 2.0,
                ..shot(ShotZone::RestrictedArea, true, "0022500503")
            },
            ShotRecord {
                loc_x: 150.0,
                loc_y: 200.0,
                distance: 24.0,
                ..shot(ShotZone::RightCorner3, false, "0022500503")
            },
            ShotRecord {
                loc_x: -100.0,
                loc_y: 100.0,
                distance: 12.0,
                ..shot(ShotZone::MidRange, true, "0022500489")
            },
            ShotRecord {
                loc_x: 0.0,
                loc_y: 250.0,
                distance: 26.0,
                ..shot(ShotZone::AboveTheBreak3, true, "0022500489")
            },
        ]
    }
}
