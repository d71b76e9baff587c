//! Normalized rows produced by the fetch layer.
//!
//! Records are plain values: built once per upstream row, read by the
//! aggregation and rendering layers, and dropped. Nothing here is persisted.

use crate::metric::Metric;
use crate::table::{FieldValue, Tabular};
use crate::types::{GameId, GameResult, PlayerId, ShotType, ShotZone, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Round to one decimal place, ties to even.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// `made / attempted * 100` rounded to one decimal. Zero attempts count as one.
#[must_use]
pub fn shooting_pct(made: u32, attempted: u32) -> f64 {
    round1(f64::from(made) / f64::from(attempted.max(1)) * 100.0)
}

/// True shooting percentage, `pts / (2 * (fga + 0.44 * fta)) * 100`.
///
/// Returns 0.0 when there were no shooting attempts.
#[must_use]
pub fn true_shooting_pct(points: f64, fga: f64, fta: f64) -> f64 {
    let attempts = 2.0 * 0.44f64.mul_add(fta, fga);
    if attempts > 0.0 {
        points / attempts * 100.0
    } else {
        0.0
    }
}

/// Effective field goal percentage, `(fgm + 0.5 * fg3m) / fga * 100`.
///
/// Returns 0.0 when there were no field goal attempts.
#[must_use]
pub fn effective_fg_pct(fgm: f64, fg3m: f64, fga: f64) -> f64 {
    if fga > 0.0 {
        0.5f64.mul_add(fg3m, fgm) / fga * 100.0
    } else {
        0.0
    }
}

/// Parse a minutes string ("32:15", "PT32M15.00S", "32") into decimal minutes.
#[must_use]
pub fn parse_minutes(raw: &str) -> f64 {
    let raw = raw.trim();
    if let Some((min, sec)) = raw.split_once(':') {
        let min: f64 = min.parse().unwrap_or(0.0);
        let sec: f64 = sec.parse().unwrap_or(0.0);
        return min + sec / 60.0;
    }
    if let Some(rest) = raw.strip_prefix("PT") {
        let (min, sec) = rest.split_once('M').unwrap_or(("0", rest));
        let min: f64 = min.parse().unwrap_or(0.0);
        let sec: f64 = sec.trim_end_matches('S').parse().unwrap_or(0.0);
        return min + sec / 60.0;
    }
    raw.parse().unwrap_or(0.0)
}

/// One team game from the game finder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game identifier
    pub game_id: GameId,
    /// Game date
    pub date: NaiveDate,
    /// Raw matchup text, e.g. "CHI vs. MIA" or "CHI @ BOS"
    pub matchup: String,
    /// Opponent abbreviation
    pub opponent: String,
    /// Whether the team played at home
    pub is_home: bool,
    /// Win or loss
    pub result: GameResult,
    /// Team points
    pub points: u32,
    /// Final point differential
    pub plus_minus: i32,
}

impl GameRecord {
    /// Split a matchup string into (home flag, opponent abbreviation).
    ///
    /// "vs." marks a home game, "@" an away game.
    #[must_use]
    pub fn parse_matchup(matchup: &str) -> (bool, String) {
        let is_home = matchup.contains("vs.");
        let marker = if is_home { "vs." } else { "@" };
        let opponent = matchup
            .rsplit(marker)
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        (is_home, opponent)
    }
}

impl Tabular for GameRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "game_id" => self.game_id.to_string().into(),
            "date" => self.date.into(),
            "matchup" => self.matchup.clone().into(),
            "opponent" => self.opponent.clone().into(),
            "is_home" => FieldValue::Number(if self.is_home { 1.0 } else { 0.0 }),
            "result" => self.result.code().into(),
            "points" => self.points.into(),
            "plus_minus" => self.plus_minus.into(),
            _ => return None,
        })
    }
}

/// Counting stats for one player in one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    /// Points
    pub points: u32,
    /// Total rebounds
    pub rebounds: u32,
    /// Assists
    pub assists: u32,
    /// Steals
    pub steals: u32,
    /// Blocks
    pub blocks: u32,
    /// Turnovers
    pub turnovers: u32,
    /// Field goals made
    pub fg_made: u32,
    /// Field goals attempted
    pub fg_attempted: u32,
    /// Three-pointers made
    pub fg3_made: u32,
    /// Three-pointers attempted
    pub fg3_attempted: u32,
    /// Free throws made
    pub ft_made: u32,
    /// Free throws attempted
    pub ft_attempted: u32,
    /// Minutes as reported ("32:15")
    pub minutes: String,
}

impl StatLine {
    /// Field goal percentage, one decimal.
    #[must_use]
    pub fn fg_pct(&self) -> f64 {
        shooting_pct(self.fg_made, self.fg_attempted)
    }

    /// Three-point percentage, one decimal.
    #[must_use]
    pub fn fg3_pct(&self) -> f64 {
        shooting_pct(self.fg3_made, self.fg3_attempted)
    }

    /// Free throw percentage, one decimal.
    #[must_use]
    pub fn ft_pct(&self) -> f64 {
        shooting_pct(self.ft_made, self.ft_attempted)
    }

    /// True shooting percentage.
    #[must_use]
    pub fn ts_pct(&self) -> f64 {
        true_shooting_pct(
            f64::from(self.points),
            f64::from(self.fg_attempted),
            f64::from(self.ft_attempted),
        )
    }

    /// Effective field goal percentage.
    #[must_use]
    pub fn efg_pct(&self) -> f64 {
        effective_fg_pct(
            f64::from(self.fg_made),
            f64::from(self.fg3_made),
            f64::from(self.fg_attempted),
        )
    }

    /// Value of the given metric.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Points => f64::from(self.points),
            Metric::Rebounds => f64::from(self.rebounds),
            Metric::Assists => f64::from(self.assists),
            Metric::Steals => f64::from(self.steals),
            Metric::Blocks => f64::from(self.blocks),
            Metric::Turnovers => f64::from(self.turnovers),
            Metric::FgMade => f64::from(self.fg_made),
            Metric::FgAttempted => f64::from(self.fg_attempted),
            Metric::Fg3Made => f64::from(self.fg3_made),
            Metric::Fg3Attempted => f64::from(self.fg3_attempted),
            Metric::FtMade => f64::from(self.ft_made),
            Metric::FtAttempted => f64::from(self.ft_attempted),
            Metric::FgPct => self.fg_pct(),
            Metric::Fg3Pct => self.fg3_pct(),
            Metric::FtPct => self.ft_pct(),
            Metric::TsPct => self.ts_pct(),
            Metric::EfgPct => self.efg_pct(),
            Metric::Minutes => parse_minutes(&self.minutes),
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        if name == "minutes" {
            return Some(self.minutes.clone().into());
        }
        name.parse::<Metric>()
            .ok()
            .map(|metric| FieldValue::Number(self.metric(metric)))
    }
}

/// One game for one player, most recent first in any list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGame {
    /// Game identifier
    pub game_id: GameId,
    /// Game date
    pub date: NaiveDate,
    /// Team matchup text
    pub matchup: String,
    /// Team result
    pub result: GameResult,
    /// The player's line
    pub stats: StatLine,
}

impl PlayerGame {
    /// Value of the given metric for this game.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        self.stats.metric(metric)
    }

    /// Opponent abbreviation parsed from the matchup.
    #[must_use]
    pub fn opponent(&self) -> String {
        GameRecord::parse_matchup(&self.matchup).1
    }
}

impl Tabular for PlayerGame {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "game_id" => Some(self.game_id.to_string().into()),
            "date" => Some(self.date.into()),
            "matchup" => Some(self.matchup.clone().into()),
            "opponent" => Some(self.opponent().into()),
            "result" => Some(self.result.code().into()),
            other => self.stats.field(other),
        }
    }
}

/// One player's line in a box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScorePlayer {
    /// Player identifier
    pub player_id: PlayerId,
    /// Team the player appeared for
    pub team_id: TeamId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub family_name: String,
    /// The player's line
    pub stats: StatLine,
}

impl BoxScorePlayer {
    /// "First Family" display name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }

    /// Case-insensitive full-name match.
    #[must_use]
    pub fn matches_name(&self, wanted: &str) -> bool {
        self.name().to_lowercase() == wanted.trim().to_lowercase()
    }

    /// Attach this line to the game it came from.
    #[must_use]
    pub fn to_player_game(&self, game: &GameRecord) -> PlayerGame {
        PlayerGame {
            game_id: game.game_id.clone(),
            date: game.date,
            matchup: game.matchup.clone(),
            result: game.result,
            stats: self.stats.clone(),
        }
    }
}

impl Tabular for BoxScorePlayer {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "player_id" => Some(FieldValue::Number(f64::from(self.player_id.0))),
            "name" => Some(self.name().into()),
            "first_name" => Some(self.first_name.clone().into()),
            "last_name" | "family_name" => Some(self.family_name.clone().into()),
            other => self.stats.field(other),
        }
    }
}

/// One field goal attempt with court location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    /// Horizontal position in tenths of feet, hoop at 0
    pub loc_x: f64,
    /// Vertical position in tenths of feet, hoop at 0
    pub loc_y: f64,
    /// Whether the shot went in
    pub made: bool,
    /// Two or three
    pub shot_type: ShotType,
    /// Basic zone
    pub zone: ShotZone,
    /// Distance in feet
    pub distance: f64,
    /// Game identifier
    pub game_id: GameId,
    /// Game date, when reported
    pub game_date: Option<NaiveDate>,
    /// Shooter, for team and league pulls
    pub player_id: Option<PlayerId>,
    /// Shooter name, for team and league pulls
    pub player_name: Option<String>,
    /// Shooter's team, for league pulls
    pub team_id: Option<TeamId>,
    /// Shooter's team abbreviation, for league pulls
    pub team_abbr: Option<String>,
}

impl ShotRecord {
    /// Points produced by this attempt.
    #[must_use]
    pub const fn points(&self) -> u32 {
        if self.made {
            self.shot_type.points()
        } else {
            0
        }
    }
}

impl Tabular for ShotRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "loc_x" => Some(self.loc_x.into()),
            "loc_y" => Some(self.loc_y.into()),
            "shot_made" => Some(FieldValue::Number(if self.made { 1.0 } else { 0.0 })),
            "shot_type" => Some(self.shot_type.to_string().into()),
            "shot_zone" => Some(self.zone.to_string().into()),
            "shot_distance" => Some(self.distance.into()),
            "game_id" => Some(self.game_id.to_string().into()),
            "game_date" => self.game_date.map(FieldValue::from),
            "player_name" => self.player_name.clone().map(FieldValue::from),
            "team_abbr" => self.team_abbr.clone().map(FieldValue::from),
            _ => None,
        }
    }
}
