//! Stats API response models.
//!
//! The v2 endpoints (`leaguegamefinder`, `shotchartdetail`) answer with
//! `resultSets`: a list of tables, each a header row plus value rows. Columns
//! are located by header name, never by position. The v3 box score endpoint
//! answers with nested camelCase objects instead.

use crate::teams::team_by_id;
use bulls_common::{
    BoxScorePlayer, BullsError, GameId, GameRecord, GameResult, PlayerId, Result, ShotRecord,
    ShotType, ShotZone, StatLine, TeamId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

// ============================================================================
// Tabular result sets
// ============================================================================

/// Envelope of the v2 stats endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsResponse {
    /// Result tables
    #[serde(rename = "resultSets", default)]
    pub result_sets: Vec<ResultSet>,
}

impl StatsResponse {
    /// The first table, if the response has any.
    #[must_use]
    pub fn primary(&self) -> Option<&ResultSet> {
        self.result_sets.first()
    }
}

/// One table of a v2 response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultSet {
    /// Table name, e.g. "LeagueGameFinderResults"
    #[serde(default)]
    pub name: String,
    /// Column headers
    #[serde(default)]
    pub headers: Vec<String>,
    /// Value rows
    #[serde(rename = "rowSet", default)]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Iterate rows as header-addressable views.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.row_set.iter().map(move |values| Row {
            headers: &self.headers,
            values,
        })
    }

    /// Whether the table carries a column.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(BullsError::parse(format!(
                "result set '{}' is missing column {missing}",
                self.name
            ))),
            None => Ok(()),
        }
    }
}

/// A row viewed through its table's headers
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Raw value of a column; `None` when absent or null.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&'a Value> {
        let index = self.headers.iter().position(|h| h == column)?;
        self.values.get(index).filter(|v| !v.is_null())
    }

    /// Column as text. Numbers are rendered with their JSON formatting.
    #[must_use]
    pub fn text(&self, column: &str) -> Option<String> {
        match self.value(column)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Column as a float, accepting numeric strings.
    #[must_use]
    pub fn number(&self, column: &str) -> Option<f64> {
        match self.value(column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Column as an unsigned integer, rounding floats.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn unsigned(&self, column: &str) -> Option<u32> {
        self.number(column)
            .filter(|n| *n >= 0.0)
            .map(|n| n.round() as u32)
    }

    /// Column as a signed integer, rounding floats.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn signed(&self, column: &str) -> Option<i32> {
        self.number(column).map(|n| n.round() as i32)
    }

    /// Column as a date in either `YYYY-MM-DD` or `YYYYMMDD` form.
    #[must_use]
    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        parse_api_date(&self.text(column)?)
    }
}

/// Parse the dates the stats API emits.
#[must_use]
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y%m%d"))
        .ok()
}

/// Team games from a `LeagueGameFinderResults` table.
///
/// Rows without a result (games in progress) are skipped.
pub fn games_from_result_set(set: &ResultSet) -> Result<Vec<GameRecord>> {
    set.require_columns(&["GAME_ID", "GAME_DATE", "MATCHUP", "WL", "PTS"])?;
    let mut games = Vec::with_capacity(set.row_set.len());
    for row in set.rows() {
        let (Some(game_id), Some(date), Some(matchup)) = (
            row.text("GAME_ID"),
            row.date("GAME_DATE"),
            row.text("MATCHUP"),
        ) else {
            debug!("Skipping game row with missing id, date or matchup");
            continue;
        };
        let Some(result) = row.text("WL").and_then(|wl| wl.parse::<GameResult>().ok()) else {
            debug!(game_id = %game_id, "Skipping game without a result");
            continue;
        };
        let (is_home, opponent) = GameRecord::parse_matchup(&matchup);
        games.push(GameRecord {
            game_id: GameId(game_id),
            date,
            matchup,
            opponent,
            is_home,
            result,
            points: row.unsigned("PTS").unwrap_or(0),
            plus_minus: row.signed("PLUS_MINUS").unwrap_or(0),
        });
    }
    Ok(games)
}

/// Shots from a `Shot_Chart_Detail` table.
///
/// When the row names a known franchise the shot is tagged with its
/// abbreviation.
pub fn shots_from_result_set(set: &ResultSet) -> Result<Vec<ShotRecord>> {
    set.require_columns(&[
        "LOC_X",
        "LOC_Y",
        "SHOT_MADE_FLAG",
        "SHOT_TYPE",
        "SHOT_ZONE_BASIC",
    ])?;
    let shots = set
        .rows()
        .map(|row| {
            let team_id = row.unsigned("TEAM_ID").map(TeamId);
            ShotRecord {
                loc_x: row.number("LOC_X").unwrap_or(0.0),
                loc_y: row.number("LOC_Y").unwrap_or(0.0),
                made: row.unsigned("SHOT_MADE_FLAG") == Some(1),
                shot_type: ShotType::from_api(&row.text("SHOT_TYPE").unwrap_or_default()),
                zone: ShotZone::from(row.text("SHOT_ZONE_BASIC").unwrap_or_default()),
                distance: row.number("SHOT_DISTANCE").unwrap_or(0.0),
                game_id: GameId(row.text("GAME_ID").unwrap_or_default()),
                game_date: row.date("GAME_DATE"),
                player_id: row.unsigned("PLAYER_ID").map(PlayerId),
                player_name: row.text("PLAYER_NAME"),
                team_abbr: team_id
                    .and_then(team_by_id)
                    .map(|team| team.abbreviation.to_string()),
                team_id,
            }
        })
        .collect();
    Ok(shots)
}

// ============================================================================
// Box score v3
// ============================================================================

/// Envelope of `boxscoretraditionalv3`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxScoreResponse {
    /// The box score body
    pub box_score_traditional: BoxScoreBody,
}

/// Both teams of a box score
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxScoreBody {
    /// Game identifier
    pub game_id: String,
    /// Home side
    pub home_team: BoxScoreTeam,
    /// Away side
    pub away_team: BoxScoreTeam,
}

/// One side of a box score
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxScoreTeam {
    /// Franchise id
    pub team_id: u32,
    /// Abbreviation
    pub team_tricode: String,
    /// Players who appeared or were listed
    pub players: Vec<BoxScoreEntry>,
}

/// A player line in the v3 box score
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxScoreEntry {
    /// Player id
    pub person_id: u32,
    /// Given name
    pub first_name: String,
    /// Family name
    pub family_name: String,
    /// Counting stats
    pub statistics: BoxScoreStatistics,
}

/// Counting stats in the v3 box score
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct BoxScoreStatistics {
    pub minutes: String,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
    pub rebounds_total: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub points: u32,
}

impl From<&BoxScoreStatistics> for StatLine {
    fn from(s: &BoxScoreStatistics) -> Self {
        Self {
            points: s.points,
            rebounds: s.rebounds_total,
            assists: s.assists,
            steals: s.steals,
            blocks: s.blocks,
            turnovers: s.turnovers,
            fg_made: s.field_goals_made,
            fg_attempted: s.field_goals_attempted,
            fg3_made: s.three_pointers_made,
            fg3_attempted: s.three_pointers_attempted,
            ft_made: s.free_throws_made,
            ft_attempted: s.free_throws_attempted,
            minutes: s.minutes.clone(),
        }
    }
}

impl BoxScoreResponse {
    /// Every player from both sides, home side first.
    #[must_use]
    pub fn into_players(self) -> Vec<BoxScorePlayer> {
        let body = self.box_score_traditional;
        [body.home_team, body.away_team]
            .into_iter()
            .flat_map(|team| {
                let team_id = TeamId(team.team_id);
                team.players.into_iter().map(move |p| BoxScorePlayer {
                    player_id: PlayerId(p.person_id),
                    team_id,
                    stats: StatLine::from(&p.statistics),
                    first_name: p.first_name,
                    family_name: p.family_name,
                })
            })
            .collect()
    }
}
