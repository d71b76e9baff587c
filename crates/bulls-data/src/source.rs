//! The upstream seam: anything that can answer the four stats queries.

use async_trait::async_trait;
use bulls_common::{BoxScorePlayer, GameId, GameRecord, PlayerId, Result, ShotRecord, TeamId};

/// Parameters of a shot chart query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotQuery {
    /// Team whose shots are wanted
    pub team_id: TeamId,
    /// Shooter; `PlayerId(0)` means every player on the team
    pub player_id: PlayerId,
    /// Season, "YYYY-YY"
    pub season: String,
    /// Restrict to the team's last N games; `None` for the whole season
    pub last_n_games: Option<u32>,
}

impl ShotQuery {
    /// Query for all of a team's shots.
    pub fn team(team_id: TeamId, season: impl Into<String>) -> Self {
        Self {
            team_id,
            player_id: PlayerId(0),
            season: season.into(),
            last_n_games: None,
        }
    }

    /// Narrow to one shooter.
    #[must_use]
    pub const fn with_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = player_id;
        self
    }

    /// Narrow to the last N games.
    #[must_use]
    pub const fn with_last_n_games(mut self, last_n_games: Option<u32>) -> Self {
        self.last_n_games = last_n_games;
        self
    }
}

/// Raw access to the stats provider.
///
/// Implementations return rows as the provider reports them; ordering,
/// filtering and failure tolerance belong to [`crate::DataService`].
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Regular season games for a team.
    async fn league_game_finder(&self, team_id: TeamId, season: &str) -> Result<Vec<GameRecord>>;

    /// Every player line from both teams of one game.
    async fn box_score(&self, game_id: &GameId) -> Result<Vec<BoxScorePlayer>>;

    /// Field goal attempts matching the query.
    async fn shot_chart_detail(&self, query: &ShotQuery) -> Result<Vec<ShotRecord>>;

    /// Encoded headshot image.
    async fn headshot(&self, player_id: PlayerId) -> Result<Vec<u8>>;
}
