//! Fetch operations over a [`StatsSource`].
//!
//! Every operation is sequential. Multi-request operations tolerate
//! per-item failures: the failing game or team is logged and skipped, and
//! the rest of the result is still returned.

use crate::client::NbaStatsClient;
use crate::headshot::{decode_headshot, placeholder, DEFAULT_HEADSHOT_SIZE};
use crate::source::{ShotQuery, StatsSource};
use crate::teams::{find_team, NBA_TEAMS};
use bulls_common::{
    BoxScorePlayer, BullsError, GameId, GameRecord, PlayerGame, PlayerId, Result, ShotRecord,
    TeamId,
};
use bulls_config::{Config, TeamConfig};
use image::RgbaImage;
use tracing::{debug, info, instrument, warn};

/// High-level fetch API for one team
#[derive(Debug, Clone)]
pub struct DataService<S> {
    source: S,
    team: TeamConfig,
}

impl DataService<NbaStatsClient> {
    /// Service backed by the live stats API.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = NbaStatsClient::new(&config.api)?;
        Ok(Self::new(client, config.team.clone()))
    }
}

impl<S: StatsSource> DataService<S> {
    /// Wrap a source for the configured team.
    pub const fn new(source: S, team: TeamConfig) -> Self {
        Self { source, team }
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The team this service fetches for.
    pub const fn team(&self) -> &TeamConfig {
        &self.team
    }

    fn season<'a>(&'a self, season: Option<&'a str>) -> &'a str {
        season.unwrap_or(&self.team.season)
    }

    /// Regular season games, most recent first, truncated to `last_n`.
    #[instrument(skip(self))]
    pub async fn get_games(
        &self,
        last_n: Option<usize>,
        season: Option<&str>,
    ) -> Result<Vec<GameRecord>> {
        let season = self.season(season);
        let mut games = self
            .source
            .league_game_finder(self.team.team_id(), season)
            .await?;
        games.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(n) = last_n {
            games.truncate(n);
        }
        debug!("Found {} games", games.len());
        Ok(games)
    }

    /// The most recent game of the current season.
    pub async fn get_latest_game(&self) -> Result<GameRecord> {
        self.get_games(Some(1), None)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BullsError::not_found("No games found for the current season"))
    }

    /// The configured team's lines from one game.
    #[instrument(skip(self), fields(game_id = %game_id))]
    pub async fn get_box_score(&self, game_id: &GameId) -> Result<Vec<BoxScorePlayer>> {
        let team_id = self.team.team_id();
        let players: Vec<BoxScorePlayer> = self
            .source
            .box_score(game_id)
            .await?
            .into_iter()
            .filter(|p| p.team_id == team_id)
            .collect();
        debug!("{} players for team {}", players.len(), team_id);
        Ok(players)
    }

    /// A player's recent games, most recent first.
    ///
    /// Walks up to `2 * last_n` team games so that missed games do not
    /// shorten the result, and stops once `last_n` games are found. Box
    /// scores that fail to load are skipped.
    #[instrument(skip(self))]
    pub async fn get_player_games(
        &self,
        player_name: &str,
        last_n: usize,
        season: Option<&str>,
    ) -> Result<Vec<PlayerGame>> {
        let games = self.get_games(Some(last_n * 2), season).await?;
        let mut found = Vec::new();

        for game in &games {
            if found.len() >= last_n {
                break;
            }
            let box_score = match self.get_box_score(&game.game_id).await {
                Ok(players) => players,
                Err(e) => {
                    warn!(game_id = %game.game_id, error = %e, "Could not fetch box score, skipping");
                    continue;
                }
            };
            if let Some(player) = box_score.iter().find(|p| p.matches_name(player_name)) {
                found.push(player.to_player_game(game));
            }
        }

        info!("Found {} games for {}", found.len(), player_name);
        Ok(found)
    }

    /// A player's field goal attempts.
    #[instrument(skip(self))]
    pub async fn get_player_shots(
        &self,
        player_id: PlayerId,
        team_id: Option<TeamId>,
        season: Option<&str>,
        last_n_games: Option<u32>,
    ) -> Result<Vec<ShotRecord>> {
        let team_id = team_id.unwrap_or_else(|| self.team.team_id());
        let query = ShotQuery::team(team_id, self.season(season))
            .with_player(player_id)
            .with_last_n_games(last_n_games);
        self.source.shot_chart_detail(&query).await
    }

    /// Every field goal attempt by a team, defaulting to the configured one.
    #[instrument(skip(self))]
    pub async fn get_team_shots(
        &self,
        team_id: Option<TeamId>,
        season: Option<&str>,
        last_n_games: Option<u32>,
    ) -> Result<Vec<ShotRecord>> {
        let team_id = team_id.unwrap_or_else(|| self.team.team_id());
        let query =
            ShotQuery::team(team_id, self.season(season)).with_last_n_games(last_n_games);
        self.source.shot_chart_detail(&query).await
    }

    /// League-wide shots, tagged with team id and abbreviation.
    ///
    /// Defaults to the previous season and all thirty teams. Unknown
    /// abbreviations and teams whose request fails are skipped.
    #[instrument(skip(self, teams))]
    pub async fn get_league_shots(
        &self,
        season: Option<&str>,
        teams: Option<&[&str]>,
    ) -> Result<Vec<ShotRecord>> {
        let season = season.unwrap_or(&self.team.previous_season);
        let wanted: Vec<&str> = teams.map_or_else(
            || NBA_TEAMS.iter().map(|t| t.abbreviation).collect(),
            <[&str]>::to_vec,
        );
        let total = wanted.len();
        let mut all_shots = Vec::new();
        let mut teams_with_shots = 0;

        for (i, abbr) in wanted.into_iter().enumerate() {
            let Some(team) = find_team(abbr) else {
                warn!("Unknown team abbreviation '{}', skipping", abbr);
                continue;
            };
            info!("[{}/{}] Fetching {}", i + 1, total, team.name);

            match self.get_team_shots(Some(team.id), Some(season), None).await {
                Ok(shots) if shots.is_empty() => debug!("No shots found for {}", team.abbreviation),
                Ok(shots) => {
                    debug!("{} shots for {}", shots.len(), team.abbreviation);
                    teams_with_shots += 1;
                    all_shots.extend(shots.into_iter().map(|shot| ShotRecord {
                        team_id: Some(team.id),
                        team_abbr: Some(team.abbreviation.to_string()),
                        ..shot
                    }));
                }
                Err(e) => {
                    warn!(team = team.abbreviation, error = %e, "Shot fetch failed, skipping");
                }
            }
        }

        info!("Total: {} shots from {} teams", all_shots.len(), teams_with_shots);
        Ok(all_shots)
    }

    /// Box scores of the team's last `last_n_games` games, one `Vec` per game.
    ///
    /// Games whose box score fails to load are skipped.
    #[instrument(skip(self))]
    pub async fn get_roster_box_scores(
        &self,
        last_n_games: usize,
    ) -> Result<Vec<Vec<BoxScorePlayer>>> {
        let games = self.get_games(Some(last_n_games), None).await?;
        let mut box_scores = Vec::with_capacity(games.len());
        for game in &games {
            match self.get_box_score(&game.game_id).await {
                Ok(players) if players.is_empty() => {}
                Ok(players) => box_scores.push(players),
                Err(e) => {
                    warn!(game_id = %game.game_id, error = %e, "Could not fetch box score, skipping");
                }
            }
        }
        Ok(box_scores)
    }

    /// A player's headshot resized to `size` (300×300 by default).
    ///
    /// Never fails: a gray placeholder of the same size stands in when the
    /// image cannot be fetched or decoded.
    #[instrument(skip(self))]
    pub async fn get_player_headshot(
        &self,
        player_id: PlayerId,
        size: Option<(u32, u32)>,
    ) -> RgbaImage {
        let size = size.unwrap_or(DEFAULT_HEADSHOT_SIZE);
        let decoded = match self.source.headshot(player_id).await {
            Ok(bytes) => decode_headshot(&bytes, size),
            Err(e) => Err(e),
        };
        decoded.unwrap_or_else(|e| {
            warn!(error = %e, "Headshot unavailable, using placeholder");
            placeholder(size)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bulls_common::test_utils::fixtures;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory source recording every call.
    #[derive(Default)]
    struct FakeSource {
        games: Vec<GameRecord>,
        box_scores: Vec<(GameId, Vec<BoxScorePlayer>)>,
        failing_games: HashSet<String>,
        shots: Vec<ShotRecord>,
        failing_teams: HashSet<TeamId>,
        headshot: Option<Vec<u8>>,
        shot_queries: Mutex<Vec<ShotQuery>>,
        box_score_calls: Mutex<usize>,
    }

    #[async_trait]
    impl StatsSource for FakeSource {
        async fn league_game_finder(
            &self,
            _team_id: TeamId,
            _season: &str,
        ) -> Result<Vec<GameRecord>> {
            Ok(self.games.clone())
        }

        async fn box_score(&self, game_id: &GameId) -> Result<Vec<BoxScorePlayer>> {
            *self.box_score_calls.lock().unwrap() += 1;
            if self.failing_games.contains(game_id.as_str()) {
                return Err(BullsError::network("connection reset"));
            }
            Ok(self
                .box_scores
                .iter()
                .find(|(id, _)| id == game_id)
                .map(|(_, players)| players.clone())
                .unwrap_or_default())
        }

        async fn shot_chart_detail(&self, query: &ShotQuery) -> Result<Vec<ShotRecord>> {
            self.shot_queries.lock().unwrap().push(query.clone());
            if self.failing_teams.contains(&query.team_id) {
                return Err(BullsError::api_with_status("busy", 503));
            }
            Ok(self.shots.clone())
        }

        async fn headshot(&self, _player_id: PlayerId) -> Result<Vec<u8>> {
            self.headshot
                .clone()
                .ok_or_else(|| BullsError::not_found("no headshot"))
        }
    }

    fn service(source: FakeSource) -> DataService<FakeSource> {
        DataService::new(source, TeamConfig::default())
    }

    fn shuffled_games() -> Vec<GameRecord> {
        let mut games = fixtures::sample_games();
        games.swap(0, 2);
        games
    }

    fn opponent(team: u32, name: &str) -> BoxScorePlayer {
        BoxScorePlayer {
            team_id: TeamId(team),
            ..fixtures::box_player(1, name, "Opponent", fixtures::line(40, 10, 10))
        }
    }

    #[tokio::test]
    async fn test_games_sorted_and_truncated() {
        let data = service(FakeSource {
            games: shuffled_games(),
            ..FakeSource::default()
        });
        let games = data.get_games(None, None).await.unwrap();
        assert!(games.windows(2).all(|w| w[0].date >= w[1].date));

        let games = data.get_games(Some(2), None).await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id.as_str(), "0022500503");
    }

    #[tokio::test]
    async fn test_latest_game() {
        let data = service(FakeSource {
            games: shuffled_games(),
            ..FakeSource::default()
        });
        let latest = data.get_latest_game().await.unwrap();
        assert_eq!(latest.opponent, "MIA");
        assert!(latest.is_home);

        let empty = service(FakeSource::default());
        let err = empty.get_latest_game().await.unwrap_err();
        assert!(matches!(err, BullsError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_box_score_filters_to_team() {
        let game_id = GameId::from("0022500503");
        let mut players = fixtures::sample_box_score();
        players.push(opponent(1_610_612_748, "Miami"));
        let data = service(FakeSource {
            box_scores: vec![(game_id.clone(), players)],
            ..FakeSource::default()
        });
        let box_score = data.get_box_score(&game_id).await.unwrap();
        assert_eq!(box_score.len(), 2);
        assert!(box_score.iter().all(|p| p.team_id == fixtures::CHI));
    }

    #[tokio::test]
    async fn test_player_games_skips_failures() {
        let games = fixtures::sample_games();
        let box_scores = games
            .iter()
            .map(|g| (g.game_id.clone(), fixtures::sample_box_score()))
            .collect();
        let data = service(FakeSource {
            games,
            box_scores,
            failing_games: HashSet::from(["0022500489".to_string()]),
            ..FakeSource::default()
        });

        let found = data.get_player_games("COBY WHITE", 5, None).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].game_id.as_str(), "0022500503");
        assert_eq!(found[1].game_id.as_str(), "0022500475");
        assert_eq!(found[0].stats.points, 22);

        let missing = data.get_player_games("Nobody Here", 5, None).await.unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_player_games_stops_at_last_n() {
        let games = fixtures::sample_games();
        let box_scores = games
            .iter()
            .map(|g| (g.game_id.clone(), fixtures::sample_box_score()))
            .collect();
        let data = service(FakeSource {
            games,
            box_scores,
            ..FakeSource::default()
        });

        let found = data.get_player_games("Zach LaVine", 1, None).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(*data.source().box_score_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_shot_queries() {
        let data = service(FakeSource {
            shots: fixtures::sample_shots(),
            ..FakeSource::default()
        });
        let shots = data
            .get_player_shots(PlayerId(1_629_632), None, None, Some(10))
            .await
            .unwrap();
        assert_eq!(shots.len(), 4);
        data.get_team_shots(None, Some("2024-25"), None).await.unwrap();

        let queries = data.source().shot_queries.lock().unwrap();
        assert_eq!(queries[0].player_id, PlayerId(1_629_632));
        assert_eq!(queries[0].team_id, fixtures::CHI);
        assert_eq!(queries[0].season, "2025-26");
        assert_eq!(queries[0].last_n_games, Some(10));
        assert_eq!(queries[1].player_id, PlayerId(0));
        assert_eq!(queries[1].season, "2024-25");
    }

    #[tokio::test]
    async fn test_league_shots_tagged_and_tolerant() {
        let data = service(FakeSource {
            shots: fixtures::sample_shots(),
            failing_teams: HashSet::from([TeamId(1_610_612_738)]),
            ..FakeSource::default()
        });
        let shots = data
            .get_league_shots(None, Some(&["CHI", "BOS", "XYZ", "lal"]))
            .await
            .unwrap();
        assert_eq!(shots.len(), 8);
        let teams: HashSet<&str> = shots.iter().filter_map(|s| s.team_abbr.as_deref()).collect();
        assert_eq!(teams, HashSet::from(["CHI", "LAL"]));

        let queries = data.source().shot_queries.lock().unwrap();
        assert_eq!(queries.len(), 3);
        assert!(queries.iter().all(|q| q.season == "2024-25"));
    }

    #[tokio::test]
    async fn test_roster_box_scores() {
        let games = fixtures::sample_games();
        let box_scores = games
            .iter()
            .map(|g| (g.game_id.clone(), fixtures::sample_box_score()))
            .collect();
        let data = service(FakeSource {
            games,
            box_scores,
            failing_games: HashSet::from(["0022500475".to_string()]),
            ..FakeSource::default()
        });
        let roster = data.get_roster_box_scores(3).await.unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[tokio::test]
    async fn test_headshot_placeholder() {
        let data = service(FakeSource::default());
        let img = data.get_player_headshot(PlayerId(1), None).await;
        assert_eq!(img.dimensions(), (300, 300));
        assert_eq!(*img.get_pixel(0, 0), crate::headshot::PLACEHOLDER_GRAY);

        let garbage = service(FakeSource {
            headshot: Some(b"garbage".to_vec()),
            ..FakeSource::default()
        });
        let img = garbage.get_player_headshot(PlayerId(1), Some((64, 64))).await;
        assert_eq!(img.dimensions(), (64, 64));
    }
}
