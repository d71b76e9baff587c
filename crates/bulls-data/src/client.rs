//! HTTP client for the NBA stats API.
//!
//! Requests are sequential. Every stats request is preceded by a fixed pause
//! (`api.request_delay_ms`) to stay under the provider's informal rate
//! limit. There is no retry: a failed request surfaces as an error and the
//! caller decides whether to skip it.

use crate::models::{games_from_result_set, shots_from_result_set, BoxScoreResponse, StatsResponse};
use crate::source::{ShotQuery, StatsSource};
use async_trait::async_trait;
use bulls_common::{
    BoxScorePlayer, BullsError, GameId, GameRecord, PlayerId, Result, ShotRecord, TeamId,
};
use bulls_config::ApiConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ORIGIN, REFERER};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const SEASON_TYPE: &str = "Regular Season";
const LEAGUE_ID: &str = "00";

/// Stats API client with browser-like headers
#[derive(Debug, Clone)]
pub struct NbaStatsClient {
    client: Client,
    base_url: String,
    headshot_url_template: String,
    request_delay: Duration,
}

impl NbaStatsClient {
    /// Build a client from the API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Url::parse(&config.stats_base_url).map_err(|e| {
            BullsError::config_with_source(
                format!("Invalid stats base URL '{}'", config.stats_base_url),
                e,
            )
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers())
            .build()
            .map_err(|e| BullsError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.stats_base_url.trim_end_matches('/').to_string(),
            headshot_url_template: config.headshot_url_template.clone(),
            request_delay: config.request_delay(),
        })
    }

    /// Full URL of a stats endpoint.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Pause configured before each stats request.
    #[must_use]
    pub const fn request_delay(&self) -> Duration {
        self.request_delay
    }

    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn make_request(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Response> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let url = self.endpoint_url(endpoint);
        debug!("Sending request to {} with {} parameters", url, params.len());

        match self.client.get(&url).query(params).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Request successful: {}", response.status());
                Ok(response)
            }
            Ok(response) => {
                let status = response.status();
                error!("Stats API returned {}", status);
                Err(BullsError::api_with_status(
                    format!("{endpoint} returned {status}"),
                    status.as_u16(),
                ))
            }
            Err(e) if e.is_timeout() => {
                warn!("Request timeout: {}", e);
                Err(BullsError::network_with_source("Request timeout", e))
            }
            Err(e) => {
                error!("Request failed: {}", e);
                Err(e.into())
            }
        }
    }

    async fn request_json<T>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.make_request(endpoint, params).await?;
        let text = response
            .text()
            .await
            .map_err(|e| BullsError::network_with_source("Failed to read response body", e))?;
        serde_json::from_str(&text).map_err(|e| {
            BullsError::parse_with_source(format!("Unexpected {endpoint} payload"), e)
        })
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    headers.insert(
        HeaderName::from_static("x-nba-stats-origin"),
        HeaderValue::from_static("stats"),
    );
    headers.insert(
        HeaderName::from_static("x-nba-stats-token"),
        HeaderValue::from_static("true"),
    );
    headers
}

fn game_finder_params(team_id: TeamId, season: &str) -> Vec<(&'static str, String)> {
    vec![
        ("PlayerOrTeam", "T".to_string()),
        ("TeamID", team_id.to_string()),
        ("Season", season.to_string()),
        ("SeasonType", SEASON_TYPE.to_string()),
        ("LeagueID", LEAGUE_ID.to_string()),
    ]
}

fn box_score_params(game_id: &GameId) -> Vec<(&'static str, String)> {
    vec![
        ("GameID", game_id.to_string()),
        ("LeagueID", LEAGUE_ID.to_string()),
        ("StartPeriod", "0".to_string()),
        ("EndPeriod", "0".to_string()),
        ("StartRange", "0".to_string()),
        ("EndRange", "0".to_string()),
        ("RangeType", "0".to_string()),
    ]
}

fn shot_chart_params(query: &ShotQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("TeamID", query.team_id.to_string()),
        ("PlayerID", query.player_id.to_string()),
        ("Season", query.season.clone()),
        ("SeasonType", SEASON_TYPE.to_string()),
        ("LastNGames", query.last_n_games.unwrap_or(0).to_string()),
        ("ContextMeasure", "FGA".to_string()),
        ("LeagueID", LEAGUE_ID.to_string()),
    ];
    for zeroed in ["Month", "OpponentTeamID", "Period"] {
        params.push((zeroed, "0".to_string()));
    }
    for blank in [
        "DateFrom",
        "DateTo",
        "GameID",
        "GameSegment",
        "Location",
        "Outcome",
        "PlayerPosition",
        "RookieYear",
        "SeasonSegment",
        "VsConference",
        "VsDivision",
    ] {
        params.push((blank, String::new()));
    }
    params
}

#[async_trait]
impl StatsSource for NbaStatsClient {
    #[instrument(skip(self), fields(team_id = %team_id))]
    async fn league_game_finder(&self, team_id: TeamId, season: &str) -> Result<Vec<GameRecord>> {
        info!("Fetching games for season {}", season);
        let response: StatsResponse = self
            .request_json("leaguegamefinder", &game_finder_params(team_id, season))
            .await?;
        match response.primary() {
            Some(set) => games_from_result_set(set),
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self), fields(game_id = %game_id))]
    async fn box_score(&self, game_id: &GameId) -> Result<Vec<BoxScorePlayer>> {
        info!("Fetching box score");
        let response: BoxScoreResponse = self
            .request_json("boxscoretraditionalv3", &box_score_params(game_id))
            .await?;
        Ok(response.into_players())
    }

    #[instrument(skip(self), fields(team_id = %query.team_id, player_id = %query.player_id))]
    async fn shot_chart_detail(&self, query: &ShotQuery) -> Result<Vec<ShotRecord>> {
        info!("Fetching shot chart for season {}", query.season);
        let response: StatsResponse = self
            .request_json("shotchartdetail", &shot_chart_params(query))
            .await?;
        match response.primary() {
            Some(set) => shots_from_result_set(set),
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self), fields(player_id = %player_id))]
    async fn headshot(&self, player_id: PlayerId) -> Result<Vec<u8>> {
        let url = self
            .headshot_url_template
            .replace("{player_id}", &player_id.to_string());
        debug!("Fetching headshot from {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
