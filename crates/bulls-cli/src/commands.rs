//! Command handlers.
//!
//! Each handler fetches through the [`DataService`], runs the analysis
//! functions and writes a plain text report. Chart-producing commands also
//! write a PNG and print its path.

use crate::cli::Command;
use crate::error::{CliError, CliResult};
use crate::report;
use bulls_analysis::{
    consistency_score, efficiency_metrics, points_per_shot_by_zone, roster_efficiency,
    scoring_trend, season_averages, team_summary, top_n, top_performers, ConsistencyBands,
    TrendConfig, DEFAULT_METRICS,
};
use bulls_common::{GameId, Metric, PlayerId};
use bulls_config::Config;
use bulls_data::{DataService, StatsSource};
use bulls_graphs::{
    AnnotationPosition, BarChart, ChartConfig, ChartRenderer, EfficiencyMatrixChart, ShotChart,
    SocialGraphic,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Players listed under the latest game.
const LATEST_TOP_PLAYERS: usize = 5;

/// Configuration plus a data service, ready to run commands.
#[derive(Debug)]
pub struct App<S> {
    config: Config,
    service: DataService<S>,
}

impl<S: StatsSource> App<S> {
    /// Bundle a loaded configuration with a service.
    pub const fn new(config: Config, service: DataService<S>) -> Self {
        Self { config, service }
    }

    /// The loaded configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Run one command, writing its report to `out`.
    pub async fn run<W: Write>(&self, command: &Command, out: &mut W) -> CliResult<()> {
        info!(?command, "Running command");
        match command {
            Command::Latest => self.latest(out).await,
            Command::Games { last } => self.games(*last, out).await,
            Command::Player {
                name,
                last,
                metric,
                chart,
            } => self.player(name, *last, metric, chart.as_deref(), out).await,
            Command::BoxScore { game_id } => self.box_score(game_id.as_deref(), out).await,
            Command::Shots {
                player_id,
                last,
                heatmap,
                output,
            } => {
                self.shots(PlayerId(*player_id), *last, *heatmap, output.as_deref(), out)
                    .await
            }
            Command::Roster {
                last,
                min_fga,
                output,
            } => self.roster(*last, *min_fga, output.as_deref(), out).await,
            Command::Graphic { output } => self.graphic(output.as_deref(), out).await,
            Command::Verify => self.verify(out).await,
        }
    }

    fn output_path(&self, explicit: Option<&Path>, file_name: &str) -> PathBuf {
        explicit.map_or_else(
            || self.config.output.output_dir.join(file_name),
            Path::to_path_buf,
        )
    }

    fn chart_config(&self, title: impl Into<String>) -> ChartConfig {
        ChartConfig::from_graphs(&self.config.graphs).titled(title)
    }

    async fn latest<W: Write>(&self, out: &mut W) -> CliResult<()> {
        let game = self.service.get_latest_game().await?;
        writeln!(out, "Latest game")?;
        writeln!(out, "{}", report::game_line(&game))?;

        let players = self.service.get_box_score(&game.game_id).await?;
        if players.is_empty() {
            warn!(game_id = %game.game_id, "Box score is empty");
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "Top performers")?;
        for (i, player) in top_n(&players, LATEST_TOP_PLAYERS).iter().enumerate() {
            writeln!(out, "{}", report::player_line(i + 1, player))?;
        }
        Ok(())
    }

    async fn games<W: Write>(&self, last: Option<usize>, out: &mut W) -> CliResult<()> {
        let last = last.unwrap_or(self.config.analysis.recent_games);
        let games = self.service.get_games(Some(last), None).await?;
        let Some(summary) = team_summary(&games) else {
            return Err(CliError::NoData(format!(
                "No games found for {}",
                self.config.team.season
            )));
        };

        writeln!(out, "{} last {} games", self.config.team.name, games.len())?;
        for game in &games {
            writeln!(out, "{}", report::game_line(game))?;
        }
        writeln!(out)?;
        writeln!(out, "{}", report::team_summary(&summary))?;
        Ok(())
    }

    async fn player<W: Write>(
        &self,
        name: &str,
        last: Option<usize>,
        metric: &str,
        chart: Option<&Path>,
        out: &mut W,
    ) -> CliResult<()> {
        let metric: Metric = metric.parse()?;
        let analysis = &self.config.analysis;
        let last = last.unwrap_or(analysis.recent_games);
        let games = self.service.get_player_games(name, last, None).await?;
        if games.is_empty() {
            return Err(CliError::NoData(format!("No games found for {name}")));
        }

        writeln!(out, "{name}: last {} games", games.len())?;
        if let Some(averages) = season_averages(&games) {
            writeln!(out, "{}", report::averages(&averages))?;
        }

        let trend_config = TrendConfig {
            window: analysis.trend_window,
            threshold: analysis.trend_threshold,
        };
        if let Some(trend) = scoring_trend(&games, metric, &trend_config) {
            writeln!(out, "{}", report::trend(&trend))?;
        }

        let bands = ConsistencyBands {
            very_consistent: analysis.consistency.very_consistent,
            consistent: analysis.consistency.consistent,
            moderate: analysis.consistency.moderate,
        };
        let mut metrics = DEFAULT_METRICS.to_vec();
        if !metrics.contains(&metric) {
            metrics.push(metric);
        }
        writeln!(out)?;
        writeln!(out, "Consistency")?;
        for (m, score) in &consistency_score(&games, &metrics, &bands) {
            writeln!(out, "{}", report::consistency(*m, score))?;
        }

        if let Some(summary) = efficiency_metrics(&games) {
            writeln!(out)?;
            writeln!(out, "{}", report::efficiency(&summary))?;
        }

        if let Some(path) = chart {
            let mut chronological = games;
            chronological.reverse();
            let config = self
                .chart_config(format!("{name} {}", metric.label()))
                .with_labels("Game", metric.label());
            BarChart::from_rows(&chronological, "date", metric.name())
                .render_to_file(&config, path)?;
            writeln!(out, "Chart written to {}", path.display())?;
        }
        Ok(())
    }

    async fn box_score<W: Write>(&self, game_id: Option<&str>, out: &mut W) -> CliResult<()> {
        let game_id = match game_id {
            Some(id) => GameId::from(id),
            None => self.service.get_latest_game().await?.game_id,
        };
        let players = self.service.get_box_score(&game_id).await?;
        if players.is_empty() {
            return Err(CliError::NoData(format!(
                "No {} players in game {game_id}",
                self.config.team.abbreviation
            )));
        }

        writeln!(out, "Box score {game_id}")?;
        for (i, player) in top_performers(&players).iter().enumerate() {
            writeln!(out, "{}", report::player_line(i + 1, player))?;
        }
        Ok(())
    }

    async fn shots<W: Write>(
        &self,
        player_id: PlayerId,
        last: Option<u32>,
        heatmap: bool,
        output: Option<&Path>,
        out: &mut W,
    ) -> CliResult<()> {
        let shots = self
            .service
            .get_player_shots(player_id, None, None, last)
            .await?;
        let Some(breakdown) = points_per_shot_by_zone(&shots, true) else {
            return Err(CliError::NoData(format!("No shots found for player {player_id}")));
        };

        let shooter = shots
            .iter()
            .find_map(|s| s.player_name.clone())
            .unwrap_or_else(|| format!("Player {player_id}"));
        writeln!(out, "{shooter}: {} shots", shots.len())?;
        for line in report::zone_breakdown(&breakdown) {
            writeln!(out, "{line}")?;
        }

        let overall = &breakdown.overall;
        let callout = format!(
            "{}/{} FG ({:.1}%)  {:.2} PPS",
            overall.made, overall.total_shots, overall.fg_pct, overall.pps
        );
        let path = self.output_path(output, &format!("shots_{player_id}.png"));
        let config = self.chart_config(format!("{shooter} Shot Chart")).for_court();
        ShotChart::new(shots)
            .with_heatmap(heatmap)
            .annotate(callout, AnnotationPosition::TopLeft)
            .render_to_file(&config, &path)?;
        writeln!(out, "Chart written to {}", path.display())?;
        Ok(())
    }

    async fn roster<W: Write>(
        &self,
        last: Option<usize>,
        min_fga: Option<f64>,
        output: Option<&Path>,
        out: &mut W,
    ) -> CliResult<()> {
        let last = last.unwrap_or(self.config.analysis.recent_games);
        let min_fga = min_fga.unwrap_or(self.config.analysis.roster_min_fga);
        let box_scores = self.service.get_roster_box_scores(last).await?;
        let roster = roster_efficiency(&box_scores, min_fga);
        if roster.is_empty() {
            return Err(CliError::NoData(format!(
                "No players averaging {min_fga} FGA over {} games",
                box_scores.len()
            )));
        }

        writeln!(
            out,
            "{} roster efficiency over {} games",
            self.config.team.name,
            box_scores.len()
        )?;
        for player in &roster {
            writeln!(out, "{}", report::roster_row(player))?;
        }

        let path = self.output_path(output, "roster_efficiency.png");
        let config = self
            .chart_config(format!("{} Roster Efficiency", self.config.team.name))
            .with_labels("FGA per game", "TS%");
        EfficiencyMatrixChart::new(roster, self.config.graphs.league_avg_ts_pct)
            .render_to_file(&config, &path)?;
        writeln!(out, "Chart written to {}", path.display())?;
        Ok(())
    }

    async fn graphic<W: Write>(&self, output: Option<&Path>, out: &mut W) -> CliResult<()> {
        let game = self.service.get_latest_game().await?;
        let players = self.service.get_box_score(&game.game_id).await?;
        let Some(top) = top_n(&players, 1).into_iter().next() else {
            return Err(CliError::NoData(format!(
                "No box score for game {}",
                game.game_id
            )));
        };

        let headshot = self.service.get_player_headshot(top.player_id, None).await;
        let venue = if game.is_home { "vs" } else { "@" };
        let subtitle = format!(
            "{} {venue} {}  {}  {}",
            self.config.team.abbreviation,
            game.opponent,
            game.result,
            game.date.format("%b %-d, %Y")
        );
        let graphic =
            SocialGraphic::from_config("TOP PERFORMER", &self.config.graphic, &self.config.graphs)
                .subtitle(subtitle)
                .player_name(top.name().to_uppercase())
                .headshot(headshot)
                .stat("PTS", top.stats.points)
                .stat("REB", top.stats.rebounds)
                .stat("AST", top.stats.assists);

        let path = self.output_path(output, "top_performer.png");
        graphic.save(&path)?;
        writeln!(out, "{}", report::player_line(1, &top))?;
        writeln!(out, "Graphic written to {}", path.display())?;
        Ok(())
    }

    async fn verify<W: Write>(&self, out: &mut W) -> CliResult<()> {
        let team = &self.config.team;
        let config_check = self
            .config
            .validate()
            .map(|()| format!("team {} season {}", team.abbreviation, team.season))
            .map_err(|e| e.to_string());

        let output_dir = &self.config.output.output_dir;
        let output_check = std::fs::create_dir_all(output_dir)
            .map(|()| output_dir.display().to_string())
            .map_err(|e| e.to_string());

        let api_check = match self.service.get_latest_game().await {
            Ok(game) => self
                .service
                .get_box_score(&game.game_id)
                .await
                .map(|players| {
                    let top = top_n(&players, 1).into_iter().next().map_or_else(
                        || "no box score".to_string(),
                        |p| format!("top performer {} ({} PTS)", p.name(), p.stats.points),
                    );
                    format!("{} {}, {top}", game.date, game.matchup)
                })
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let checks = [
            ("configuration", config_check),
            ("output directory", output_check),
            ("latest game", api_check),
        ];
        let total = checks.len();
        let mut failed = 0;
        for (name, outcome) in &checks {
            match outcome {
                Ok(detail) => writeln!(out, "[OK]   {name}: {detail}")?,
                Err(reason) => {
                    failed += 1;
                    writeln!(out, "[FAIL] {name}: {reason}")?;
                }
            }
        }

        if failed > 0 {
            return Err(CliError::VerifyFailed { failed, total });
        }
        Ok(())
    }
}
