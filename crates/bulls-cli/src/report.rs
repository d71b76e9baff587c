//! Plain text formatting of command results.

use bulls_analysis::{
    Consistency, EfficiencySummary, RosterEfficiency, SeasonAverages, TeamSummary, TrendReport,
    ZoneBreakdown,
};
use bulls_common::{BoxScorePlayer, GameRecord, Metric};

/// Signed value with one decimal, e.g. "+4.2".
#[must_use]
pub fn signed(value: f64) -> String {
    format!("{value:+.1}")
}

/// One game as a single line: date, venue, opponent, result, score and margin.
#[must_use]
pub fn game_line(game: &GameRecord) -> String {
    let venue = if game.is_home { "vs" } else { "@" };
    format!(
        "{}  {:>2} {:<3}  {}  {:>3} ({:+})",
        game.date, venue, game.opponent, game.result, game.points, game.plus_minus
    )
}

/// One player's line from a box score.
#[must_use]
pub fn player_line(rank: usize, player: &BoxScorePlayer) -> String {
    let s = &player.stats;
    format!(
        "{rank:>2}. {:<24} {:>3} PTS {:>3} REB {:>3} AST  {}/{} FG  {}/{} 3PT  {} MIN",
        player.name(),
        s.points,
        s.rebounds,
        s.assists,
        s.fg_made,
        s.fg_attempted,
        s.fg3_made,
        s.fg3_attempted,
        s.minutes
    )
}

/// Record and per-game scoring.
#[must_use]
pub fn team_summary(summary: &TeamSummary) -> String {
    format!(
        "Record {}-{} ({:.1}%)  {:.1} PPG  {} avg margin over {} games",
        summary.wins,
        summary.losses,
        summary.win_pct,
        summary.points,
        signed(summary.plus_minus),
        summary.games
    )
}

/// Per-game averages.
#[must_use]
pub fn averages(avg: &SeasonAverages) -> String {
    format!(
        "{:.1} PTS  {:.1} REB  {:.1} AST  {:.1} STL  {:.1} BLK  {:.1} FG%  {:.1} 3P%  ({} games)",
        avg.points, avg.rebounds, avg.assists, avg.steals, avg.blocks, avg.fg_pct, avg.fg3_pct, avg.games
    )
}

/// Trend direction with the averages it was decided on.
#[must_use]
pub fn trend(report: &TrendReport) -> String {
    format!(
        "{} {} {}: recent {:.1} vs previous {:.1}, avg {:.1}, high {:.0}, low {:.0}, last {:.0}",
        report.metric.label(),
        report.direction.arrow(),
        report.direction,
        report.recent_avg,
        report.previous_avg,
        report.average,
        report.high,
        report.low,
        report.last_game
    )
}

/// Consistency of one metric.
#[must_use]
pub fn consistency(metric: Metric, score: &Consistency) -> String {
    format!(
        "{:<8} mean {:.1}  std {:.1}  cv {:.1}%  {}",
        metric.label(),
        score.mean,
        score.std_dev,
        score.cv_pct(),
        score.category
    )
}

/// Combined shooting efficiency.
#[must_use]
pub fn efficiency(summary: &EfficiencySummary) -> String {
    format!(
        "TS% {:.1}  eFG% {:.1}  over {} games",
        summary.ts_pct, summary.efg_pct, summary.games
    )
}

/// Points per shot, overall and by zone.
#[must_use]
pub fn zone_breakdown(breakdown: &ZoneBreakdown) -> Vec<String> {
    let overall = &breakdown.overall;
    let mut lines = vec![format!(
        "{:<24} {:.2} PPS  {}/{} ({:.1}%)",
        "Overall", overall.pps, overall.made, overall.total_shots, overall.fg_pct
    )];
    lines.extend(breakdown.by_zone.iter().map(|(zone, value)| {
        format!(
            "{:<24} {:.2} PPS  {}/{} ({:.1}%)",
            zone.as_str(),
            value.pps,
            value.made,
            value.total_shots,
            value.fg_pct
        )
    }));
    lines
}

/// One roster row: volume and true shooting.
#[must_use]
pub fn roster_row(player: &RosterEfficiency) -> String {
    format!(
        "{:<24} {:>5.1} FGA/G  {:>5.1} TS%  {:>4} PTS  {} games",
        player.name, player.fga_per_game, player.ts_pct, player.points, player.games
    )
}
