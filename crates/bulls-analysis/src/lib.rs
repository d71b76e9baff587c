//! # Bulls Analysis
//!
//! Pure aggregation over fetched records.
//!
//! Every function here takes rows and returns a summary. Empty input never
//! raises: functions return `None`, an empty `Vec` or an empty map so that
//! callers can detect "nothing to plot" without error handling.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod averages;
pub mod consistency;
pub mod efficiency;
pub mod ranking;
pub mod rolling;
pub mod shooting;
pub mod stats;
pub mod trend;

pub use averages::{
    season_averages, team_summary, vs_average, window_averages, SeasonAverages, TeamSummary,
    VsAverage, WindowAverages,
};
pub use consistency::{consistency_score, Consistency, ConsistencyBands, ConsistencyCategory};
pub use efficiency::{
    efficiency_metrics, game_efficiency, roster_efficiency, EfficiencySummary, GameEfficiency,
    RosterEfficiency,
};
pub use ranking::{top_n, top_performers};
pub use rolling::{column_name, rolling_averages, rolling_mean, RollingRow, DEFAULT_WINDOWS};
pub use shooting::{
    high_value_zone_usage, league_pps_by_zone, points_per_shot, points_per_shot_by_zone,
    team_zone_comparison, zone_leaders, ShotValue, ZoneBreakdown, ZoneComparison, ZoneLeader,
    ZoneUsage, DEFAULT_HIGH_VALUE_ZONES,
};
pub use trend::{classify_trend, scoring_trend, TrendConfig, TrendDirection, TrendReport};

/// Metrics summarized when the caller does not choose any.
pub const DEFAULT_METRICS: [bulls_common::Metric; 3] = [
    bulls_common::Metric::Points,
    bulls_common::Metric::Rebounds,
    bulls_common::Metric::Assists,
];
