//! # Bulls Data
//!
//! Fetch layer for Bulls Analytics.
//!
//! [`NbaStatsClient`] talks to the NBA stats API and the headshot CDN.
//! [`DataService`] turns its raw answers into ordered, team-filtered records
//! and is generic over [`StatsSource`] so that it can run against an
//! in-memory source in tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod headshot;
pub mod models;
pub mod service;
pub mod source;
pub mod teams;

pub use client::NbaStatsClient;
pub use headshot::{decode_headshot, placeholder, DEFAULT_HEADSHOT_SIZE, PLACEHOLDER_GRAY};
pub use models::{BoxScoreResponse, ResultSet, StatsResponse};
pub use service::DataService;
pub use source::{ShotQuery, StatsSource};
pub use teams::{find_team, team_by_id, Team, NBA_TEAMS};
