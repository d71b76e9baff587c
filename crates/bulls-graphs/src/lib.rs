//! # Bulls Graphs
//!
//! Chart rendering and social graphic composition for Bulls Analytics.
//!
//! Every chart implements [`ChartRenderer`] and draws through plotters onto a
//! bitmap backend, either straight to a PNG file or into memory. The
//! [`SocialGraphic`] builder composes text with plotters and pastes the
//! headshot with `image`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod bar;
pub mod court;
pub mod graphic;
pub mod line;
pub mod radar;
pub mod renderer;
pub mod scatter;
pub mod shot_chart;
pub mod types;

pub use bar::{Bar, BarChart, ComparisonChart, WinLossChart};
pub use court::{court_canvas, court_lines, zone_boundaries, CourtLine, COURT_X, COURT_Y};
pub use graphic::{GraphicLayout, SocialGraphic, StatSlot};
pub use line::{EfficiencyPoint, LineChart, LineSeriesData, RollingEfficiencyChart};
pub use radar::{RadarChart, RadarPlayer, DEFAULT_RADAR_METRICS};
pub use renderer::{data_ranges, heat_color, parse_color, ChartRenderer};
pub use scatter::{EfficiencyMatrixChart, ScatterChart, ScatterPoint};
pub use shot_chart::{
    AnnotationPosition, HeatCell, ShotAnnotation, ShotChart, ZoneLeadersChart, DEFAULT_HEAT_BINS,
};
pub use types::{ChartConfig, ColorScheme, FontConfig, GridConfig, MarginConfig, StyleConfig};
