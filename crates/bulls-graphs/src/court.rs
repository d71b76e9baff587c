//! Half-court geometry in shot chart coordinates.
//!
//! Units are tenths of feet with the hoop at the origin. The baseline sits at
//! `y = -47.5` and half court at `y = 422.5`.

use crate::renderer::{arc_points, Chart};
use bulls_common::Result;
use plotters::prelude::*;
use std::ops::Range;

/// Horizontal extent of the court.
pub const COURT_X: Range<f64> = -250.0..250.0;
/// Vertical extent of the court.
pub const COURT_Y: Range<f64> = -47.5..422.5;

const HOOP_RADIUS: f64 = 7.5;
const PAINT_HALF_WIDTH: f64 = 80.0;
const INNER_PAINT_HALF_WIDTH: f64 = 60.0;
const PAINT_HEIGHT: f64 = 190.0;
const BASELINE_Y: f64 = -47.5;
const FREE_THROW_Y: f64 = 142.5;
const FREE_THROW_RADIUS: f64 = 60.0;
const RESTRICTED_RADIUS: f64 = 40.0;
const CORNER_THREE_X: f64 = 220.0;
const CORNER_THREE_TOP: f64 = 92.5;
const THREE_RADIUS: f64 = 237.5;
const HALF_COURT_Y: f64 = 422.5;

/// One stroke of the court drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtLine {
    /// Polyline vertices
    pub points: Vec<(f64, f64)>,
    /// Drawn dashed in the original markings
    pub dashed: bool,
}

impl CourtLine {
    fn solid(points: Vec<(f64, f64)>) -> Self {
        Self {
            points,
            dashed: false,
        }
    }
}

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<(f64, f64)> {
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]
}

/// Angle where the three-point arc meets the corner lines.
fn three_arc_start_deg() -> f64 {
    (CORNER_THREE_X / THREE_RADIUS).acos().to_degrees()
}

/// Every line of the half court.
#[must_use]
pub fn court_lines() -> Vec<CourtLine> {
    let arc_start = three_arc_start_deg();
    vec![
        // hoop and backboard
        CourtLine::solid(arc_points((0.0, 0.0), HOOP_RADIUS, 0.0, 360.0)),
        CourtLine::solid(vec![(-30.0, -7.5), (30.0, -7.5)]),
        // paint
        CourtLine::solid(rectangle(
            -PAINT_HALF_WIDTH,
            BASELINE_Y,
            PAINT_HALF_WIDTH,
            BASELINE_Y + PAINT_HEIGHT,
        )),
        CourtLine::solid(rectangle(
            -INNER_PAINT_HALF_WIDTH,
            BASELINE_Y,
            INNER_PAINT_HALF_WIDTH,
            BASELINE_Y + PAINT_HEIGHT,
        )),
        // free throw circle
        CourtLine::solid(arc_points((0.0, FREE_THROW_Y), FREE_THROW_RADIUS, 0.0, 180.0)),
        CourtLine {
            points: arc_points((0.0, FREE_THROW_Y), FREE_THROW_RADIUS, 180.0, 360.0),
            dashed: true,
        },
        CourtLine::solid(arc_points((0.0, 0.0), RESTRICTED_RADIUS, 0.0, 180.0)),
        // three point line
        CourtLine::solid(vec![
            (-CORNER_THREE_X, BASELINE_Y),
            (-CORNER_THREE_X, CORNER_THREE_TOP),
        ]),
        CourtLine::solid(vec![
            (CORNER_THREE_X, BASELINE_Y),
            (CORNER_THREE_X, CORNER_THREE_TOP),
        ]),
        CourtLine::solid(arc_points(
            (0.0, 0.0),
            THREE_RADIUS,
            arc_start,
            180.0 - arc_start,
        )),
        // half court
        CourtLine::solid(arc_points((0.0, HALF_COURT_Y), 60.0, 180.0, 360.0)),
        CourtLine::solid(vec![(COURT_X.start, HALF_COURT_Y), (COURT_X.end, HALF_COURT_Y)]),
    ]
}

/// Approximate boundaries between the basic shot zones.
#[must_use]
pub fn zone_boundaries() -> Vec<CourtLine> {
    let dashed = |points| CourtLine {
        points,
        dashed: true,
    };
    vec![
        dashed(arc_points((0.0, 0.0), 48.0, 0.0, 360.0)),
        dashed(vec![(-PAINT_HALF_WIDTH, BASELINE_Y), (-PAINT_HALF_WIDTH, FREE_THROW_Y)]),
        dashed(vec![(PAINT_HALF_WIDTH, BASELINE_Y), (PAINT_HALF_WIDTH, FREE_THROW_Y)]),
        dashed(vec![(-200.0, BASELINE_Y), (-200.0, CORNER_THREE_TOP)]),
        dashed(vec![(200.0, BASELINE_Y), (200.0, CORNER_THREE_TOP)]),
    ]
}

/// Stroke every line onto a chart built over [`COURT_X`] by [`COURT_Y`].
pub(crate) fn draw_court<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    lines: &[CourtLine],
    color: RGBAColor,
    width: u32,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    for line in lines {
        if line.dashed {
            chart.draw_series(DashedLineSeries::new(
                line.points.iter().copied(),
                6,
                4,
                color.stroke_width(width),
            ))?;
        } else {
            chart.draw_series(LineSeries::new(
                line.points.iter().copied(),
                color.stroke_width(width),
            ))?;
        }
    }
    Ok(())
}

/// Canvas proportions that keep the court's aspect ratio.
#[must_use]
pub fn court_canvas(width: u32) -> (u32, u32) {
    let span_x = COURT_X.end - COURT_X.start;
    let span_y = COURT_Y.end - COURT_Y.start;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let height = (f64::from(width) * span_y / span_x).round() as u32;
    // caption band
    (width, height + 120)
}
