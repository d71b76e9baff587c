//! Shot location charts drawn over the half court

use crate::court::{court_lines, draw_court, zone_boundaries, COURT_X, COURT_Y};
use crate::renderer::{apply_styling, draw_legend, heat_color, parse_color, Chart};
use crate::{ChartConfig, ChartRenderer};
use bulls_analysis::ZoneLeader;
use bulls_common::{Result, ShotRecord};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Cells per side of the heat map grid.
pub const DEFAULT_HEAT_BINS: usize = 25;

/// Where a callout box sits on the court
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationPosition {
    /// Near half court, left
    TopLeft,
    /// Near half court, right
    TopRight,
    /// Under the baseline, left
    BottomLeft,
    /// Under the baseline, right
    BottomRight,
    /// Explicit court coordinate
    At(f64, f64),
}

impl AnnotationPosition {
    /// Court coordinate of the box center.
    #[must_use]
    pub const fn coord(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (-200.0, 380.0),
            Self::TopRight => (200.0, 380.0),
            Self::BottomLeft => (-200.0, -30.0),
            Self::BottomRight => (200.0, -30.0),
            Self::At(x, y) => (x, y),
        }
    }
}

/// Callout text such as "12/18 at the rim"
#[derive(Debug, Clone, PartialEq)]
pub struct ShotAnnotation {
    /// Box text
    pub text: String,
    /// Box placement
    pub position: AnnotationPosition,
}

/// One heat map cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCell {
    /// Lower left corner
    pub min: (f64, f64),
    /// Upper right corner
    pub max: (f64, f64),
    /// Attempts in the cell
    pub attempts: usize,
    /// Makes in the cell
    pub made: usize,
}

impl HeatCell {
    /// Made share of attempts, 0 to 1.
    #[must_use]
    pub fn fg_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f64 / self.attempts as f64
        }
    }
}

fn bin_index(value: f64, start: f64, end: f64, bins: usize) -> Option<usize> {
    if !(start..=end).contains(&value) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = ((value - start) / (end - start) * bins as f64).floor() as usize;
    Some(index.min(bins - 1))
}

/// Shot locations: makes and misses, or FG% by area
#[derive(Debug, Clone)]
pub struct ShotChart {
    /// Shots to plot
    pub shots: Vec<ShotRecord>,
    /// Draw binned FG% instead of individual shots
    pub heatmap: bool,
    /// Heat map cells per side
    pub bins: usize,
    /// Callout boxes
    pub annotations: Vec<ShotAnnotation>,
}

impl ShotChart {
    /// Scatter chart of `shots`.
    #[must_use]
    pub const fn new(shots: Vec<ShotRecord>) -> Self {
        Self {
            shots,
            heatmap: false,
            bins: DEFAULT_HEAT_BINS,
            annotations: Vec::new(),
        }
    }

    /// Switch to the heat map view.
    #[must_use]
    pub const fn with_heatmap(mut self, heatmap: bool) -> Self {
        self.heatmap = heatmap;
        self
    }

    /// Add a callout box.
    #[must_use]
    pub fn annotate(mut self, text: impl Into<String>, position: AnnotationPosition) -> Self {
        self.annotations.push(ShotAnnotation {
            text: text.into(),
            position,
        });
        self
    }

    /// Occupied cells of a `bins` by `bins` grid over the court.
    ///
    /// Shots outside the court limits are left out.
    #[must_use]
    pub fn heat_cells(&self) -> Vec<HeatCell> {
        let bins = self.bins.max(1);
        let mut counts = vec![(0_usize, 0_usize); bins * bins];
        for shot in &self.shots {
            let (Some(col), Some(row)) = (
                bin_index(shot.loc_x, COURT_X.start, COURT_X.end, bins),
                bin_index(shot.loc_y, COURT_Y.start, COURT_Y.end, bins),
            ) else {
                continue;
            };
            let cell = &mut counts[row * bins + col];
            cell.0 += 1;
            cell.1 += usize::from(shot.made);
        }

        let cell_w = (COURT_X.end - COURT_X.start) / bins as f64;
        let cell_h = (COURT_Y.end - COURT_Y.start) / bins as f64;
        counts
            .into_iter()
            .enumerate()
            .filter(|(_, (attempts, _))| *attempts > 0)
            .map(|(i, (attempts, made))| {
                let x0 = COURT_X.start + (i % bins) as f64 * cell_w;
                let y0 = COURT_Y.start + (i / bins) as f64 * cell_h;
                HeatCell {
                    min: (x0, y0),
                    max: (x0 + cell_w, y0 + cell_h),
                    attempts,
                    made,
                }
            })
            .collect()
    }

    fn draw_heatmap<DB: DrawingBackend>(
        &self,
        chart: &mut Chart<'_, DB>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let ink = parse_color(&config.style.colors.ink);
        chart.draw_series(self.heat_cells().into_iter().map(|cell| {
            Rectangle::new([cell.min, cell.max], heat_color(cell.fg_rate()).mix(0.8).filled())
        }))?;

        // color key near half court
        let steps: i32 = 20;
        let (key_x0, key_x1, key_y0, key_y1) = (110.0, 230.0, 395.0, 410.0);
        let step_w = (key_x1 - key_x0) / f64::from(steps);
        chart.draw_series((0..steps).map(|i| {
            let x = key_x0 + f64::from(i) * step_w;
            Rectangle::new(
                [(x, key_y0), (x + step_w, key_y1)],
                heat_color(f64::from(i) / f64::from(steps - 1)).filled(),
            )
        }))?;
        let text = config.style.label_font.desc().color(&ink);
        let below = text.pos(Pos::new(HPos::Center, VPos::Top));
        chart.draw_series([
            Text::new("0%", (key_x0, key_y0 - 4.0), below.clone()),
            Text::new("100%", (key_x1, key_y0 - 4.0), below),
            Text::new(
                "FG%",
                (key_x0 - 8.0, (key_y0 + key_y1) / 2.0),
                text.pos(Pos::new(HPos::Right, VPos::Center)),
            ),
        ])?;
        Ok(())
    }

    fn draw_scatter<'a, DB: DrawingBackend + 'a>(
        &self,
        chart: &mut Chart<'a, DB>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let win = parse_color(&config.style.colors.win);
        let loss = parse_color(&config.style.colors.loss);

        chart
            .draw_series(
                self.shots
                    .iter()
                    .filter(|s| !s.made)
                    .map(|s| Cross::new((s.loc_x, s.loc_y), 6, loss.mix(0.7).stroke_width(2))),
            )?
            .label("Miss")
            .legend(move |(x, y)| Cross::new((x + 8, y), 6, loss.stroke_width(2)));
        chart
            .draw_series(
                self.shots
                    .iter()
                    .filter(|s| s.made)
                    .map(|s| Circle::new((s.loc_x, s.loc_y), 6, win.mix(0.6).filled())),
            )?
            .label("Make")
            .legend(move |(x, y)| Circle::new((x + 8, y), 6, win.filled()));
        draw_legend(chart, config)
    }
}

/// Chart over the court limits with no axes.
fn build_court<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    config: &ChartConfig,
    fallback_title: &str,
) -> Result<Chart<'a, DB>>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let ink = parse_color(&config.style.colors.ink);
    let title = if config.title.is_empty() {
        fallback_title
    } else {
        config.title.as_str()
    };
    let chart = ChartBuilder::on(root)
        .caption(title, config.style.title_font.bold().color(&ink))
        .margin(config.style.margins.top)
        .build_cartesian_2d(COURT_X, COURT_Y)?;
    Ok(chart)
}

/// Centered text inside a filled, outlined box.
fn draw_boxed_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &mut Chart<'_, DB>,
    at: (f64, f64),
    text: &str,
    style: &TextStyle<'_>,
    fill: ShapeStyle,
    border: ShapeStyle,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let (w, h) = root.estimate_text_size(text, style)?;
    #[allow(clippy::cast_possible_wrap)]
    let (half_w, half_h) = ((w / 2) as i32 + 10, (h / 2) as i32 + 6);
    let corners = [(-half_w, -half_h), (half_w, half_h)];
    let centered = style.pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(std::iter::once(
        EmptyElement::at(at)
            + Rectangle::new(corners, fill)
            + Rectangle::new(corners, border)
            + Text::new(text.to_string(), (0, 0), centered),
    ))?;
    Ok(())
}

impl ChartRenderer for ShotChart {
    fn name(&self) -> &'static str {
        "shot chart"
    }

    fn has_data(&self) -> bool {
        !self.shots.is_empty()
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        apply_styling(root, config)?;
        let ink = parse_color(&config.style.colors.ink);
        let mut chart = build_court(root, config, "Shot Chart")?;

        if self.heatmap {
            self.draw_heatmap(&mut chart, config)?;
        }
        draw_court(&mut chart, &court_lines(), ink.to_rgba(), 2)?;
        if !self.heatmap {
            self.draw_scatter(&mut chart, config)?;
        }

        let callout = config.style.axis_font.bold().color(&ink);
        for annotation in &self.annotations {
            draw_boxed_text(
                root,
                &mut chart,
                annotation.position.coord(),
                &annotation.text,
                &callout,
                WHITE.mix(0.9).filled(),
                ink.stroke_width(2),
            )?;
        }
        Ok(())
    }
}

/// The zone leaders placed at their zones on the court
#[derive(Debug, Clone)]
pub struct ZoneLeadersChart {
    /// One leader per zone
    pub leaders: Vec<ZoneLeader>,
}

impl ZoneLeadersChart {
    /// Chart over `leaders`.
    #[must_use]
    pub const fn new(leaders: Vec<ZoneLeader>) -> Self {
        Self { leaders }
    }
}

/// Zone name sits above low zones and below deep ones.
fn zone_label_y(center_y: f64) -> f64 {
    if center_y < 200.0 {
        center_y + 60.0
    } else {
        center_y - 80.0
    }
}

impl ChartRenderer for ZoneLeadersChart {
    fn name(&self) -> &'static str {
        "zone leaders chart"
    }

    fn has_data(&self) -> bool {
        // an empty chart shows the court with a notice
        true
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        apply_styling(root, config)?;
        let colors = &config.style.colors;
        let ink = parse_color(&colors.ink);
        let muted = parse_color(&colors.muted);
        let primary = parse_color(&colors.primary);

        let mut chart = build_court(root, config, "Zone Leaders - Points Per Game")?;
        draw_court(&mut chart, &court_lines(), ink.to_rgba(), 2)?;
        draw_court(&mut chart, &zone_boundaries(), muted.mix(0.5), 1)?;

        let centered = Pos::new(HPos::Center, VPos::Center);
        if self.leaders.is_empty() {
            let notice = config.style.axis_font.desc().color(&ink).pos(centered);
            chart.draw_series(std::iter::once(Text::new(
                "No zone leaders data available",
                (0.0, 200.0),
                notice,
            )))?;
            return Ok(());
        }

        let name_style = config.style.label_font.bold().color(&ink);
        let ppg_style = config.style.label_font.bold().color(&WHITE);
        let zone_style = config
            .style
            .label_font
            .desc()
            .style(FontStyle::Italic)
            .color(&muted)
            .pos(centered);

        for leader in &self.leaders {
            let (x, y) = leader.zone.center();
            draw_boxed_text(
                root,
                &mut chart,
                (x, y),
                &leader.player_name,
                &name_style,
                WHITE.filled(),
                primary.stroke_width(2),
            )?;
            draw_boxed_text(
                root,
                &mut chart,
                (x, y - 60.0),
                &format!("{:.1} PPG", leader.ppg),
                &ppg_style,
                primary.filled(),
                ink.stroke_width(1),
            )?;
            chart.draw_series(std::iter::once(Text::new(
                leader.zone.to_string(),
                (x, zone_label_y(y)),
                zone_style.clone(),
            )))?;
        }
        Ok(())
    }
}
