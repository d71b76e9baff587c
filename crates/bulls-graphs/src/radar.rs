//! Radar comparison of players across metrics

use crate::renderer::{apply_styling, arc_points, draw_legend, parse_color, Chart};
use crate::{ChartConfig, ChartRenderer};
use bulls_analysis::SeasonAverages;
use bulls_common::{Metric, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;

/// Metrics compared when the caller does not choose any.
pub const DEFAULT_RADAR_METRICS: [Metric; 5] = [
    Metric::Points,
    Metric::Rebounds,
    Metric::Assists,
    Metric::Steals,
    Metric::FgPct,
];

/// A player's values on the radar axes
#[derive(Debug, Clone, PartialEq)]
pub struct RadarPlayer {
    /// Legend name
    pub name: String,
    /// Value per metric
    pub values: BTreeMap<Metric, f64>,
}

impl RadarPlayer {
    /// Per-game averages as radar values.
    pub fn from_averages(name: impl Into<String>, averages: &SeasonAverages) -> Self {
        let values = [
            (Metric::Points, averages.points),
            (Metric::Rebounds, averages.rebounds),
            (Metric::Assists, averages.assists),
            (Metric::Steals, averages.steals),
            (Metric::Blocks, averages.blocks),
            (Metric::FgPct, averages.fg_pct),
            (Metric::Fg3Pct, averages.fg3_pct),
        ]
        .into_iter()
        .collect();
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Players overlaid on shared metric axes
#[derive(Debug, Clone)]
pub struct RadarChart {
    /// Players to overlay
    pub players: Vec<RadarPlayer>,
    /// Requested axes
    pub metrics: Vec<Metric>,
    /// Scale each axis to 0-100 against the best player on it
    pub normalize: bool,
}

impl RadarChart {
    /// Radar over [`DEFAULT_RADAR_METRICS`], normalized.
    #[must_use]
    pub fn new(players: Vec<RadarPlayer>) -> Self {
        Self {
            players,
            metrics: DEFAULT_RADAR_METRICS.to_vec(),
            normalize: true,
        }
    }

    /// Requested metrics that every player has a value for.
    #[must_use]
    pub fn available_metrics(&self) -> Vec<Metric> {
        self.metrics
            .iter()
            .copied()
            .filter(|m| self.players.iter().all(|p| p.values.contains_key(m)))
            .collect()
    }

    /// Plotted values per player, in [`Self::available_metrics`] order.
    ///
    /// When normalizing, each axis is divided by its largest value (or 1 when
    /// that is not positive) and scaled to 100.
    #[must_use]
    pub fn scaled_values(&self) -> Vec<Vec<f64>> {
        let metrics = self.available_metrics();
        let max_by_metric: Vec<f64> = metrics
            .iter()
            .map(|m| {
                let max = self
                    .players
                    .iter()
                    .filter_map(|p| p.values.get(m).copied())
                    .fold(0.0_f64, f64::max);
                if max > 0.0 {
                    max
                } else {
                    1.0
                }
            })
            .collect();

        self.players
            .iter()
            .map(|player| {
                metrics
                    .iter()
                    .zip(&max_by_metric)
                    .map(|(m, max)| {
                        let value = player.values.get(m).copied().unwrap_or(0.0);
                        if self.normalize {
                            value / max * 100.0
                        } else {
                            value
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn placeholder<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
        message: &str,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let ink = parse_color(&config.style.colors.ink);
        let (width, height) = root.dim_in_pixel();
        let style = config
            .style
            .axis_font
            .desc()
            .color(&ink)
            .pos(Pos::new(HPos::Center, VPos::Center));
        #[allow(clippy::cast_possible_wrap)]
        root.draw_text(message, &style, ((width / 2) as i32, (height / 2) as i32))?;
        Ok(())
    }
}

/// Unit-circle position of axis `index` of `count`, starting at the top and going clockwise.
fn axis_point(index: usize, count: usize, radius: f64) -> (f64, f64) {
    let angle = (90.0 - 360.0 * index as f64 / count as f64).to_radians();
    (radius * angle.cos(), radius * angle.sin())
}

impl ChartRenderer for RadarChart {
    fn name(&self) -> &'static str {
        "radar chart"
    }

    fn has_data(&self) -> bool {
        // an empty radar still renders a placeholder canvas
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
        if self.players.is_empty() {
            return Self::placeholder(root, config, "No player data");
        }
        let metrics = self.available_metrics();
        if metrics.is_empty() {
            return Self::placeholder(root, config, "No metrics available");
        }

        let ink = parse_color(&config.style.colors.ink);
        let muted = parse_color(&config.style.colors.muted);
        let palette: Vec<RGBColor> = config
            .style
            .colors
            .series()
            .iter()
            .map(|c| parse_color(c))
            .collect();

        let title = if config.title.is_empty() {
            "Player Comparison"
        } else {
            config.title.as_str()
        };
        let mut chart: Chart<'_, DB> = ChartBuilder::on(root)
            .caption(title, config.style.title_font.bold().color(&ink))
            .margin(config.style.margins.top)
            .build_cartesian_2d(-1.4..1.4, -1.3..1.3)?;

        let values = self.scaled_values();
        let scale = if self.normalize {
            100.0
        } else {
            values.iter().flatten().copied().fold(0.0_f64, f64::max).max(1.0)
        };
        let count = metrics.len();

        for ring in 1..=5_u8 {
            let radius = f64::from(ring) / 5.0;
            chart.draw_series(std::iter::once(PathElement::new(
                arc_points((0.0, 0.0), radius, 0.0, 360.0),
                muted.mix(0.4).stroke_width(1),
            )))?;
        }
        chart.draw_series((0..count).map(|i| {
            PathElement::new(vec![(0.0, 0.0), axis_point(i, count, 1.0)], muted.mix(0.4).stroke_width(1))
        }))?;

        let label_style = config
            .style
            .axis_font
            .desc()
            .color(&ink)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(metrics.iter().enumerate().map(|(i, metric)| {
            Text::new(metric.label(), axis_point(i, count, 1.15), label_style.clone())
        }))?;

        for (p, (player, player_values)) in self.players.iter().zip(&values).enumerate() {
            let color = palette[p % palette.len()];
            let mut outline: Vec<(f64, f64)> = player_values
                .iter()
                .enumerate()
                .map(|(i, v)| axis_point(i, count, v / scale))
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                outline.clone(),
                color.mix(0.25).filled(),
            )))?;
            chart.draw_series(outline.iter().map(|&c| Circle::new(c, 6, color.filled())))?;
            outline.push(outline[0]);
            chart
                .draw_series(std::iter::once(PathElement::new(outline, color.stroke_width(3))))?
                .label(player.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
        }
        draw_legend(&mut chart, config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, values: &[(Metric, f64)]) -> RadarPlayer {
        RadarPlayer {
            name: name.to_string(),
            values: values.iter().copied().collect(),
        }
    }

    #[test]
    fn test_normalizes_against_best_player() {
        let chart = RadarChart {
            players: vec![
                player("A", &[(Metric::Points, 20.0), (Metric::Assists, 8.0)]),
                player("B", &[(Metric::Points, 10.0), (Metric::Assists, 0.0)]),
            ],
            metrics: vec![Metric::Points, Metric::Assists],
            normalize: true,
        };
        assert_eq!(
            chart.scaled_values(),
            vec![vec![100.0, 100.0], vec![50.0, 0.0]]
        );
    }

    #[test]
    fn test_zero_axis_does_not_divide_by_zero() {
        let chart = RadarChart {
            players: vec![player("A", &[(Metric::Steals, 0.0)])],
            metrics: vec![Metric::Steals],
            normalize: true,
        };
        assert_eq!(chart.scaled_values(), vec![vec![0.0]]);
    }

    #[test]
    fn test_only_shared_metrics_are_drawn() {
        let chart = RadarChart {
            players: vec![
                player("A", &[(Metric::Points, 20.0), (Metric::Blocks, 1.0)]),
                player("B", &[(Metric::Points, 10.0)]),
            ],
            metrics: vec![Metric::Points, Metric::Blocks],
            normalize: false,
        };
        assert_eq!(chart.available_metrics(), vec![Metric::Points]);
        assert_eq!(chart.scaled_values(), vec![vec![20.0], vec![10.0]]);
    }

    #[test]
    fn test_from_averages_covers_defaults() {
        let averages = SeasonAverages {
            games: 5,
            points: 24.6,
            rebounds: 5.0,
            assists: 6.0,
            steals: 1.8,
            blocks: 0.6,
            fg_pct: 49.1,
            fg3_pct: 35.0,
        };
        let chart = RadarChart::new(vec![RadarPlayer::from_averages("Coby White", &averages)]);
        assert_eq!(chart.available_metrics(), DEFAULT_RADAR_METRICS.to_vec());
    }

    #[test]
    fn test_axis_points_start_at_top() {
        let (x, y) = axis_point(0, 4, 1.0);
        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
        let (x, y) = axis_point(1, 4, 1.0);
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_empty_radar_still_renders() {
        let chart = RadarChart::new(Vec::new());
        assert!(chart.has_data());
        assert!(chart.available_metrics().len() == DEFAULT_RADAR_METRICS.len());
    }
}
