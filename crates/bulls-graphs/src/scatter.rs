//! Scatter plots: free field pairs and the roster efficiency matrix

use crate::renderer::{apply_styling, build_chart, data_ranges, draw_mesh, heat_color, parse_color};
use crate::{ChartConfig, ChartRenderer};
use bulls_analysis::RosterEfficiency;
use bulls_common::{Result, Tabular};
use plotters::coord::Shift;
use plotters::prelude::*;

/// One scatter point with an optional annotation
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Horizontal value
    pub x: f64,
    /// Vertical value
    pub y: f64,
    /// Text drawn beside the point
    pub label: Option<String>,
}

/// `x` field against `y` field
#[derive(Debug, Clone)]
pub struct ScatterChart {
    /// Points to plot
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Points from any rows having both numeric fields; `label` names an annotation field.
    pub fn from_rows<T: Tabular>(rows: &[T], x: &str, y: &str, label: Option<&str>) -> Self {
        let points = rows
            .iter()
            .filter_map(|row| {
                Some(ScatterPoint {
                    x: row.number(x)?,
                    y: row.number(y)?,
                    label: label.and_then(|field| row.text(field)),
                })
            })
            .collect();
        Self { points }
    }
}

impl ChartRenderer for ScatterChart {
    fn name(&self) -> &'static str {
        "scatter chart"
    }

    fn has_data(&self) -> bool {
        !self.points.is_empty()
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
        let primary = parse_color(&config.style.colors.primary);
        let ink = parse_color(&config.style.colors.ink);

        let coords: Vec<(f64, f64)> = self.points.iter().map(|p| (p.x, p.y)).collect();
        let (x_min, x_max, y_min, y_max) = data_ranges(&coords);
        let mut chart = build_chart(root, config, x_min..x_max, y_min..y_max)?;
        draw_mesh(&mut chart, config, None, 10)?;

        chart.draw_series(
            coords
                .iter()
                .map(|&c| Circle::new(c, 9, primary.mix(0.6).filled())),
        )?;
        chart.draw_series(coords.iter().map(|&c| Circle::new(c, 9, ink.stroke_width(1))))?;

        let text = config.style.label_font.desc().color(&ink);
        chart.draw_series(self.points.iter().filter_map(|p| {
            p.label.as_ref().map(|label| {
                EmptyElement::at((p.x, p.y)) + Text::new(label.clone(), (12, -12), text.clone())
            })
        }))?;
        Ok(())
    }
}

/// Roster true shooting against volume, split by the roster averages
#[derive(Debug, Clone)]
pub struct EfficiencyMatrixChart {
    /// Players to plot
    pub players: Vec<RosterEfficiency>,
    /// League average TS% used to color points
    pub league_avg_ts: f64,
    /// Color points by TS% relative to the league average
    pub show_gradient: bool,
    /// Write player names beside their points
    pub show_names: bool,
}

impl EfficiencyMatrixChart {
    /// Matrix with colors and names turned on.
    #[must_use]
    pub const fn new(players: Vec<RosterEfficiency>, league_avg_ts: f64) -> Self {
        Self {
            players,
            league_avg_ts,
            show_gradient: true,
            show_names: true,
        }
    }

    /// Mean attempts per game and mean TS% across the plotted players.
    #[must_use]
    pub fn averages(&self) -> Option<(f64, f64)> {
        if self.players.is_empty() {
            return None;
        }
        let n = self.players.len() as f64;
        let fga = self.players.iter().map(|p| p.fga_per_game).sum::<f64>() / n;
        let ts = self.players.iter().map(|p| p.ts_pct).sum::<f64>() / n;
        Some((fga, ts))
    }

    /// Point color: ten TS% points either side of the league average spans the gradient.
    #[must_use]
    pub fn point_color(&self, ts_pct: f64, fallback: RGBColor) -> RGBColor {
        if self.show_gradient {
            heat_color((ts_pct - self.league_avg_ts + 10.0) / 20.0)
        } else {
            fallback
        }
    }
}

impl ChartRenderer for EfficiencyMatrixChart {
    fn name(&self) -> &'static str {
        "efficiency matrix"
    }

    fn has_data(&self) -> bool {
        !self.players.is_empty()
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
        let primary = parse_color(&config.style.colors.primary);
        let muted = parse_color(&config.style.colors.muted);
        let ink = parse_color(&config.style.colors.ink);

        let coords: Vec<(f64, f64)> = self
            .players
            .iter()
            .map(|p| (p.fga_per_game, p.ts_pct))
            .collect();
        let (x_min, x_max, y_min, y_max) = data_ranges(&coords);
        let mut chart = build_chart(root, config, x_min..x_max, y_min..y_max)?;
        draw_mesh(&mut chart, config, None, 10)?;

        if let Some((avg_fga, avg_ts)) = self.averages() {
            chart.draw_series(DashedLineSeries::new(
                vec![(avg_fga, y_min), (avg_fga, y_max)],
                10,
                6,
                muted.stroke_width(2),
            ))?;
            chart.draw_series(DashedLineSeries::new(
                vec![(x_min, avg_ts), (x_max, avg_ts)],
                10,
                6,
                muted.stroke_width(2),
            ))?;

            let corner = config.style.label_font.desc().color(&muted);
            let inset_x = (x_max - x_min) * 0.02;
            let inset_y = (y_max - y_min) * 0.04;
            let quadrants = [
                ("Low volume, efficient", (x_min + inset_x, y_max - inset_y)),
                ("High volume, efficient", (avg_fga + inset_x, y_max - inset_y)),
                ("Low volume, inefficient", (x_min + inset_x, y_min + inset_y)),
                ("High volume, inefficient", (avg_fga + inset_x, y_min + inset_y)),
            ];
            chart.draw_series(
                quadrants
                    .iter()
                    .map(|&(text, at)| Text::new(text, at, corner.clone())),
            )?;
        }

        chart.draw_series(self.players.iter().map(|p| {
            Circle::new(
                (p.fga_per_game, p.ts_pct),
                11,
                self.point_color(p.ts_pct, primary).filled(),
            )
        }))?;
        chart.draw_series(
            coords
                .iter()
                .map(|&c| Circle::new(c, 11, ink.stroke_width(1))),
        )?;

        if self.show_names {
            let text = config.style.label_font.desc().color(&ink);
            chart.draw_series(self.players.iter().map(|p| {
                EmptyElement::at((p.fga_per_game, p.ts_pct))
                    + Text::new(p.name.clone(), (14, -14), text.clone())
            }))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulls_analysis::roster_efficiency;
    use bulls_common::test_utils::fixtures;
    use bulls_common::PlayerId;

    fn player(name: &str, fga_per_game: f64, ts_pct: f64) -> RosterEfficiency {
        RosterEfficiency {
            player_id: PlayerId(1),
            name: name.to_string(),
            games: 5,
            points: 100,
            fga: 75,
            fta: 20,
            fga_per_game,
            ts_pct,
        }
    }

    #[test]
    fn test_scatter_from_rows() {
        let games = fixtures::sample_player_games();
        let chart = ScatterChart::from_rows(&games, "points", "assists", Some("opponent"));
        assert_eq!(chart.points.len(), 5);
        assert_eq!(chart.points[0].x, 25.0);
        assert_eq!(chart.points[0].y, 6.0);
        assert_eq!(chart.points[0].label.as_deref(), Some("MIA"));

        let unlabeled = ScatterChart::from_rows(&games, "points", "assists", None);
        assert!(unlabeled.points.iter().all(|p| p.label.is_none()));
        assert!(!ScatterChart::from_rows(&games, "points", "dunks", None).has_data());
    }

    #[test]
    fn test_matrix_averages() {
        let chart = EfficiencyMatrixChart::new(
            vec![player("A", 10.0, 60.0), player("B", 20.0, 50.0)],
            57.0,
        );
        assert_eq!(chart.averages(), Some((15.0, 55.0)));
        assert!(EfficiencyMatrixChart::new(Vec::new(), 57.0).averages().is_none());
    }

    #[test]
    fn test_point_color_toggle() {
        let mut chart = EfficiencyMatrixChart::new(vec![player("A", 10.0, 57.0)], 57.0);
        assert_eq!(chart.point_color(57.0, BLACK), heat_color(0.5));
        assert_eq!(chart.point_color(80.0, BLACK), heat_color(1.0));
        chart.show_gradient = false;
        assert_eq!(chart.point_color(80.0, BLACK), BLACK);
    }

    #[test]
    fn test_matrix_from_roster() {
        let box_scores = vec![fixtures::sample_box_score(), fixtures::sample_box_score()];
        let roster = roster_efficiency(&box_scores, 0.0);
        let chart = EfficiencyMatrixChart::new(roster, 57.0);
        assert!(chart.has_data());
        assert!(chart.players.iter().all(|p| p.games == 2));
    }
}
