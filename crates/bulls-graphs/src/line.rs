//! Line charts over games

use crate::renderer::{
    apply_styling, build_chart, data_ranges, draw_legend, draw_mesh, index_label, parse_color,
    short_label, ChartRenderer,
};
use crate::ChartConfig;
use bulls_common::{Metric, Result, Tabular};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Legend and axis text for a field: the metric label when it is one.
fn field_title(field: &str) -> String {
    field.parse::<Metric>().map_or_else(
        |_| {
            let mut chars = field.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>().replace('_', " ")
            })
        },
        |metric| metric.label().to_string(),
    )
}

/// One named series of `(game index, value)` points
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesData {
    /// Legend name
    pub name: String,
    /// Points in chronological order
    pub points: Vec<(f64, f64)>,
}

/// One or more metrics over games, oldest on the left
#[derive(Debug, Clone)]
pub struct LineChart {
    /// Category labels by game index
    pub labels: Vec<String>,
    /// Series to draw
    pub series: Vec<LineSeriesData>,
    /// Draw a marker on every point
    pub show_markers: bool,
}

impl LineChart {
    /// Series for each `y` field from most-recent-first rows.
    pub fn from_rows<T: Tabular>(rows: &[T], x: &str, ys: &[&str]) -> Self {
        let labels = rows
            .iter()
            .rev()
            .enumerate()
            .map(|(i, row)| {
                row.text(x)
                    .map_or_else(|| (i + 1).to_string(), |text| short_label(x, &text))
            })
            .collect();
        let series = ys
            .iter()
            .map(|&y| LineSeriesData {
                name: field_title(y),
                points: rows
                    .iter()
                    .rev()
                    .enumerate()
                    .filter_map(|(i, row)| row.number(y).map(|v| (i as f64, v)))
                    .collect(),
            })
            .filter(|s| !s.points.is_empty())
            .collect();
        Self {
            labels,
            series,
            show_markers: true,
        }
    }
}

impl ChartRenderer for LineChart {
    fn name(&self) -> &'static str {
        "line chart"
    }

    fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.points.is_empty())
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
        let palette: Vec<RGBColor> = config
            .style
            .colors
            .series()
            .iter()
            .map(|c| parse_color(c))
            .collect();

        let all: Vec<(f64, f64)> = self.series.iter().flat_map(|s| s.points.clone()).collect();
        let (_, _, y_min, y_max) = data_ranges(&all);
        let count = self.labels.len();
        let mut chart = build_chart(root, config, -0.5..(count as f64 - 0.5), y_min..y_max)?;
        let formatter: &dyn Fn(&f64) -> String = &|x| index_label(&self.labels, *x);
        draw_mesh(&mut chart, config, Some(formatter), count)?;

        for (i, series) in self.series.iter().enumerate() {
            let color = palette[i % palette.len()];
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(3),
                ))?
                .label(series.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });
            if self.show_markers {
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 6, color.filled())),
                )?;
            }
        }
        draw_legend(&mut chart, config)?;
        Ok(())
    }
}

/// One game on a rolling efficiency chart
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyPoint {
    /// Category label
    pub label: String,
    /// Rolling efficiency value
    pub value: f64,
    /// Team won the game
    pub won: bool,
}

/// Rolling efficiency line with a league reference and result markers
#[derive(Debug, Clone)]
pub struct RollingEfficiencyChart {
    /// Points in chronological order
    pub points: Vec<EfficiencyPoint>,
    /// League average reference value
    pub league_avg: f64,
}

impl RollingEfficiencyChart {
    /// Points from most-recent-first rows holding `column` and a "result" field.
    pub fn from_rows<T: Tabular>(rows: &[T], column: &str, league_avg: f64) -> Self {
        let points = rows
            .iter()
            .rev()
            .enumerate()
            .filter_map(|(i, row)| {
                let value = row.number(column)?;
                let label = row
                    .text("date")
                    .map_or_else(|| (i + 1).to_string(), |text| short_label("date", &text));
                let won = row
                    .text("result")
                    .is_some_and(|r| r.trim().eq_ignore_ascii_case("W"));
                Some(EfficiencyPoint { label, value, won })
            })
            .collect();
        Self { points, league_avg }
    }
}

fn up_triangle(x: i32, y: i32, size: i32) -> Vec<(i32, i32)> {
    vec![(x, y - size), (x - size, y + size), (x + size, y + size)]
}

fn down_triangle(x: i32, y: i32, size: i32) -> Vec<(i32, i32)> {
    vec![(x, y + size), (x - size, y - size), (x + size, y - size)]
}

impl ChartRenderer for RollingEfficiencyChart {
    fn name(&self) -> &'static str {
        "rolling efficiency chart"
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
        let colors = &config.style.colors;
        let primary = parse_color(&colors.primary);
        let muted = parse_color(&colors.muted);
        let win = parse_color(&colors.win);
        let loss = parse_color(&colors.loss);

        let line: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value))
            .collect();
        let mut extent = line.clone();
        extent.push((0.0, self.league_avg));
        let (_, _, y_min, y_max) = data_ranges(&extent);
        let count = self.points.len();
        let last_x = count as f64 - 0.5;

        let mut chart = build_chart(root, config, -0.5..last_x, y_min..y_max)?;
        let labels: Vec<String> = self.points.iter().map(|p| p.label.clone()).collect();
        let formatter: &dyn Fn(&f64) -> String = &|x| index_label(&labels, *x);
        draw_mesh(&mut chart, config, Some(formatter), count)?;

        let league_avg = self.league_avg;
        chart
            .draw_series(DashedLineSeries::new(
                vec![(-0.5, league_avg), (last_x, league_avg)],
                10,
                6,
                muted.stroke_width(2),
            ))?
            .label(format!("League Avg ({league_avg:.1}%)"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], muted.stroke_width(2)));

        chart
            .draw_series(LineSeries::new(line.iter().copied(), primary.stroke_width(3)))?
            .label("Efficiency")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], primary.stroke_width(3)));

        for (won, color, name) in [(true, win, "Win"), (false, loss, "Loss")] {
            let shape = if won { up_triangle } else { down_triangle };
            chart
                .draw_series(
                    line.iter()
                        .zip(&self.points)
                        .filter(|(_, p)| p.won == won)
                        .map(|(&coord, _)| {
                            EmptyElement::at(coord) + Polygon::new(shape(0, 0, 8), color.filled())
                        }),
                )?
                .label(name)
                .legend(move |(x, y)| Polygon::new(shape(x + 8, y, 6), color.filled()));
        }
        draw_legend(&mut chart, config)?;
        Ok(())
    }
}
