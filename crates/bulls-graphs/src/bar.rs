//! Bar charts: single series, win/loss colored and grouped comparison

use crate::renderer::{
    apply_styling, build_chart, draw_legend, draw_mesh, index_label, parse_color, short_label,
    ChartRenderer,
};
use crate::ChartConfig;
use bulls_common::{Result, Tabular};
use plotters::coord::Shift;
use plotters::prelude::*;

/// One labeled bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label under the bar
    pub label: String,
    /// Bar height
    pub value: f64,
}

/// Pull `(label, value)` pairs from most-recent-first rows, oldest first.
///
/// Rows without a numeric `y` are skipped. Rows without an `x` value are
/// labeled by their position.
fn chronological_bars<T: Tabular>(rows: &[T], x: &str, y: &str) -> Vec<Bar> {
    rows.iter()
        .rev()
        .enumerate()
        .filter_map(|(i, row)| {
            let value = row.number(y)?;
            let label = row
                .text(x)
                .map_or_else(|| (i + 1).to_string(), |text| short_label(x, &text));
            Some(Bar { label, value })
        })
        .collect()
}

/// Value range including zero, with headroom above the tallest bar.
fn bar_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let top = if max > 0.0 { max * 1.15 } else { 1.0 };
    let bottom = if min < 0.0 { min * 1.15 } else { 0.0 };
    bottom..top
}

fn x_range(count: usize) -> std::ops::Range<f64> {
    -0.5..(count as f64 - 0.5)
}

/// Bar chart of one field over games, oldest on the left
#[derive(Debug, Clone)]
pub struct BarChart {
    /// Bars in display order
    pub bars: Vec<Bar>,
    /// Draw the most recent bar in full color
    pub highlight_last: bool,
    /// Dashed mean line with a legend entry
    pub show_average: bool,
}

impl BarChart {
    /// Bars from most-recent-first rows using the `x` field as labels and `y` as heights.
    pub fn from_rows<T: Tabular>(rows: &[T], x: &str, y: &str) -> Self {
        Self {
            bars: chronological_bars(rows, x, y),
            highlight_last: true,
            show_average: true,
        }
    }

    /// Mean bar height, `None` without bars.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.bars.is_empty() {
            None
        } else {
            Some(self.bars.iter().map(|b| b.value).sum::<f64>() / self.bars.len() as f64)
        }
    }
}

impl ChartRenderer for BarChart {
    fn name(&self) -> &'static str {
        "bar chart"
    }

    fn has_data(&self) -> bool {
        !self.bars.is_empty()
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
        let ink = parse_color(&colors.ink);
        let muted = parse_color(&colors.muted);
        let count = self.bars.len();

        let mut chart = build_chart(
            root,
            config,
            x_range(count),
            bar_range(self.bars.iter().map(|b| b.value)),
        )?;
        let labels: Vec<String> = self.bars.iter().map(|b| b.label.clone()).collect();
        let formatter: &dyn Fn(&f64) -> String = &|x| index_label(&labels, *x);
        draw_mesh(&mut chart, config, Some(formatter), count)?;

        chart.draw_series(self.bars.iter().enumerate().map(|(i, bar)| {
            let x = i as f64;
            let style = if self.highlight_last && i + 1 == count {
                primary.filled()
            } else {
                primary.mix(0.55).filled()
            };
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], style)
        }))?;
        chart.draw_series(self.bars.iter().enumerate().map(|(i, bar)| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], ink.stroke_width(1))
        }))?;

        if self.show_average {
            if let Some(avg) = self.average() {
                chart
                    .draw_series(DashedLineSeries::new(
                        vec![(-0.5, avg), (count as f64 - 0.5, avg)],
                        10,
                        6,
                        muted.stroke_width(2),
                    ))?
                    .label(format!("Avg: {avg:.1}"))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], muted.stroke_width(2))
                    });
                draw_legend(&mut chart, config)?;
            }
        }
        Ok(())
    }
}

/// Points per game colored by result
#[derive(Debug, Clone)]
pub struct WinLossChart {
    /// Bars in display order, each with its win flag
    pub bars: Vec<(Bar, bool)>,
}

impl WinLossChart {
    /// Bars from most-recent-first rows; `result` holds "W" or "L".
    pub fn from_rows<T: Tabular>(rows: &[T], x: &str, y: &str, result: &str) -> Self {
        let bars = rows
            .iter()
            .rev()
            .enumerate()
            .filter_map(|(i, row)| {
                let value = row.number(y)?;
                let label = row
                    .text(x)
                    .map_or_else(|| (i + 1).to_string(), |text| short_label(x, &text));
                let won = row
                    .text(result)
                    .is_some_and(|r| r.trim().eq_ignore_ascii_case("W"));
                Some((Bar { label, value }, won))
            })
            .collect();
        Self { bars }
    }

    /// Wins and losses shown.
    #[must_use]
    pub fn record(&self) -> (usize, usize) {
        let wins = self.bars.iter().filter(|(_, won)| *won).count();
        (wins, self.bars.len() - wins)
    }
}

impl ChartRenderer for WinLossChart {
    fn name(&self) -> &'static str {
        "win/loss chart"
    }

    fn has_data(&self) -> bool {
        !self.bars.is_empty()
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
        let win = parse_color(&colors.win);
        let loss = parse_color(&colors.loss);
        let ink = parse_color(&colors.ink);
        let count = self.bars.len();

        let mut chart = build_chart(
            root,
            config,
            x_range(count),
            bar_range(self.bars.iter().map(|(b, _)| b.value)),
        )?;
        let labels: Vec<String> = self.bars.iter().map(|(b, _)| b.label.clone()).collect();
        let formatter: &dyn Fn(&f64) -> String = &|x| index_label(&labels, *x);
        draw_mesh(&mut chart, config, Some(formatter), count)?;

        for (wanted, color, name) in [(true, win, "Win"), (false, loss, "Loss")] {
            chart
                .draw_series(
                    self.bars
                        .iter()
                        .enumerate()
                        .filter(|(_, (_, won))| *won == wanted)
                        .map(|(i, (bar, _))| {
                            let x = i as f64;
                            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], color.filled())
                        }),
                )?
                .label(name)
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
        }
        chart.draw_series(self.bars.iter().enumerate().map(|(i, (bar, _))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], ink.stroke_width(1))
        }))?;
        draw_legend(&mut chart, config)?;
        Ok(())
    }
}

/// Grouped bars comparing several series across shared categories
#[derive(Debug, Clone)]
pub struct ComparisonChart {
    /// Category labels along the x axis
    pub categories: Vec<String>,
    /// Named series, one value per category
    pub series: Vec<(String, Vec<f64>)>,
}

impl ComparisonChart {
    /// Series built directly from values.
    #[must_use]
    pub const fn new(categories: Vec<String>, series: Vec<(String, Vec<f64>)>) -> Self {
        Self { categories, series }
    }

    /// Long-form rows: one series per distinct `group` value.
    ///
    /// Categories are the sorted distinct `x` values. Groups keep their
    /// first-seen order and a missing category counts as zero.
    pub fn from_rows<T: Tabular>(rows: &[T], x: &str, y: &str, group: &str) -> Self {
        let mut categories: Vec<String> = rows.iter().filter_map(|r| r.text(x)).collect();
        categories.sort();
        categories.dedup();

        let mut groups: Vec<String> = Vec::new();
        for name in rows.iter().filter_map(|r| r.text(group)) {
            if !groups.contains(&name) {
                groups.push(name);
            }
        }

        let series = groups
            .into_iter()
            .map(|name| {
                let values = categories
                    .iter()
                    .map(|category| {
                        rows.iter()
                            .find(|r| {
                                r.text(group).as_deref() == Some(name.as_str())
                                    && r.text(x).as_deref() == Some(category.as_str())
                            })
                            .and_then(|r| r.number(y))
                            .unwrap_or(0.0)
                    })
                    .collect();
                (name, values)
            })
            .collect();

        Self { categories, series }
    }
}

impl ChartRenderer for ComparisonChart {
    fn name(&self) -> &'static str {
        "comparison chart"
    }

    fn has_data(&self) -> bool {
        !self.categories.is_empty() && !self.series.is_empty()
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
        let ink = parse_color(&config.style.colors.ink);
        let count = self.categories.len();
        let groups = self.series.len();
        let width = 0.8 / groups as f64;

        let mut chart = build_chart(
            root,
            config,
            x_range(count),
            bar_range(self.series.iter().flat_map(|(_, v)| v.iter().copied())),
        )?;
        let formatter: &dyn Fn(&f64) -> String = &|x| index_label(&self.categories, *x);
        draw_mesh(&mut chart, config, Some(formatter), count)?;

        for (g, (name, values)) in self.series.iter().enumerate() {
            let color = palette[g % palette.len()];
            let offset = (g as f64 - groups as f64 / 2.0 + 0.5) * width;
            chart
                .draw_series(values.iter().enumerate().map(|(i, &value)| {
                    let x = i as f64 + offset;
                    Rectangle::new([(x - width / 2.0, 0.0), (x + width / 2.0, value)], color.filled())
                }))?
                .label(name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
            chart.draw_series(values.iter().enumerate().map(|(i, &value)| {
                let x = i as f64 + offset;
                Rectangle::new(
                    [(x - width / 2.0, 0.0), (x + width / 2.0, value)],
                    ink.stroke_width(1),
                )
            }))?;
        }
        draw_legend(&mut chart, config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulls_common::test_utils::fixtures;
    use bulls_common::FieldValue;
    use std::collections::BTreeMap;

    fn row(player: &str, date: &str, points: f64) -> BTreeMap<String, FieldValue> {
        let mut row = BTreeMap::new();
        row.insert("player".to_string(), FieldValue::from(player));
        row.insert("date".to_string(), FieldValue::from(date));
        row.insert("points".to_string(), FieldValue::from(points));
        row
    }

    #[test]
    fn test_bars_are_chronological_with_short_dates() {
        let games = fixtures::sample_player_games();
        let chart = BarChart::from_rows(&games, "date", "points");
        assert_eq!(chart.bars.len(), games.len());
        let latest = chart.bars.last().unwrap();
        assert_eq!(latest.value, f64::from(games[0].stats.points));
        assert_eq!(latest.label, games[0].date.format("%m-%d").to_string());
    }

    #[test]
    fn test_rows_without_value_are_skipped() {
        let mut rows = vec![row("A", "2026-01-10", 20.0), row("A", "2026-01-08", 10.0)];
        rows[1].remove("points");
        let chart = BarChart::from_rows(&rows, "date", "points");
        assert_eq!(chart.bars, vec![Bar { label: "01-10".to_string(), value: 20.0 }]);
    }

    #[test]
    fn test_average() {
        let rows = vec![
            row("A", "2026-01-10", 30.0),
            row("A", "2026-01-08", 25.0),
            row("A", "2026-01-06", 20.0),
        ];
        let chart = BarChart::from_rows(&rows, "date", "points");
        assert_eq!(chart.average(), Some(25.0));
        assert!(BarChart::from_rows::<BTreeMap<String, FieldValue>>(&[], "date", "points")
            .average()
            .is_none());
    }

    #[test]
    fn test_bar_range_handles_negatives() {
        let range = bar_range([-10.0, 5.0].into_iter());
        assert!(range.start < -10.0);
        assert!(range.end > 5.0);
        assert_eq!(bar_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_win_loss_record() {
        let games = fixtures::sample_games();
        let chart = WinLossChart::from_rows(&games, "date", "points", "result");
        let wins = games.iter().filter(|g| g.result.is_win()).count();
        assert_eq!(chart.record(), (wins, games.len() - wins));
    }

    #[test]
    fn test_comparison_from_long_rows() {
        let rows = vec![
            row("Coby White", "2026-01-08", 20.0),
            row("Josh Giddey", "2026-01-08", 12.0),
            row("Coby White", "2026-01-10", 22.0),
        ];
        let chart = ComparisonChart::from_rows(&rows, "date", "points", "player");
        assert_eq!(chart.categories, vec!["2026-01-08", "2026-01-10"]);
        assert_eq!(chart.series[0], ("Coby White".to_string(), vec![20.0, 22.0]));
        assert_eq!(chart.series[1], ("Josh Giddey".to_string(), vec![12.0, 0.0]));
    }

    #[test]
    fn test_empty_comparison_has_no_data() {
        assert!(!ComparisonChart::new(vec![], vec![]).has_data());
        assert!(!ComparisonChart::new(vec!["a".into()], vec![]).has_data());
    }
}
