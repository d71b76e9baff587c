//! Chart rendering trait and shared drawing helpers

use crate::ChartConfig;
use bulls_common::{BullsError, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;
use tracing::info;

/// f64 by f64 chart context used by every cartesian chart here.
pub type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Trait for charts that draw onto any plotters backend
pub trait ChartRenderer {
    /// Short name used in log lines and errors.
    fn name(&self) -> &'static str;

    /// Whether there is anything to plot.
    fn has_data(&self) -> bool;

    /// Draw the whole chart onto `root`, background included.
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static;

    /// Render to a PNG file, creating parent directories.
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        self.check_data()?;
        ensure_parent_dir(path)?;
        {
            let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
            self.draw(&root, config)?;
            root.present()?;
        }
        info!("Successfully rendered {} to {}", self.name(), path.display());
        Ok(())
    }

    /// Render to PNG bytes in memory.
    fn render_to_bytes(&self, config: &ChartConfig) -> Result<Vec<u8>> {
        self.check_data()?;
        let (width, height) = (config.width, config.height);
        let mut buffer = vec![0_u8; rgb_len(width, height)];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root, config)?;
            root.present()?;
        }
        encode_png(buffer, width, height)
    }

    /// Fail with a `Graph` error when there is nothing to plot.
    fn check_data(&self) -> Result<()> {
        if self.has_data() {
            Ok(())
        } else {
            Err(BullsError::graph(format!("No data to render for {}", self.name())))
        }
    }
}

/// Parse a `#RRGGBB` color string, defaulting to black.
#[must_use]
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.trim().strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

/// Byte length of an RGB buffer.
pub(crate) fn rgb_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Encode a raw RGB buffer as PNG.
pub(crate) fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| BullsError::graph("Pixel buffer does not match the canvas size"))?;
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Fill the canvas with the configured background.
pub(crate) fn apply_styling<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    root.fill(&parse_color(&config.style.background_color))?;
    Ok(())
}

/// Caption, margins and label areas around an f64 plot.
pub(crate) fn build_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    config: &ChartConfig,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<Chart<'a, DB>>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let ink = parse_color(&config.style.colors.ink);
    let margins = &config.style.margins;
    let chart = ChartBuilder::on(root)
        .caption(&config.title, config.style.title_font.bold().color(&ink))
        .margin_top(margins.top)
        .margin_right(margins.right)
        .margin_left(margins.top)
        .margin_bottom(margins.top)
        .x_label_area_size(margins.bottom)
        .y_label_area_size(margins.left)
        .build_cartesian_2d(x_range, y_range)?;
    Ok(chart)
}

/// Axis labels, descriptions and grid lines.
pub(crate) fn draw_mesh<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    config: &ChartConfig,
    x_formatter: Option<&dyn Fn(&f64) -> String>,
    x_labels: usize,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let ink = parse_color(&config.style.colors.ink);
    let grid = config
        .style
        .grid
        .color
        .as_deref()
        .map_or(RGBColor(200, 200, 200), parse_color);
    let text = config.style.axis_font.desc().color(&ink);

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(x_labels)
        .y_labels(10)
        .label_style(text.clone())
        .axis_desc_style(text)
        .bold_line_style(grid.mix(0.5).stroke_width(1))
        .light_line_style(grid.mix(0.15).stroke_width(1));
    if let Some(x_desc) = config.x_label.as_deref() {
        mesh.x_desc(x_desc);
    }
    if let Some(y_desc) = config.y_label.as_deref() {
        mesh.y_desc(y_desc);
    }
    if let Some(formatter) = x_formatter {
        mesh.x_label_formatter(formatter);
    }
    if !config.style.grid.show_x {
        mesh.disable_x_mesh();
    }
    if !config.style.grid.show_y {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;
    Ok(())
}

/// Legend box in the upper left corner.
pub(crate) fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    config: &ChartConfig,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let ink = parse_color(&config.style.colors.ink);
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85).filled())
        .border_style(ink.stroke_width(1))
        .label_font(config.style.label_font.desc().color(&ink))
        .draw()?;
    Ok(())
}

/// Min and max of both coordinates with 5% padding.
///
/// Returns `(0, 1, 0, 1)` for no points and widens flat spans by one unit.
#[must_use]
pub fn data_ranges(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    if points.is_empty() {
        return (0.0, 1.0, 0.0, 1.0);
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let pad = |min: f64, max: f64| {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            (min - 1.0, max + 1.0)
        } else {
            (min - span * 0.05, max + span * 0.05)
        }
    };
    let (x_min, x_max) = pad(x_min, x_max);
    let (y_min, y_max) = pad(y_min, y_max);
    (x_min, x_max, y_min, y_max)
}

/// Red through yellow to green for `t` in `[0, 1]`; values outside are clamped.
#[must_use]
pub fn heat_color(t: f64) -> RGBColor {
    const RED: (f64, f64, f64) = (215.0, 48.0, 39.0);
    const YELLOW: (f64, f64, f64) = (254.0, 224.0, 139.0);
    const GREEN: (f64, f64, f64) = (26.0, 152.0, 80.0);

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let (from, to, local) = if t < 0.5 {
        (RED, YELLOW, t * 2.0)
    } else {
        (YELLOW, GREEN, (t - 0.5) * 2.0)
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lerp = |a: f64, b: f64| (b - a).mul_add(local, a).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Display text for a category label; dates collapse to `MM-DD`.
#[must_use]
pub fn short_label(field: &str, text: &str) -> String {
    if field.to_lowercase().contains("date") && text.len() >= 10 && text.is_char_boundary(10) {
        text[5..10].to_string()
    } else {
        text.to_string()
    }
}

/// Maps whole-number x positions to `labels[i]` and blanks everything else.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn index_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Points on a circle arc in chart coordinates, angles in degrees.
#[must_use]
pub fn arc_points(center: (f64, f64), radius: f64, from_deg: f64, to_deg: f64) -> Vec<(f64, f64)> {
    const STEPS: usize = 72;
    (0..=STEPS)
        .map(|i| {
            let t = from_deg + (to_deg - from_deg) * (i as f64 / STEPS as f64);
            let rad = t.to_radians();
            (center.0 + radius * rad.cos(), center.1 + radius * rad.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockChart {
        empty: bool,
    }

    impl ChartRenderer for MockChart {
        fn name(&self) -> &'static str {
            "mock chart"
        }

        fn has_data(&self) -> bool {
            !self.empty
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
            root.draw(&Rectangle::new([(10, 10), (40, 30)], RED.filled()))?;
            Ok(())
        }
    }

    fn small_config() -> ChartConfig {
        ChartConfig::default().with_size(64, 48)
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_color("#CE1141"), RGBColor(206, 17, 65));
        assert_eq!(parse_color("#ffffff"), RGBColor(255, 255, 255));
        assert_eq!(parse_color("CE1141"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#GG0000"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#FFF"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_render_to_bytes_is_png() {
        let bytes = MockChart { empty: false }
            .render_to_bytes(&small_config())
            .unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (64, 48));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(20, 20).0, [255, 0, 0]);
    }

    #[test]
    fn test_render_to_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mock.png");
        MockChart { empty: false }
            .render_to_file(&small_config(), &path)
            .unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_empty_chart_is_graph_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let err = MockChart { empty: true }
            .render_to_file(&small_config(), &path)
            .unwrap_err();
        assert!(matches!(err, BullsError::Graph { .. }));
        assert!(!path.exists());
        assert!(MockChart { empty: true }
            .render_to_bytes(&small_config())
            .is_err());
    }

    #[test]
    fn test_data_ranges() {
        assert_eq!(data_ranges(&[]), (0.0, 1.0, 0.0, 1.0));

        let (x_min, x_max, y_min, y_max) = data_ranges(&[(0.0, 10.0), (10.0, 30.0)]);
        assert!((x_min + 0.5).abs() < 1e-9);
        assert!((x_max - 10.5).abs() < 1e-9);
        assert!((y_min - 9.0).abs() < 1e-9);
        assert!((y_max - 31.0).abs() < 1e-9);

        let (_, _, y_min, y_max) = data_ranges(&[(1.0, 5.0), (2.0, 5.0)]);
        assert!((y_min - 4.0).abs() < 1e-9);
        assert!((y_max - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(215, 48, 39));
        assert_eq!(heat_color(0.5), RGBColor(254, 224, 139));
        assert_eq!(heat_color(1.0), RGBColor(26, 152, 80));
        assert_eq!(heat_color(-3.0), heat_color(0.0));
        assert_eq!(heat_color(7.0), heat_color(1.0));
        assert_eq!(heat_color(f64::NAN), heat_color(0.0));
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("date", "2026-01-10"), "01-10");
        assert_eq!(short_label("GAME_DATE", "2026-01-10"), "01-10");
        assert_eq!(short_label("opponent", "MIA"), "MIA");
        assert_eq!(short_label("date", "Jan"), "Jan");
    }

    #[test]
    fn test_index_label() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(index_label(&labels, 0.0), "a");
        assert_eq!(index_label(&labels, 1.0), "b");
        assert_eq!(index_label(&labels, 0.5), "");
        assert_eq!(index_label(&labels, 2.0), "");
        assert_eq!(index_label(&labels, -1.0), "");
    }

    #[test]
    fn test_arc_points() {
        let points = arc_points((0.0, 0.0), 10.0, 0.0, 180.0);
        assert_eq!(points.len(), 73);
        assert!((points[0].0 - 10.0).abs() < 1e-9);
        assert!((points[72].0 + 10.0).abs() < 1e-9);
        assert!(points.iter().all(|&(x, y)| (x.hypot(y) - 10.0).abs() < 1e-9));
    }
}
