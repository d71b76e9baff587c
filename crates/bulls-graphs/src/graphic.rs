//! Portrait social media graphic: headline, headshot, name and a stats grid.

use crate::renderer::{encode_png, ensure_parent_dir, parse_color, rgb_len};
use bulls_common::{BullsError, Result};
use bulls_config::{ColorsConfig, GraphicConfig, GraphsConfig};
use image::imageops::FilterType;
use image::{Rgb, RgbImage, RgbaImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::{debug, info};

const TITLE_TOP: i32 = 80;
const TITLE_ADVANCE: i32 = 90;
const ACCENT_OFFSET: i32 = 20;
const ACCENT_THICKNESS: i32 = 4;
const SUBTITLE_ADVANCE: i32 = 60;
const PLAYER_GAP: i32 = 40;
const HEADSHOT_SIZE: u32 = 250;
const HEADSHOT_GAP: i32 = 30;
const NAME_ADVANCE: i32 = 70;
const STATS_GAP: i32 = 30;
const STAT_ROW_SPACING: i32 = 120;
const STAT_LABEL_OFFSET: i32 = 65;
const FOOTER_INSET: i32 = 50;

/// Position of one stat on the graphic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSlot {
    /// Stat label, e.g. "PTS"
    pub label: String,
    /// Displayed value
    pub value: String,
    /// Horizontal center
    pub x: i32,
    /// Top of the value text
    pub value_y: i32,
    /// Top of the label text
    pub label_y: i32,
}

/// Vertical positions of every element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicLayout {
    /// Top of the title
    pub title_y: i32,
    /// Top of the accent bar
    pub accent_y: Option<i32>,
    /// Top of the subtitle
    pub subtitle_y: Option<i32>,
    /// Headshot left, top and side length
    pub headshot: Option<(i32, i32, u32)>,
    /// Top of the player name
    pub name_y: Option<i32>,
    /// Stats in display order
    pub stats: Vec<StatSlot>,
    /// Top of the footer
    pub footer_y: i32,
}

/// Builder for the composed portrait graphic
#[derive(Debug, Clone)]
pub struct SocialGraphic {
    /// Headline
    pub title: String,
    /// Secondary line under the headline
    pub subtitle: String,
    /// Player name under the headshot
    pub player_name: String,
    /// Headshot pasted in a circle
    pub headshot: Option<RgbaImage>,
    /// Label and value pairs in display order
    pub stats: Vec<(String, String)>,
    /// Attribution at the bottom
    pub footer: String,
    /// Canvas size
    pub size: (u32, u32),
    /// Draw the bar under the title
    pub accent_line: bool,
    /// Font family for all text
    pub font_family: String,
    /// Palette
    pub colors: ColorsConfig,
}

impl SocialGraphic {
    /// Graphic with default size, footer and palette.
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_config(title, &GraphicConfig::default(), &GraphsConfig::default())
    }

    /// Graphic sized and styled from configuration.
    pub fn from_config(
        title: impl Into<String>,
        graphic: &GraphicConfig,
        graphs: &GraphsConfig,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            player_name: String::new(),
            headshot: None,
            stats: Vec::new(),
            footer: graphic.footer.clone(),
            size: (graphic.width, graphic.height),
            accent_line: true,
            font_family: graphs.font_family.clone(),
            colors: graphs.colors.clone(),
        }
    }

    /// Set the subtitle.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the player name.
    #[must_use]
    pub fn player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Set the headshot.
    #[must_use]
    pub fn headshot(mut self, headshot: RgbaImage) -> Self {
        self.headshot = Some(headshot);
        self
    }

    /// Append a stat.
    #[must_use]
    pub fn stat(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.stats.push((label.into(), value.to_string()));
        self
    }

    /// Set the footer.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Toggle the accent bar.
    #[must_use]
    pub const fn accent_line(mut self, enabled: bool) -> Self {
        self.accent_line = enabled;
        self
    }

    /// Where everything goes, top to bottom.
    ///
    /// Three or fewer stats share one row; more are split over two rows with
    /// the first row taking the extra stat.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn layout(&self) -> GraphicLayout {
        let (width, height) = (self.size.0 as i32, self.size.1 as i32);
        let mut y = TITLE_TOP;
        let title_y = y;
        y += TITLE_ADVANCE;
        let accent_y = self.accent_line.then_some(y - ACCENT_OFFSET);

        let subtitle_y = (!self.subtitle.is_empty()).then(|| {
            let top = y;
            y += SUBTITLE_ADVANCE;
            top
        });

        let mut headshot = None;
        let mut name_y = None;
        if self.headshot.is_some() || !self.player_name.is_empty() {
            y += PLAYER_GAP;
            if self.headshot.is_some() {
                headshot = Some(((width - HEADSHOT_SIZE as i32) / 2, y, HEADSHOT_SIZE));
                y += HEADSHOT_SIZE as i32 + HEADSHOT_GAP;
            }
            if !self.player_name.is_empty() {
                name_y = Some(y);
                y += NAME_ADVANCE;
            }
        }

        let mut stats = Vec::with_capacity(self.stats.len());
        if !self.stats.is_empty() {
            y += STATS_GAP;
            let count = self.stats.len();
            let per_row = if count <= 3 { count } else { (count + 1) / 2 };
            let spacing = width / (per_row as i32 + 1);
            for (i, (label, value)) in self.stats.iter().enumerate() {
                let (row, col) = ((i / per_row) as i32, (i % per_row) as i32);
                let value_y = y + row * STAT_ROW_SPACING;
                stats.push(StatSlot {
                    label: label.clone(),
                    value: value.clone(),
                    x: spacing * (col + 1),
                    value_y,
                    label_y: value_y + STAT_LABEL_OFFSET,
                });
            }
        }

        GraphicLayout {
            title_y,
            accent_y,
            subtitle_y,
            headshot,
            name_y,
            stats,
            footer_y: height - FOOTER_INSET,
        }
    }

    fn font(&self, size: u32, style: FontStyle) -> FontDesc<'_> {
        FontDesc::new(FontFamily::from(self.font_family.as_str()), f64::from(size), style)
    }

    fn draw_text_layers<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        layout: &GraphicLayout,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let text = parse_color(&self.colors.text);
        let accent = parse_color(&self.colors.primary);
        let muted = parse_color(&self.colors.muted);
        root.fill(&parse_color(&self.colors.dark_background))?;

        #[allow(clippy::cast_possible_wrap)]
        let (width, center) = (self.size.0 as i32, (self.size.0 / 2) as i32);
        let top_center = Pos::new(HPos::Center, VPos::Top);

        let title_style = self.font(72, FontStyle::Bold).color(&text).pos(top_center);
        root.draw_text(&self.title, &title_style, (center, layout.title_y))?;

        if let Some(accent_y) = layout.accent_y {
            let (title_w, _) = root.estimate_text_size(&self.title, &title_style)?;
            #[allow(clippy::cast_possible_wrap)]
            let line_w = (title_w as i32 + 40).min(width - 100);
            let line_x = (width - line_w) / 2;
            root.draw(&Rectangle::new(
                [(line_x, accent_y), (line_x + line_w, accent_y + ACCENT_THICKNESS)],
                accent.filled(),
            ))?;
        }

        if let Some(subtitle_y) = layout.subtitle_y {
            let style = self.font(28, FontStyle::Normal).color(&muted).pos(top_center);
            root.draw_text(&self.subtitle, &style, (center, subtitle_y))?;
        }

        if let Some(name_y) = layout.name_y {
            let style = self.font(56, FontStyle::Bold).color(&text).pos(top_center);
            root.draw_text(&self.player_name, &style, (center, name_y))?;
        }

        let value_style = self.font(64, FontStyle::Bold).color(&accent).pos(top_center);
        let label_style = self.font(20, FontStyle::Normal).color(&muted).pos(top_center);
        for slot in &layout.stats {
            root.draw_text(&slot.value, &value_style, (slot.x, slot.value_y))?;
            root.draw_text(&slot.label, &label_style, (slot.x, slot.label_y))?;
        }

        let footer_style = self.font(18, FontStyle::Normal).color(&muted).pos(top_center);
        root.draw_text(&self.footer, &footer_style, (center, layout.footer_y))?;
        Ok(())
    }

    /// Compose the graphic in memory.
    pub fn render(&self) -> Result<RgbImage> {
        let (width, height) = self.size;
        let layout = self.layout();
        let mut buffer = vec![0_u8; rgb_len(width, height)];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw_text_layers(&root, &layout)?;
            root.present()?;
        }
        let mut canvas = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| BullsError::graph("Pixel buffer does not match the canvas size"))?;

        if let (Some(headshot), Some((left, top, side))) = (&self.headshot, layout.headshot) {
            paste_circular(&mut canvas, headshot, left, top, side);
        }
        debug!(
            stats = layout.stats.len(),
            headshot = self.headshot.is_some(),
            "Composed social graphic"
        );
        Ok(canvas)
    }

    /// Render and write a PNG, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let canvas = self.render()?;
        ensure_parent_dir(path)?;
        canvas.save(path)?;
        info!("Saved social graphic to {}", path.display());
        Ok(())
    }

    /// Render to PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let (width, height) = self.size;
        encode_png(self.render()?.into_raw(), width, height)
    }
}

/// Whether pixel `(px, py)` of a `side` square lies inside its inscribed circle.
fn in_circle(px: u32, py: u32, side: u32) -> bool {
    let radius = f64::from(side) / 2.0;
    let dx = f64::from(px) + 0.5 - radius;
    let dy = f64::from(py) + 0.5 - radius;
    dx.mul_add(dx, dy * dy) <= radius * radius
}

/// Alpha-blend `headshot`, resized to `side`, inside a circle at `(left, top)`.
fn paste_circular(canvas: &mut RgbImage, headshot: &RgbaImage, left: i32, top: i32, side: u32) {
    let resized = image::imageops::resize(headshot, side, side, FilterType::Lanczos3);
    let (width, height) = canvas.dimensions();
    for (px, py, pixel) in resized.enumerate_pixels() {
        if !in_circle(px, py, side) {
            continue;
        }
        let (Ok(x), Ok(y)) = (
            u32::try_from(i64::from(left) + i64::from(px)),
            u32::try_from(i64::from(top) + i64::from(py)),
        ) else {
            continue;
        };
        if x >= width || y >= height {
            continue;
        }
        let alpha = f64::from(pixel[3]) / 255.0;
        let base = canvas.get_pixel(x, y);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let blend = |fg: u8, bg: u8| {
            f64::from(fg).mul_add(alpha, f64::from(bg) * (1.0 - alpha)).round() as u8
        };
        let blended = Rgb([
            blend(pixel[0], base[0]),
            blend(pixel[1], base[1]),
            blend(pixel[2], base[2]),
        ]);
        canvas.put_pixel(x, y, blended);
    }
}
