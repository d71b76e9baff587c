//! Chart configuration and styling

use bulls_config::{ColorsConfig, GraphsConfig};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use serde::{Deserialize, Serialize};

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Caption drawn above the plot
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// X axis description
    pub x_label: Option<String>,
    /// Y axis description
    pub y_label: Option<String>,
    /// Fonts, colors and spacing
    pub style: StyleConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from_graphs(&GraphsConfig::default())
    }
}

impl ChartConfig {
    /// Untitled chart sized and styled from the `[graphs]` settings.
    #[must_use]
    pub fn from_graphs(graphs: &GraphsConfig) -> Self {
        Self {
            title: String::new(),
            width: graphs.width,
            height: graphs.height,
            x_label: None,
            y_label: None,
            style: StyleConfig::from_graphs(graphs),
        }
    }

    /// Set the caption.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set both axis descriptions.
    #[must_use]
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    /// Override the canvas size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Keep the width and take the height that fits the half court.
    #[must_use]
    pub fn for_court(self) -> Self {
        let (width, height) = crate::court::court_canvas(self.width);
        self.with_size(width, height)
    }
}

/// Named chart colors as `#RRGGBB` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Bars, lines and highlights
    pub primary: String,
    /// Second series and older bars
    pub secondary: String,
    /// Axis text and outlines
    pub ink: String,
    /// Reference lines and secondary text
    pub muted: String,
    /// Wins
    pub win: String,
    /// Losses
    pub loss: String,
}

impl ColorScheme {
    /// Colors cycled through by multi-series charts.
    #[must_use]
    pub fn series(&self) -> Vec<String> {
        vec![
            self.primary.clone(),
            self.secondary.clone(),
            self.win.clone(),
            self.loss.clone(),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::from(&ColorsConfig::default())
    }
}

impl From<&ColorsConfig> for ColorScheme {
    fn from(colors: &ColorsConfig) -> Self {
        Self {
            primary: colors.primary.clone(),
            secondary: colors.secondary.clone(),
            ink: colors.secondary.clone(),
            muted: colors.muted.clone(),
            win: colors.win.clone(),
            loss: colors.loss.clone(),
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Family name or generic family
    pub family: String,
    /// Size in pixels
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 18,
        }
    }
}

impl FontConfig {
    /// Same family at another size.
    #[must_use]
    pub fn sized(&self, size: u32) -> Self {
        Self {
            family: self.family.clone(),
            size,
        }
    }

    /// Plotters font description.
    #[must_use]
    pub fn desc(&self) -> FontDesc<'_> {
        FontDesc::new(
            FontFamily::from(self.family.as_str()),
            f64::from(self.size),
            FontStyle::Normal,
        )
    }

    /// Bold plotters font description.
    #[must_use]
    pub fn bold(&self) -> FontDesc<'_> {
        self.desc().style(FontStyle::Bold)
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Space above the caption
    pub top: u32,
    /// Space right of the plot
    pub right: u32,
    /// X label area height
    pub bottom: u32,
    /// Y label area width
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 30,
            right: 40,
            bottom: 90,
            left: 90,
        }
    }
}

/// Grid line configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Vertical grid lines
    pub show_x: bool,
    /// Horizontal grid lines
    pub show_y: bool,
    /// Line color; light gray when unset
    pub color: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show_x: true,
            show_y: true,
            color: None,
        }
    }
}

/// Comprehensive styling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Palette
    pub colors: ColorScheme,
    /// Canvas fill
    pub background_color: String,
    /// Caption font
    pub title_font: FontConfig,
    /// Tick label and axis description font
    pub axis_font: FontConfig,
    /// Annotation and legend font
    pub label_font: FontConfig,
    /// Spacing around the plot
    pub margins: MarginConfig,
    /// Grid lines
    pub grid: GridConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::from_graphs(&GraphsConfig::default())
    }
}

impl StyleConfig {
    /// Style derived from the `[graphs]` settings.
    #[must_use]
    pub fn from_graphs(graphs: &GraphsConfig) -> Self {
        let base = FontConfig {
            family: graphs.font_family.clone(),
            size: 20,
        };
        Self {
            colors: ColorScheme::from(&graphs.colors),
            background_color: graphs.colors.background.clone(),
            title_font: base.sized(36),
            axis_font: base.clone(),
            label_font: base.sized(16),
            margins: MarginConfig::default(),
            grid: GridConfig::default(),
        }
    }
}
