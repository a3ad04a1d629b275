use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{BarStyle, Margins, ValueScaleOptions, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipOffset;
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartVariant {
    /// Grouped bars, rectangular or curved.
    #[default]
    Bar,
    /// One stroke per series through band midpoints, with point markers.
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
}

/// Stroke options of the line variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineOptions {
    #[serde(default = "default_true")]
    pub smooth: bool,
    #[serde(default)]
    pub dashed: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            smooth: true,
            dashed: false,
        }
    }
}

/// Geometry of the brush band below the main plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushLayout {
    /// Height carved out of the plot for the brush band.
    #[serde(default = "default_brush_band_height")]
    pub band_height: f64,
    /// Vertical distance between the plot bottom and the brush band.
    #[serde(default = "default_brush_gap")]
    pub gap: f64,
    /// Width of each resize handle.
    #[serde(default = "default_brush_handle_width")]
    pub handle_width: f64,
}

impl BrushLayout {
    /// Height of the draggable track inside the band.
    #[must_use]
    pub fn track_height(self) -> f64 {
        (self.band_height - 20.0).max(1.0)
    }
}

impl Default for BrushLayout {
    fn default() -> Self {
        Self {
            band_height: default_brush_band_height(),
            gap: default_brush_gap(),
            handle_width: default_brush_handle_width(),
        }
    }
}

/// Public chart configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    #[serde(default = "default_y_ticks")]
    pub y_ticks: usize,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default)]
    pub variant: ChartVariant,
    #[serde(default)]
    pub bar_style: BarStyle,
    #[serde(default = "default_true")]
    pub rounded_bars: bool,
    #[serde(default)]
    pub legend_position: LegendPosition,
    /// Display labels per series key; keys without an entry show the key.
    #[serde(default)]
    pub series_labels: IndexMap<String, String>,
    /// Outer band padding; `None` picks the variant default.
    #[serde(default)]
    pub category_padding: Option<f64>,
    /// Sub-band padding between grouped series; `None` picks the bar-style default.
    #[serde(default)]
    pub series_padding: Option<f64>,
    #[serde(default)]
    pub value_scale: ValueScaleOptions,
    #[serde(default)]
    pub line: LineOptions,
    #[serde(default)]
    pub brushable: bool,
    /// Rebuild axes and the value scale from the brushed subset instead of
    /// redrawing only the data shapes.
    #[serde(default)]
    pub brush_full_rescale: bool,
    #[serde(default)]
    pub brush_layout: BrushLayout,
    #[serde(default)]
    pub brush_color: Option<Color>,
    #[serde(default)]
    pub tooltip_offset: TooltipOffset,
}

impl ChartConfig {
    /// Creates a grouped rectangular bar chart config.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margins: Margins::default(),
            title: default_title(),
            x_label: String::new(),
            y_label: String::new(),
            y_ticks: default_y_ticks(),
            show_grid: true,
            variant: ChartVariant::Bar,
            bar_style: BarStyle::Rectangular,
            rounded_bars: true,
            legend_position: LegendPosition::Top,
            series_labels: IndexMap::new(),
            category_padding: None,
            series_padding: None,
            value_scale: ValueScaleOptions::default(),
            line: LineOptions::default(),
            brushable: false,
            brush_full_rescale: false,
            brush_layout: BrushLayout::default(),
            brush_color: None,
            tooltip_offset: TooltipOffset::default(),
        }
    }

    /// Line-chart preset: point-style category placement and 10% value headroom.
    #[must_use]
    pub fn line(viewport: Viewport) -> Self {
        let mut config = Self::new(viewport).with_variant(ChartVariant::Line);
        config.title = "Line Chart".to_owned();
        config.margins = Margins::new(50.0, 40.0, 50.0, 60.0);
        config.value_scale.headroom_ratio = 0.1;
        config
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_axis_labels(
        mut self,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    #[must_use]
    pub fn with_y_ticks(mut self, y_ticks: usize) -> Self {
        self.y_ticks = y_ticks;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: ChartVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_bar_style(mut self, bar_style: BarStyle) -> Self {
        self.bar_style = bar_style;
        self
    }

    #[must_use]
    pub fn with_rounded_bars(mut self, rounded_bars: bool) -> Self {
        self.rounded_bars = rounded_bars;
        self
    }

    #[must_use]
    pub fn with_legend_position(mut self, position: LegendPosition) -> Self {
        self.legend_position = position;
        self
    }

    #[must_use]
    pub fn with_series_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.series_labels.insert(key.into(), label.into());
        self
    }

    #[must_use]
    pub fn with_category_padding(mut self, padding: f64) -> Self {
        self.category_padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_series_padding(mut self, padding: f64) -> Self {
        self.series_padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_value_scale(mut self, options: ValueScaleOptions) -> Self {
        self.value_scale = options;
        self
    }

    #[must_use]
    pub fn with_line_options(mut self, line: LineOptions) -> Self {
        self.line = line;
        self
    }

    #[must_use]
    pub fn with_brush(mut self, brushable: bool) -> Self {
        self.brushable = brushable;
        self
    }

    #[must_use]
    pub fn with_brush_full_rescale(mut self, enabled: bool) -> Self {
        self.brush_full_rescale = enabled;
        self
    }

    #[must_use]
    pub fn with_brush_color(mut self, color: Color) -> Self {
        self.brush_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_tooltip_offset(mut self, offset: TooltipOffset) -> Self {
        self.tooltip_offset = offset;
        self
    }

    #[must_use]
    pub fn effective_category_padding(&self) -> f64 {
        self.category_padding.unwrap_or(match self.variant {
            ChartVariant::Bar => 0.2,
            ChartVariant::Line => 0.0,
        })
    }

    #[must_use]
    pub fn effective_series_padding(&self) -> f64 {
        self.series_padding.unwrap_or(match self.bar_style {
            BarStyle::Rectangular => 0.05,
            BarStyle::Curved => 0.15,
        })
    }

    /// Pixels reserved below the plot for the brush band.
    #[must_use]
    pub fn reserved_bottom_px(&self) -> f64 {
        if self.brushable {
            self.brush_layout.band_height
        } else {
            0.0
        }
    }

    /// Drawing-surface size. The brush band and its gap extend the canvas
    /// below the configured viewport.
    #[must_use]
    pub fn canvas(&self) -> Viewport {
        if !self.brushable {
            return self.viewport;
        }
        let extra = (self.brush_layout.band_height + self.brush_layout.gap).max(0.0).ceil();
        Viewport::new(
            self.viewport.width,
            self.viewport.height.saturating_add(extra as u32),
        )
    }

    #[must_use]
    pub fn series_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.series_labels.get(key).map_or(key, String::as_str)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Bar Chart".to_owned()
}

fn default_y_ticks() -> usize {
    5
}

fn default_brush_band_height() -> f64 {
    60.0
}

fn default_brush_gap() -> f64 {
    40.0
}

fn default_brush_handle_width() -> f64 {
    14.0
}
