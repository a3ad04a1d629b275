use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, SeriesKeySet, Viewport};
use crate::render::{Color, RectPrimitive, TextHAlign, TextPrimitive};

use super::{ChartConfig, LegendPosition, RenderStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub series_key: String,
    pub color: Color,
    pub label: String,
}

/// Legend entry with its swatch origin in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLegendEntry {
    pub entry: LegendEntry,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub entry_width: f64,
    pub entries: Vec<PlacedLegendEntry>,
}

/// Pairs series keys with their colors and display labels.
#[must_use]
pub fn legend_entries(
    keys: &SeriesKeySet,
    colors: &[Color],
    config: &ChartConfig,
) -> Vec<LegendEntry> {
    keys.keys()
        .iter()
        .zip(colors)
        .map(|(key, color)| LegendEntry {
            series_key: key.clone(),
            color: *color,
            label: config.series_label(key).to_owned(),
        })
        .collect()
}

/// Places entries in one row centered on the plot's horizontal midpoint.
/// Entry `i` starts at `origin_x + i * entry_width`.
#[must_use]
pub fn layout_legend(
    entries: Vec<LegendEntry>,
    canvas: Viewport,
    plot: PlotArea,
    position: LegendPosition,
    margin_top: f64,
    style: &RenderStyle,
) -> LegendLayout {
    let entry_width = style.legend_entry_width_px;
    let origin_x = plot.center_x() - entries.len() as f64 * entry_width * 0.5;
    let origin_y = match position {
        LegendPosition::Top => margin_top * 0.5 + 10.0,
        LegendPosition::Bottom => f64::from(canvas.height) - 18.0,
    };

    let entries = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| PlacedLegendEntry {
            entry,
            x: origin_x + index as f64 * entry_width,
            y: origin_y,
        })
        .collect();

    LegendLayout {
        origin_x,
        origin_y,
        entry_width,
        entries,
    }
}

impl LegendLayout {
    /// Swatch rectangles and labels, in entry order.
    #[must_use]
    pub fn primitives(&self, style: &RenderStyle) -> (Vec<RectPrimitive>, Vec<TextPrimitive>) {
        let swatch = style.legend_swatch_size_px;
        let rects = self
            .entries
            .iter()
            .map(|placed| {
                RectPrimitive::new(placed.x, placed.y, swatch, swatch, placed.entry.color)
                    .with_corner_radius(style.legend_swatch_corner_radius_px)
            })
            .collect();
        let texts = self
            .entries
            .iter()
            .filter(|placed| !placed.entry.label.is_empty())
            .map(|placed| {
                TextPrimitive::new(
                    placed.entry.label.clone(),
                    placed.x + style.legend_label_offset_x_px,
                    placed.y + style.legend_label_offset_y_px,
                    style.legend_font_size_px,
                    style.text_color,
                    TextHAlign::Left,
                )
            })
            .collect();
        (rects, texts)
    }
}
