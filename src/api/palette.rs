use tracing::{debug, warn};

use crate::core::SeriesKeySet;
use crate::error::ChartError;
use crate::render::Color;

use super::RenderStyle;

/// Assigns one color per series key, in key order.
///
/// A short palette is cycled; an empty one falls back to the style's
/// default palette.
#[must_use]
pub fn resolve_series_colors(
    palette: &[Color],
    keys: &SeriesKeySet,
    style: &RenderStyle,
) -> Vec<Color> {
    let source: &[Color] = if palette.is_empty() {
        if !keys.is_empty() {
            warn!(series = keys.len(), "empty palette, using default colors");
        }
        &style.default_palette
    } else {
        palette
    };

    if source.len() < keys.len() {
        let mismatch = ChartError::MismatchedPalette {
            colors: source.len(),
            series: keys.len(),
        };
        debug!(error = %mismatch, "cycling palette");
    }

    (0..keys.len())
        .map(|index| source[index % source.len()])
        .collect()
}

/// Brush accent: explicit color, else the first series color, else black.
#[must_use]
pub fn brush_color(explicit: Option<Color>, series_colors: &[Color]) -> Color {
    explicit
        .or_else(|| series_colors.first().copied())
        .unwrap_or(Color::rgb(0.0, 0.0, 0.0))
}
