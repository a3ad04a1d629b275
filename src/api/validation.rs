use crate::core::PlotArea;
use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, RenderStyle};

/// Checks everything that would otherwise surface later as a scale or
/// geometry failure, and returns the derived plot area.
pub(super) fn validate_config(config: &ChartConfig) -> ChartResult<PlotArea> {
    let margins = config.margins;
    for (name, value) in [
        ("top", margins.top),
        ("right", margins.right),
        ("bottom", margins.bottom),
        ("left", margins.left),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margin `{name}` must be finite and >= 0"
            )));
        }
    }

    validate_padding("category", config.effective_category_padding())?;
    validate_padding("series", config.effective_series_padding())?;

    if config.y_ticks == 0 {
        return Err(ChartError::InvalidData("y_ticks must be > 0".to_owned()));
    }
    let value_scale = config.value_scale;
    if value_scale.nice_count == 0 {
        return Err(ChartError::InvalidData(
            "value scale nice count must be > 0".to_owned(),
        ));
    }
    if !value_scale.headroom_ratio.is_finite() || value_scale.headroom_ratio < 0.0 {
        return Err(ChartError::InvalidData(
            "value scale headroom ratio must be finite and >= 0".to_owned(),
        ));
    }

    if config.brushable {
        let layout = config.brush_layout;
        for (name, value) in [
            ("band_height", layout.band_height),
            ("gap", layout.gap),
            ("handle_width", layout.handle_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "brush layout `{name}` must be finite and >= 0"
                )));
            }
        }
        if let Some(color) = config.brush_color {
            color.validate()?;
        }
    }

    let offset = config.tooltip_offset;
    if !offset.dx.is_finite() || !offset.dy.is_finite() {
        return Err(ChartError::InvalidData(
            "tooltip offset must be finite".to_owned(),
        ));
    }

    PlotArea::from_viewport(config.viewport, margins, config.reserved_bottom_px())
}

fn validate_padding(name: &str, padding: f64) -> ChartResult<()> {
    if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
        return Err(ChartError::InvalidData(format!(
            "{name} padding must be finite and in [0, 1)"
        )));
    }
    Ok(())
}

pub(super) fn validate_render_style(style: RenderStyle) -> ChartResult<RenderStyle> {
    for color in [
        style.text_color,
        style.grid_line_color,
        style.axis_line_color,
        style.baseline_color,
        style.line_baseline_color,
        style.point_hover_color,
    ]
    .into_iter()
    .chain(style.default_palette)
    {
        color.validate()?;
    }

    for (name, value) in [
        ("grid_line_width", style.grid_line_width),
        ("axis_line_width", style.axis_line_width),
        ("baseline_width", style.baseline_width),
        ("tick_label_font_size_px", style.tick_label_font_size_px),
        ("axis_title_font_size_px", style.axis_title_font_size_px),
        ("title_font_size_px", style.title_font_size_px),
        ("legend_entry_width_px", style.legend_entry_width_px),
        ("legend_swatch_size_px", style.legend_swatch_size_px),
        ("legend_font_size_px", style.legend_font_size_px),
        ("line_stroke_width", style.line_stroke_width),
        ("point_radius_px", style.point_radius_px),
        ("point_hover_radius_px", style.point_hover_radius_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and > 0"
            )));
        }
    }

    for (name, value) in [
        ("bar_opacity", style.bar_opacity),
        ("bar_hover_opacity", style.bar_hover_opacity),
        ("curved_opacity", style.curved_opacity),
        ("curved_hover_opacity", style.curved_hover_opacity),
        ("brush_selection_opacity", style.brush_selection_opacity),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be in [0, 1]"
            )));
        }
    }

    for (name, value) in [
        ("tick_mark_length_px", style.tick_mark_length_px),
        ("bar_corner_radius_px", style.bar_corner_radius_px),
        ("brush_border_width", style.brush_border_width),
        ("brush_corner_radius_px", style.brush_corner_radius_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and >= 0"
            )));
        }
    }

    Ok(style)
}
