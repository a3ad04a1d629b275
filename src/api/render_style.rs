use crate::render::{Color, LineStrokeStyle};

/// Visual constants used when materializing the scene.
///
/// Not part of the serialized config; hosts swap it through
/// `ChartEngine::set_render_style`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub text_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub grid_line_style: LineStrokeStyle,
    pub axis_line_color: Color,
    pub axis_line_width: f64,
    pub tick_mark_length_px: f64,
    pub tick_label_font_size_px: f64,
    /// Gap between the value axis and its right-aligned tick labels.
    pub value_tick_label_offset_px: f64,
    /// Baseline of category labels below the plot bottom.
    pub category_label_offset_px: f64,
    pub axis_title_font_size_px: f64,
    pub baseline_color: Color,
    pub baseline_width: f64,
    pub line_baseline_color: Color,
    pub line_baseline_style: LineStrokeStyle,
    pub title_font_size_px: f64,
    pub legend_entry_width_px: f64,
    pub legend_swatch_size_px: f64,
    pub legend_swatch_corner_radius_px: f64,
    pub legend_label_offset_x_px: f64,
    pub legend_label_offset_y_px: f64,
    pub legend_font_size_px: f64,
    pub bar_corner_radius_px: f64,
    pub bar_opacity: f64,
    pub bar_hover_opacity: f64,
    pub curved_opacity: f64,
    pub curved_hover_opacity: f64,
    pub line_stroke_width: f64,
    pub line_dash_style: LineStrokeStyle,
    pub point_radius_px: f64,
    pub point_hover_radius_px: f64,
    pub point_hover_color: Color,
    pub brush_selection_opacity: f64,
    pub brush_border_width: f64,
    pub brush_corner_radius_px: f64,
    /// Distance of the brush track axis line above the band bottom.
    pub brush_axis_offset_px: f64,
    /// Fallback palette used when the caller supplies no colors.
    pub default_palette: [Color; 10],
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            text_color: Color::rgb(0.0, 0.0, 0.0),
            grid_line_color: rgb8(0xcc, 0xcc, 0xcc),
            grid_line_width: 1.0,
            grid_line_style: LineStrokeStyle::Dashed {
                on_px: 2.0,
                off_px: 2.0,
            },
            axis_line_color: Color::rgb(0.0, 0.0, 0.0),
            axis_line_width: 1.0,
            tick_mark_length_px: 6.0,
            tick_label_font_size_px: 12.0,
            value_tick_label_offset_px: 9.0,
            category_label_offset_px: 20.0,
            axis_title_font_size_px: 13.0,
            baseline_color: rgb8(0x44, 0x44, 0x44),
            baseline_width: 1.0,
            line_baseline_color: rgb8(0x55, 0x55, 0x55),
            line_baseline_style: LineStrokeStyle::Dashed {
                on_px: 2.0,
                off_px: 2.0,
            },
            title_font_size_px: 20.0,
            legend_entry_width_px: 120.0,
            legend_swatch_size_px: 14.0,
            legend_swatch_corner_radius_px: 3.0,
            legend_label_offset_x_px: 20.0,
            legend_label_offset_y_px: 11.0,
            legend_font_size_px: 13.0,
            bar_corner_radius_px: 5.0,
            bar_opacity: 1.0,
            bar_hover_opacity: 0.8,
            curved_opacity: 0.9,
            curved_hover_opacity: 0.7,
            line_stroke_width: 2.5,
            line_dash_style: LineStrokeStyle::Dashed {
                on_px: 6.0,
                off_px: 4.0,
            },
            point_radius_px: 4.0,
            point_hover_radius_px: 6.0,
            point_hover_color: rgb8(0xff, 0xa5, 0x00),
            brush_selection_opacity: 0.3,
            brush_border_width: 1.5,
            brush_corner_radius_px: 3.0,
            brush_axis_offset_px: 25.0,
            default_palette: [
                rgb8(0x1f, 0x77, 0xb4),
                rgb8(0xff, 0x7f, 0x0e),
                rgb8(0x2c, 0xa0, 0x2c),
                rgb8(0xd6, 0x27, 0x28),
                rgb8(0x94, 0x67, 0xbd),
                rgb8(0x8c, 0x56, 0x4b),
                rgb8(0xe3, 0x77, 0xc2),
                rgb8(0x7f, 0x7f, 0x7f),
                rgb8(0xbc, 0xbd, 0x22),
                rgb8(0x17, 0xbe, 0xcf),
            ],
        }
    }
}

const fn rgb8(red: u8, green: u8, blue: u8) -> Color {
    Color::rgb(
        red as f64 / 255.0,
        green as f64 / 255.0,
        blue as f64 / 255.0,
    )
}
