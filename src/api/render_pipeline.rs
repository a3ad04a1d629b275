//! Pure scene construction.
//!
//! `recompute` turns the current inputs into a complete `Scene` plus the
//! scales it was built with; `recompute_data_layers` rebuilds only the
//! data-shape and brush layers against existing scales. Neither touches
//! engine state.

use tracing::{debug, warn};

use crate::core::geometry::{GeometryScales, build_bar_shapes, build_line_shapes};
use crate::core::ticks::{format_tick, tick_step};
use crate::core::{
    BarStyle, Dataset, PathGeometry, PlotArea, SeriesKeySet, Shape, ShapeGeometry, ShapeId,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LayerTransform, LinePrimitive, LineStrokeStyle, PathPrimitive, RectPrimitive, Scene,
    SceneLayer, SceneLayerKind, TextHAlign, TextPrimitive, canonical_layer_order,
};

use super::legend_layout::{layout_legend, legend_entries};
use super::palette::{brush_color, resolve_series_colors};
use super::scale_resolver::{ResolvedScales, ScaleInputs, resolve_scales};
use super::{BrushState, ChartConfig, ChartVariant, RenderStyle};

/// Everything one pipeline pass reads.
#[derive(Debug, Clone, Copy)]
pub struct PipelineInput<'a> {
    pub dataset: &'a Dataset,
    pub keys: &'a SeriesKeySet,
    pub palette: &'a [Color],
    pub config: &'a ChartConfig,
    pub style: &'a RenderStyle,
    pub plot: PlotArea,
    pub brush: &'a BrushState,
    pub hovered: Option<ShapeId>,
}

/// Builds the full scene. Returns `None` scales when there is nothing to lay
/// out, in which case the scene is empty.
pub fn recompute(input: PipelineInput<'_>) -> ChartResult<(Scene, Option<ResolvedScales>)> {
    let canvas = input.config.canvas();
    let scales = match resolve_scales(ScaleInputs {
        dataset: input.dataset,
        keys: input.keys,
        config: input.config,
        plot: input.plot,
        visible_categories: &input.brush.visible,
        values_from_visible: input.config.brush_full_rescale,
    }) {
        Ok(scales) => scales,
        Err(err @ ChartError::EmptyDomain(_)) => {
            warn!(error = %err, "nothing to lay out, rendering empty scene");
            return Ok((Scene::empty(canvas), None));
        }
        Err(err) => return Err(err),
    };

    let colors = resolve_series_colors(input.palette, input.keys, input.style);
    let mut layers = Vec::new();
    let mut shapes = Vec::new();
    for kind in canonical_layer_order(input.config.brushable) {
        let layer = match kind {
            SceneLayerKind::Grid => grid_layer(&input, &scales),
            SceneLayerKind::Axes => axes_layer(&input, &scales),
            SceneLayerKind::Baseline => baseline_layer(&input, &scales),
            SceneLayerKind::DataShapes => {
                let (layer, built) = data_layer(&input, &scales, &colors);
                shapes = built;
                layer
            }
            SceneLayerKind::Title => title_layer(&input),
            SceneLayerKind::Legend => legend_layer(&input, &colors),
            SceneLayerKind::BrushOverlay => brush_layer(&input, &scales, &colors),
        };
        layers.push(layer);
    }

    let scene = Scene {
        viewport: canvas,
        layers,
        shapes,
    };
    debug!(
        layers = scene.layers.len(),
        shapes = scene.shapes.len(),
        categories = scales.category.len(),
        "scene rebuilt"
    );
    Ok((scene, Some(scales)))
}

/// Rebuilds the data-shape layer and, when present, the brush overlay.
pub fn recompute_data_layers(
    input: PipelineInput<'_>,
    scales: &ResolvedScales,
    scene: &mut Scene,
) -> ChartResult<()> {
    if scene.layers.is_empty() {
        return Ok(());
    }
    let colors = resolve_series_colors(input.palette, input.keys, input.style);
    let (layer, shapes) = data_layer(&input, scales, &colors);
    scene.replace_layer(layer);
    scene.shapes = shapes;
    if input.config.brushable {
        scene.replace_layer(brush_layer(&input, scales, &colors));
    }
    debug!(shapes = scene.shapes.len(), "data layer redrawn");
    Ok(())
}

fn plot_transform(plot: PlotArea) -> LayerTransform {
    LayerTransform::translate(plot.left, plot.top)
}

fn grid_layer(input: &PipelineInput<'_>, scales: &ResolvedScales) -> SceneLayer {
    let mut layer = SceneLayer::new(SceneLayerKind::Grid, plot_transform(input.plot));
    if !input.config.show_grid {
        return layer;
    }
    let style = input.style;
    for tick in scales.value.ticks(input.config.y_ticks) {
        let y = scales.value.to_pixel(tick);
        layer.lines.push(
            LinePrimitive::new(
                0.0,
                y,
                input.plot.width,
                y,
                style.grid_line_width,
                style.grid_line_color,
            )
            .with_stroke_style(style.grid_line_style),
        );
    }
    layer
}

fn axes_layer(input: &PipelineInput<'_>, scales: &ResolvedScales) -> SceneLayer {
    let style = input.style;
    let config = input.config;
    let plot = input.plot;
    let mut layer = SceneLayer::new(SceneLayerKind::Axes, plot_transform(plot));
    let axis_line = |x1, y1, x2, y2| {
        LinePrimitive::new(x1, y1, x2, y2, style.axis_line_width, style.axis_line_color)
    };

    // Value axis.
    layer.lines.push(axis_line(0.0, 0.0, 0.0, plot.height));
    let (domain_start, domain_end) = scales.value.domain();
    let step = tick_step(domain_start, domain_end, config.y_ticks);
    for tick in scales.value.ticks(config.y_ticks) {
        let y = scales.value.to_pixel(tick);
        layer.lines.push(axis_line(-style.tick_mark_length_px, y, 0.0, y));
        layer.texts.push(TextPrimitive::new(
            format_tick(tick, step),
            -style.value_tick_label_offset_px,
            y + style.tick_label_font_size_px * 0.32,
            style.tick_label_font_size_px,
            style.text_color,
            TextHAlign::Right,
        ));
    }

    // Category axis.
    layer.lines.push(axis_line(0.0, plot.height, plot.width, plot.height));
    for (category, start, end) in scales.category.bands() {
        let x = (start + end) * 0.5;
        layer
            .lines
            .push(axis_line(x, plot.height, x, plot.height + style.tick_mark_length_px));
        if !category.is_empty() {
            layer.texts.push(TextPrimitive::new(
                category,
                x,
                plot.height + style.category_label_offset_px,
                style.tick_label_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
    }

    if !config.x_label.is_empty() {
        let y = if config.brushable {
            plot.height + config.brush_layout.gap + config.brush_layout.band_height + 20.0
        } else {
            plot.height + config.margins.bottom - 20.0
        };
        layer.texts.push(
            TextPrimitive::new(
                config.x_label.clone(),
                plot.width * 0.5,
                y,
                style.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .bold(),
        );
    }
    if !config.y_label.is_empty() {
        layer.texts.push(
            TextPrimitive::new(
                config.y_label.clone(),
                -config.margins.left + 20.0,
                plot.height * 0.5,
                style.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .bold()
            .rotated(-90.0),
        );
    }
    layer
}

fn baseline_layer(input: &PipelineInput<'_>, scales: &ResolvedScales) -> SceneLayer {
    let style = input.style;
    let mut layer = SceneLayer::new(SceneLayerKind::Baseline, plot_transform(input.plot));
    let y = scales.value.baseline();
    let line = match input.config.variant {
        ChartVariant::Bar => LinePrimitive::new(
            0.0,
            y,
            input.plot.width,
            y,
            style.baseline_width,
            style.baseline_color,
        ),
        ChartVariant::Line => LinePrimitive::new(
            0.0,
            y,
            input.plot.width,
            y,
            style.baseline_width,
            style.line_baseline_color,
        )
        .with_stroke_style(style.line_baseline_style),
    };
    layer.lines.push(line);
    layer
}

fn data_layer(
    input: &PipelineInput<'_>,
    scales: &ResolvedScales,
    colors: &[Color],
) -> (SceneLayer, Vec<Shape>) {
    let style = input.style;
    let config = input.config;
    let mut layer = SceneLayer::new(SceneLayerKind::DataShapes, plot_transform(input.plot));
    let records = input.dataset.records_in(scales.category.domain());
    let color_of = |series_index: usize| {
        colors
            .get(series_index)
            .copied()
            .unwrap_or(style.text_color)
    };

    match config.variant {
        ChartVariant::Bar => {
            let corner_radius = if config.rounded_bars {
                style.bar_corner_radius_px
            } else {
                0.0
            };
            let shapes = build_bar_shapes(
                &records,
                input.keys,
                GeometryScales {
                    category: &scales.category,
                    series: &scales.series,
                    value: scales.value,
                },
                config.bar_style,
                corner_radius,
            );
            for shape in &shapes {
                let hovered = input.hovered == Some(shape.id);
                let color = color_of(shape.id.series_index);
                match &shape.geometry {
                    ShapeGeometry::Rect(rect) => {
                        let opacity = if hovered {
                            style.bar_hover_opacity
                        } else {
                            style.bar_opacity
                        };
                        layer.rects.push(
                            RectPrimitive::new(
                                rect.x,
                                rect.y,
                                rect.width,
                                rect.height,
                                color.with_alpha(color.alpha * opacity),
                            )
                            .with_corner_radius(rect.corner_radius),
                        );
                    }
                    ShapeGeometry::Path(path) => {
                        let opacity = match (config.bar_style, hovered) {
                            (BarStyle::Curved, true) => style.curved_hover_opacity,
                            (BarStyle::Curved, false) => style.curved_opacity,
                            (BarStyle::Rectangular, true) => style.bar_hover_opacity,
                            (BarStyle::Rectangular, false) => style.bar_opacity,
                        };
                        layer.paths.push(PathPrimitive::filled(
                            path.clone(),
                            color.with_alpha(color.alpha * opacity),
                        ));
                    }
                    ShapeGeometry::Point { .. } => {}
                }
            }
            (layer, shapes)
        }
        ChartVariant::Line => {
            let (lines, points) = build_line_shapes(
                &records,
                input.keys,
                &scales.category,
                scales.value,
                config.line.smooth,
                style.point_radius_px,
            );
            let stroke_style = if config.line.dashed {
                style.line_dash_style
            } else {
                LineStrokeStyle::Solid
            };
            for line in lines {
                // A lone sample has no stroke, only its marker.
                if line.path.segments().len() < 2 {
                    continue;
                }
                layer.paths.push(
                    PathPrimitive::stroked(
                        line.path,
                        color_of(line.series_index),
                        style.line_stroke_width,
                    )
                    .with_stroke_style(stroke_style),
                );
            }
            for point in &points {
                if let ShapeGeometry::Point { cx, cy, radius } = point.geometry {
                    let (radius, fill) = if input.hovered == Some(point.id) {
                        (style.point_hover_radius_px, style.point_hover_color)
                    } else {
                        (radius, color_of(point.id.series_index))
                    };
                    layer
                        .paths
                        .push(PathPrimitive::filled(PathGeometry::circle(cx, cy, radius), fill));
                }
            }
            (layer, points)
        }
    }
}

fn title_layer(input: &PipelineInput<'_>) -> SceneLayer {
    let style = input.style;
    let config = input.config;
    let mut layer = SceneLayer::new(SceneLayerKind::Title, LayerTransform::default());
    if !config.title.is_empty() {
        layer.texts.push(
            TextPrimitive::new(
                config.title.clone(),
                f64::from(config.viewport.width) * 0.5,
                config.margins.top * 0.5,
                style.title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .bold(),
        );
    }
    layer
}

fn legend_layer(input: &PipelineInput<'_>, colors: &[Color]) -> SceneLayer {
    let config = input.config;
    let layout = layout_legend(
        legend_entries(input.keys, colors, config),
        config.canvas(),
        input.plot,
        config.legend_position,
        config.margins.top,
        input.style,
    );
    let (rects, texts) = layout.primitives(input.style);
    let mut layer = SceneLayer::new(SceneLayerKind::Legend, LayerTransform::default());
    layer.rects = rects;
    layer.texts = texts;
    layer
}

fn brush_layer(input: &PipelineInput<'_>, scales: &ResolvedScales, colors: &[Color]) -> SceneLayer {
    let style = input.style;
    let config = input.config;
    let plot = input.plot;
    let brush_layout = config.brush_layout;
    let mut layer = SceneLayer::new(
        SceneLayerKind::BrushOverlay,
        LayerTransform::translate(plot.left, plot.top + plot.height + brush_layout.gap),
    );

    let axis_y = brush_layout.band_height - style.brush_axis_offset_px;
    layer.lines.push(LinePrimitive::new(
        0.0,
        axis_y,
        scales.brush.range().1,
        axis_y,
        style.axis_line_width,
        style.axis_line_color,
    ));

    let Some(selection) = input.brush.selection else {
        return layer;
    };
    let accent = brush_color(config.brush_color, colors);
    let track_height = brush_layout.track_height();
    layer.rects.push(
        RectPrimitive::new(
            selection.start,
            0.0,
            selection.width(),
            track_height,
            accent.with_alpha(accent.alpha * style.brush_selection_opacity),
        )
        .with_border(style.brush_border_width, accent)
        .with_corner_radius(style.brush_corner_radius_px),
    );
    let handle_width = brush_layout.handle_width;
    if handle_width > 0.0 {
        for edge in [selection.start, selection.end] {
            layer.rects.push(
                RectPrimitive::new(
                    edge - handle_width * 0.5,
                    0.0,
                    handle_width,
                    track_height,
                    accent,
                )
                .with_corner_radius(style.brush_corner_radius_px),
            );
        }
    }
    layer
}
