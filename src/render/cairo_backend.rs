use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::PathSegment;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingSurface, LayerTransform, LineStrokeStyle, PathPrimitive, RectPrimitive,
    Renderer, Scene, SceneLayerKind, TextHAlign, TextPrimitive, draw_scene,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()>;
}

/// `DrawingSurface` over a borrowed Cairo context.
pub struct CairoSurface<'a> {
    context: &'a Context,
    clear_color: Color,
    stats: CairoRenderStats,
}

impl<'a> CairoSurface<'a> {
    #[must_use]
    pub fn new(context: &'a Context, clear_color: Color) -> Self {
        Self {
            context,
            clear_color,
            stats: CairoRenderStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }
}

impl DrawingSurface for CairoSurface<'_> {
    fn clear(&mut self, _width: u32, _height: u32) -> ChartResult<()> {
        self.clear_color.validate()?;
        apply_color(self.context, self.clear_color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        self.stats = CairoRenderStats::default();
        Ok(())
    }

    fn begin_group(&mut self, _kind: SceneLayerKind, transform: LayerTransform) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        self.context.translate(transform.dx, transform.dy);
        Ok(())
    }

    fn end_group(&mut self) -> ChartResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        let context = self.context;
        append_rect_path(context, *rect);
        apply_color(context, rect.fill_color);
        if rect.border_width > 0.0 {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            apply_color(context, rect.border_color);
            context.set_line_width(rect.border_width);
            context.set_dash(&[], 0.0);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
        } else {
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        }
        self.stats.rects_drawn += 1;
        Ok(())
    }

    fn draw_path(&mut self, path: &PathPrimitive) -> ChartResult<()> {
        let context = self.context;
        context.new_path();
        for segment in path.path.segments() {
            match *segment {
                PathSegment::MoveTo { x, y } => context.move_to(x, y),
                PathSegment::LineTo { x, y } => context.line_to(x, y),
                PathSegment::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => context.curve_to(c1x, c1y, c2x, c2y, x, y),
                PathSegment::Close => context.close_path(),
            }
        }

        if let Some(fill) = path.fill_color {
            apply_color(context, fill);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill path", err))?;
        }
        if let Some(stroke) = path.stroke_color {
            apply_color(context, stroke);
            context.set_line_width(path.stroke_width);
            apply_dash(context, path.stroke_style);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke path", err))?;
        } else {
            context.new_path();
        }
        self.stats.paths_drawn += 1;
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        let context = self.context;
        let layout = pangocairo::functions::create_layout(context);
        let weight = if text.bold { " Bold" } else { "" };
        let font_description =
            FontDescription::from_string(&format!("Sans{weight} {}px", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let dx = match text.h_align {
            TextHAlign::Left => 0.0,
            TextHAlign::Center => -f64::from(text_width) / 2.0,
            TextHAlign::Right => -f64::from(text_width),
        };

        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.translate(text.x, text.y);
        context.rotate(text.rotation_deg.to_radians());
        apply_color(context, text.color);
        context.move_to(dx, -baseline);
        pangocairo::functions::show_layout(context, &layout);
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        self.stats.texts_drawn += 1;
        Ok(())
    }
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()> {
        let mut surface = CairoSurface::new(context, self.clear_color);
        draw_scene(&mut surface, scene)?;
        self.last_stats = surface.stats();
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, scene)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &Scene) -> ChartResult<()> {
        self.render_with_context(context, scene)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn apply_dash(context: &Context, style: LineStrokeStyle) {
    match style.dash_pattern() {
        Some(pattern) => context.set_dash(&pattern, 0.0),
        None => context.set_dash(&[], 0.0),
    }
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    context.new_path();
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
