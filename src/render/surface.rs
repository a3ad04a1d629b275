use serde::{Deserialize, Serialize};

use crate::core::PathGeometry;
use crate::error::ChartResult;

use super::{
    Color, LayerTransform, PathPrimitive, RectPrimitive, Renderer, Scene, SceneLayerKind,
    TextPrimitive,
};

/// Immediate-mode drawing sink.
///
/// Lines reach the surface as two-point stroked paths, so backends only need
/// rect, path and text drawing plus translated groups.
pub trait DrawingSurface {
    fn clear(&mut self, width: u32, height: u32) -> ChartResult<()>;
    fn begin_group(&mut self, kind: SceneLayerKind, transform: LayerTransform) -> ChartResult<()>;
    fn end_group(&mut self) -> ChartResult<()>;
    fn draw_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()>;
    fn draw_path(&mut self, path: &PathPrimitive) -> ChartResult<()>;
    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()>;
}

/// Replays a validated scene onto any surface in layer order.
pub fn draw_scene<S: DrawingSurface + ?Sized>(surface: &mut S, scene: &Scene) -> ChartResult<()> {
    scene.validate()?;
    surface.clear(scene.viewport.width, scene.viewport.height)?;
    for layer in &scene.layers {
        surface.begin_group(layer.kind, layer.transform)?;
        for rect in &layer.rects {
            surface.draw_rect(rect)?;
        }
        for path in &layer.paths {
            surface.draw_path(path)?;
        }
        for line in &layer.lines {
            let segment = PathGeometry::new()
                .move_to(line.x1, line.y1)
                .line_to(line.x2, line.y2);
            let path = PathPrimitive::stroked(segment, line.color, line.stroke_width)
                .with_stroke_style(line.stroke_style);
            surface.draw_path(&path)?;
        }
        for text in &layer.texts {
            surface.draw_text(text)?;
        }
        surface.end_group()?;
    }
    Ok(())
}

/// `Renderer` adapter over a `DrawingSurface`.
#[derive(Debug, Default)]
pub struct SurfaceRenderer<S> {
    surface: S,
}

impl<S: DrawingSurface> SurfaceRenderer<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: DrawingSurface> Renderer for SurfaceRenderer<S> {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        draw_scene(&mut self.surface, scene)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear { width: u32, height: u32 },
    BeginGroup { kind: SceneLayerKind, transform: LayerTransform },
    EndGroup,
    Rect(RectPrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
}

/// Surface that records draw calls; used by tests and golden comparisons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill colors of recorded rects and filled paths, in draw order.
    #[must_use]
    pub fn fill_colors(&self) -> Vec<Color> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Rect(rect) => Some(rect.fill_color),
                DrawCommand::Path(path) => path.fill_color,
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn group_order(&self) -> Vec<SceneLayerKind> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::BeginGroup { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self, width: u32, height: u32) -> ChartResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }

    fn begin_group(&mut self, kind: SceneLayerKind, transform: LayerTransform) -> ChartResult<()> {
        self.commands.push(DrawCommand::BeginGroup { kind, transform });
        Ok(())
    }

    fn end_group(&mut self) -> ChartResult<()> {
        self.commands.push(DrawCommand::EndGroup);
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        self.commands.push(DrawCommand::Rect(*rect));
        Ok(())
    }

    fn draw_path(&mut self, path: &PathPrimitive) -> ChartResult<()> {
        self.commands.push(DrawCommand::Path(path.clone()));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        self.commands.push(DrawCommand::Text(text.clone()));
        Ok(())
    }
}
