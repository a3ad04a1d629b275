mod layer_stack;
mod null_renderer;
mod primitives;
mod scene;
mod surface;

pub use layer_stack::{SceneLayerKind, canonical_layer_order};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use scene::{LayerTransform, Scene, SceneLayer};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface, SurfaceRenderer, draw_scene};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `Scene` so drawing
/// code stays isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer, CairoSurface};
