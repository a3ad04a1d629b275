use crate::error::ChartResult;
use crate::render::{Renderer, Scene};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates scene content so tests catch invalid geometry without
/// a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_layer_count: usize,
    pub last_primitive_count: usize,
    pub last_shape_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.render_count += 1;
        self.last_layer_count = scene.layers.len();
        self.last_primitive_count = scene.layers.iter().map(|layer| layer.primitive_count()).sum();
        self.last_shape_count = scene.shapes.len();
        Ok(())
    }
}
