use serde::{Deserialize, Serialize};

use crate::core::{Shape, ShapeId, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{LinePrimitive, PathPrimitive, RectPrimitive, SceneLayerKind, TextPrimitive};

/// Translation applied to every primitive of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerTransform {
    pub dx: f64,
    pub dy: f64,
}

impl LayerTransform {
    #[must_use]
    pub const fn translate(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Primitives of one layer. Backends draw rects, then paths, then lines,
/// then texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayer {
    pub kind: SceneLayerKind,
    pub transform: LayerTransform,
    pub rects: Vec<RectPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl SceneLayer {
    #[must_use]
    pub fn new(kind: SceneLayerKind, transform: LayerTransform) -> Self {
        Self {
            kind,
            transform,
            rects: Vec::new(),
            paths: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.paths.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.rects.len() + self.paths.len() + self.lines.len() + self.texts.len()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.transform.dx.is_finite() || !self.transform.dy.is_finite() {
            return Err(ChartError::InvalidData(
                "layer transform must be finite".to_owned(),
            ));
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic output of one pipeline pass.
///
/// `shapes` is the hit-test index of hoverable data shapes in plot-local
/// pixels; it mirrors what the `DataShapes` layer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    pub layers: Vec<SceneLayer>,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// A scene with no layers, produced when there is nothing to lay out.
    #[must_use]
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: Vec::new(),
            shapes: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(SceneLayer::is_empty)
    }

    #[must_use]
    pub fn layer(&self, kind: SceneLayerKind) -> Option<&SceneLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn layer_kinds(&self) -> Vec<SceneLayerKind> {
        self.layers.iter().map(|layer| layer.kind).collect()
    }

    /// Swaps in a rebuilt layer of the same kind, keeping its position.
    /// Returns `false` when the scene has no such layer.
    pub fn replace_layer(&mut self, layer: SceneLayer) -> bool {
        match self.layers.iter_mut().find(|current| current.kind == layer.kind) {
            Some(slot) => {
                *slot = layer;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    /// Topmost shape under a plot-local point.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Shape> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.geometry.contains(x, y))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }
}
