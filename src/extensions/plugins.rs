use serde::{Deserialize, Serialize};

use crate::core::{ShapeId, Viewport};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub record_count: usize,
    pub series_count: usize,
    pub visible_category_count: usize,
    pub value_domain: Option<(f64, f64)>,
    pub brush_selection: Option<(f64, f64)>,
    pub hovered: Option<ShapeId>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// Every layer was rebuilt from the current inputs.
    SceneRebuilt { shape_count: usize },
    /// Only the data-shape layer (and brush overlay) was rebuilt.
    DataLayerRedrawn { shape_count: usize },
    BrushApplied { start: f64, end: f64, visible_categories: usize },
    BrushRetained { start: f64, end: f64 },
    /// Terminal brush event of a gesture; hosts may batch work on it.
    BrushSettled { start: f64, end: f64 },
    HoverEntered { shape: ShapeId },
    HoverLeft,
    DimensionsChanged { width: u32, height: u32 },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating core
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ChartEvent, context: PluginContext);
}
