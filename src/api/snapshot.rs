use serde::{Deserialize, Serialize};

use crate::core::{PlotArea, Shape, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverState;
use crate::render::Renderer;

use super::legend_layout::{LegendEntry, legend_entries};
use super::palette::resolve_series_colors;
use super::{BrushSelection, ChartEngine};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub canvas: Viewport,
    pub plot: PlotArea,
    pub visible_categories: Vec<String>,
    pub value_domain: Option<(f64, f64)>,
    pub brush_selection: Option<BrushSelection>,
    pub hover: HoverState,
    pub legend: Vec<LegendEntry>,
    pub shapes: Vec<Shape>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Applies pending invalidation, then captures the current state.
    pub fn snapshot(&mut self) -> ChartResult<EngineSnapshot> {
        self.flush_pending()?;
        let colors = resolve_series_colors(&self.palette, &self.keys, &self.style);
        Ok(EngineSnapshot {
            viewport: self.config.viewport,
            canvas: self.scene.viewport,
            plot: self.plot,
            visible_categories: self.context.brush.visible.clone(),
            value_domain: self.context.scales.as_ref().map(|scales| scales.value.domain()),
            brush_selection: self.context.brush.selection,
            hover: self.context.interaction.hover().clone(),
            legend: legend_entries(&self.keys, &colors, &self.config),
            shapes: self.scene.shapes.clone(),
        })
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&mut self) -> ChartResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
