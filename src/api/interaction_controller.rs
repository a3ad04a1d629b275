use tracing::trace;

use crate::core::{Datum, ShapeGeometry, ShapeId};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::{HoverState, TooltipOverlay, default_tooltip_text};
use crate::render::Renderer;

use super::palette::resolve_series_colors;
use super::{ChartEngine, RedrawScope};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn hover_state(&self) -> &HoverState {
        self.context.interaction.hover()
    }

    #[must_use]
    pub fn hovered_shape(&self) -> Option<ShapeId> {
        self.context.interaction.hovered_shape()
    }

    /// Pointer entered the shape `id`; `(x, y)` is in viewport pixels.
    ///
    /// Returns `false` when `id` is not in the current scene.
    pub fn pointer_enter_shape(&mut self, id: ShapeId, x: f64, y: f64) -> ChartResult<bool> {
        validate_pointer(x, y)?;
        self.flush_pending()?;
        let Some(datum) = self.scene.shape(id).map(|shape| shape.datum.clone()) else {
            return Ok(false);
        };
        self.enter(id, datum, x, y);
        Ok(true)
    }

    /// Raw pointer move in viewport pixels. Hit-tests the scene's shape
    /// index and drives enter/move/leave from the result.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        validate_pointer(x, y)?;
        self.flush_pending()?;
        let (local_x, local_y) = self.plot.to_local(x, y);
        let hit = self
            .scene
            .hit_test(local_x, local_y)
            .map(|shape| (shape.id, shape.datum.clone()));
        if hit.is_none() && self.within_highlighted_marker(local_x, local_y) {
            self.context.interaction.on_pointer_move(x, y);
            return Ok(());
        }
        match hit {
            Some((id, _)) if self.context.interaction.hovered_shape() == Some(id) => {
                self.context.interaction.on_pointer_move(x, y);
            }
            Some((id, datum)) => self.enter(id, datum, x, y),
            None => self.pointer_leave(),
        }
        Ok(())
    }

    pub fn pointer_leave(&mut self) {
        if self.context.interaction.on_pointer_leave() {
            trace!("hover left");
            self.context.invalidate(RedrawScope::DataShapes);
            self.emit_plugin_event(ChartEvent::HoverLeft);
        }
    }

    /// Tooltip for the hovered shape, colored with its series color.
    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipOverlay> {
        let shape = self.context.interaction.hovered_shape()?;
        let colors = resolve_series_colors(&self.palette, &self.keys, &self.style);
        let color = colors
            .get(shape.series_index)
            .copied()
            .unwrap_or(self.style.text_color);
        let x_label = self.config.x_label.as_str();
        let formatter = self.tooltip_formatter.as_ref();
        self.context.interaction.tooltip(
            |datum| match formatter {
                Some(format) => format(datum),
                None => default_tooltip_text(x_label, datum),
            },
            color,
            self.config.tooltip_offset,
        )
    }

    /// Hovered line points are drawn with the larger hover radius, so the
    /// hover holds across the whole highlighted marker.
    fn within_highlighted_marker(&self, local_x: f64, local_y: f64) -> bool {
        let Some(id) = self.context.interaction.hovered_shape() else {
            return false;
        };
        match self.scene.shape(id).map(|shape| &shape.geometry) {
            Some(&ShapeGeometry::Point { cx, cy, .. }) => ShapeGeometry::Point {
                cx,
                cy,
                radius: self.style.point_hover_radius_px,
            }
            .contains(local_x, local_y),
            _ => false,
        }
    }

    fn enter(&mut self, id: ShapeId, datum: Datum, x: f64, y: f64) {
        if self.context.interaction.on_pointer_enter(id, datum, x, y) {
            trace!(record = id.record_index, series = id.series_index, "hover entered");
            self.context.invalidate(RedrawScope::DataShapes);
            self.emit_plugin_event(ChartEvent::HoverEntered { shape: id });
        }
    }
}

fn validate_pointer(x: f64, y: f64) -> ChartResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}
