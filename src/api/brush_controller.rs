use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::BandScale;
use crate::core::windowing::categories_in_pixel_window;
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::scale_resolver::{compute_category_scale, compute_series_scale};
use super::{ChartEngine, RedrawScope};

/// Closed pixel interval over the brush track, in plot-local x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSelection {
    pub start: f64,
    pub end: f64,
}

impl BrushSelection {
    /// Normalizes so that `start <= end`.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[must_use]
    pub fn full(extent: f64) -> Self {
        Self::new(0.0, extent.max(0.0))
    }

    #[must_use]
    pub fn clamped(self, extent: f64) -> Self {
        let extent = extent.max(0.0);
        Self::new(self.start.clamp(0.0, extent), self.end.clamp(0.0, extent))
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }
}

/// In-progress pointer gesture on the brush track.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum BrushGesture {
    #[default]
    Idle,
    /// Press outside the selection: sweep a new one from `anchor`.
    Creating { anchor: f64 },
    /// Press inside the selection: translate it, keeping its width.
    Moving {
        grab_offset: f64,
        origin: BrushSelection,
    },
    ResizingStart { origin: BrushSelection },
    ResizingEnd { origin: BrushSelection },
}

/// Result of a brush update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BrushOutcome {
    /// The selection changed; these categories are now visible.
    Applied { visible: Vec<String> },
    /// The interval covered no category midpoint; the previous state stays.
    Retained,
    /// Nothing to do: no gesture, zero-width release, or nothing laid out.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrushState {
    pub selection: Option<BrushSelection>,
    /// Categories drawn in the plot, in dataset order.
    pub visible: Vec<String>,
    pub gesture: BrushGesture,
}

impl BrushState {
    /// Full-extent selection showing every category.
    #[must_use]
    pub fn full(extent: f64, categories: Vec<String>) -> Self {
        Self {
            selection: Some(BrushSelection::full(extent)),
            visible: categories,
            gesture: BrushGesture::Idle,
        }
    }

    /// Classifies a press at `x`: handles win over the selection body.
    #[must_use]
    pub fn gesture_at(&self, x: f64, handle_width: f64) -> BrushGesture {
        let Some(selection) = self.selection else {
            return BrushGesture::Creating { anchor: x };
        };
        let half = handle_width * 0.5;
        if (x - selection.start).abs() <= half {
            BrushGesture::ResizingStart { origin: selection }
        } else if (x - selection.end).abs() <= half {
            BrushGesture::ResizingEnd { origin: selection }
        } else if selection.contains(x) {
            BrushGesture::Moving {
                grab_offset: x - selection.start,
                origin: selection,
            }
        } else {
            BrushGesture::Creating { anchor: x }
        }
    }
}

/// Interval the current gesture describes with the pointer at `x`.
#[must_use]
pub fn gesture_interval(gesture: BrushGesture, x: f64, extent: f64) -> Option<BrushSelection> {
    let x = x.clamp(0.0, extent.max(0.0));
    match gesture {
        BrushGesture::Idle => None,
        BrushGesture::Creating { anchor } => Some(BrushSelection::new(anchor, x)),
        BrushGesture::Moving {
            grab_offset,
            origin,
        } => {
            let width = origin.width();
            let start = (x - grab_offset).clamp(0.0, (extent - width).max(0.0));
            Some(BrushSelection::new(start, start + width))
        }
        BrushGesture::ResizingStart { origin } => Some(BrushSelection::new(x, origin.end)),
        BrushGesture::ResizingEnd { origin } => Some(BrushSelection::new(origin.start, x)),
    }
}

/// Categories whose brush-band midpoint lies in the clamped selection.
pub fn map_selection(
    brush_scale: &BandScale,
    selection: BrushSelection,
) -> ChartResult<Vec<String>> {
    let (_, extent) = brush_scale.range();
    let selection = selection.clamped(extent);
    let visible = categories_in_pixel_window(brush_scale, selection.start, selection.end);
    if visible.is_empty() {
        return Err(ChartError::InvalidBrushSelection {
            start: selection.start,
            end: selection.end,
        });
    }
    Ok(visible)
}

impl<R: Renderer> ChartEngine<R> {
    /// Applies an interval from a brush gesture in progress.
    pub fn on_brush(&mut self, start: f64, end: f64) -> ChartResult<BrushOutcome> {
        self.apply_brush(BrushSelection::new(start, end))
    }

    /// Same update as `on_brush`, then signals that the gesture settled.
    pub fn on_brush_end(&mut self, start: f64, end: f64) -> ChartResult<BrushOutcome> {
        let outcome = self.apply_brush(BrushSelection::new(start, end))?;
        if let Some(selection) = self.context.brush.selection {
            self.emit_plugin_event(ChartEvent::BrushSettled {
                start: selection.start,
                end: selection.end,
            });
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn brush_selection(&self) -> Option<BrushSelection> {
        self.context.brush.selection
    }

    #[must_use]
    pub fn visible_categories(&self) -> &[String] {
        &self.context.brush.visible
    }

    #[must_use]
    pub fn brush_gesture(&self) -> BrushGesture {
        self.context.brush.gesture
    }

    /// Starts a drag on the brush track at plot-local `x`.
    pub fn brush_drag_start(&mut self, x: f64) -> ChartResult<()> {
        if !x.is_finite() {
            return Err(ChartError::InvalidData(
                "brush pointer must be finite".to_owned(),
            ));
        }
        let handle_width = self.config.brush_layout.handle_width;
        self.context.brush.gesture = self.context.brush.gesture_at(x, handle_width);
        debug!(x, gesture = ?self.context.brush.gesture, "brush drag start");
        Ok(())
    }

    pub fn brush_drag_move(&mut self, x: f64) -> ChartResult<BrushOutcome> {
        let Some(selection) = self.gesture_selection(x)? else {
            return Ok(BrushOutcome::Ignored);
        };
        if selection.width() <= 0.0 {
            return Ok(BrushOutcome::Ignored);
        }
        self.on_brush(selection.start, selection.end)
    }

    /// Finishes the drag. A zero-width release (a click) leaves the
    /// selection untouched.
    pub fn brush_drag_end(&mut self, x: f64) -> ChartResult<BrushOutcome> {
        let selection = self.gesture_selection(x)?;
        self.context.brush.gesture = BrushGesture::Idle;
        match selection {
            Some(selection) if selection.width() > 0.0 => {
                self.on_brush_end(selection.start, selection.end)
            }
            _ => Ok(BrushOutcome::Ignored),
        }
    }

    fn gesture_selection(&self, x: f64) -> ChartResult<Option<BrushSelection>> {
        if !x.is_finite() {
            return Err(ChartError::InvalidData(
                "brush pointer must be finite".to_owned(),
            ));
        }
        Ok(gesture_interval(
            self.context.brush.gesture,
            x,
            self.plot.width,
        ))
    }

    fn apply_brush(&mut self, requested: BrushSelection) -> ChartResult<BrushOutcome> {
        if !requested.start.is_finite() || !requested.end.is_finite() {
            return Err(ChartError::InvalidData(
                "brush interval must be finite".to_owned(),
            ));
        }
        self.flush_pending()?;

        let Some(scales) = self.context.scales.as_ref() else {
            debug!("brush ignored: nothing laid out");
            return Ok(BrushOutcome::Ignored);
        };
        let selection = requested.clamped(scales.plot.width);
        let visible = match map_selection(&scales.brush, selection) {
            Ok(visible) => visible,
            Err(err @ ChartError::InvalidBrushSelection { .. }) => {
                debug!(error = %err, "retaining previous brush selection");
                self.emit_plugin_event(ChartEvent::BrushRetained {
                    start: selection.start,
                    end: selection.end,
                });
                return Ok(BrushOutcome::Retained);
            }
            Err(err) => return Err(err),
        };

        let plot_width = scales.plot.width;
        let brush = &mut self.context.brush;
        let visible_changed = brush.visible != visible;
        brush.selection = Some(selection);
        brush.visible = visible.clone();

        if self.config.brush_full_rescale {
            self.context.invalidate(RedrawScope::Full);
        } else {
            if visible_changed {
                let category = compute_category_scale(
                    visible.iter().cloned(),
                    plot_width,
                    self.config.effective_category_padding(),
                )?;
                let series = compute_series_scale(
                    &self.keys,
                    category.bandwidth(),
                    self.config.effective_series_padding(),
                )?;
                if let Some(scales) = self.context.scales.as_mut() {
                    scales.category = category;
                    scales.series = series;
                }
            }
            // The overlay moves even when the subset does not.
            self.context.invalidate(RedrawScope::DataShapes);
        }
        if visible_changed {
            self.context.interaction.reset();
        }

        debug!(
            start = selection.start,
            end = selection.end,
            visible = visible.len(),
            "brush applied"
        );
        self.emit_plugin_event(ChartEvent::BrushApplied {
            start: selection.start,
            end: selection.end,
            visible_categories: visible.len(),
        });
        Ok(BrushOutcome::Applied { visible })
    }
}

#[cfg(test)]
mod tests {
    use super::{BrushGesture, BrushSelection, BrushState, gesture_interval, map_selection};
    use crate::core::BandScale;
    use crate::error::ChartError;

    fn scale() -> BandScale {
        let keys = ["Jan", "Feb", "Mar", "Apr"].map(str::to_owned).to_vec();
        BandScale::new(keys, (0.0, 420.0), 0.2).unwrap()
    }

    #[test]
    fn full_extent_maps_to_every_category() {
        let visible = map_selection(&scale(), BrushSelection::full(420.0)).unwrap();
        assert_eq!(visible, ["Jan", "Feb", "Mar", "Apr"]);
    }

    #[test]
    fn interval_between_midpoints_is_rejected() {
        let err = map_selection(&scale(), BrushSelection::new(70.0, 150.0)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidBrushSelection { .. }));
    }

    #[test]
    fn out_of_range_interval_is_clamped() {
        let visible = map_selection(&scale(), BrushSelection::new(300.0, 900.0)).unwrap();
        assert_eq!(visible, ["Apr"]);
    }

    #[test]
    fn press_classification_prefers_handles() {
        let state = BrushState::full(420.0, Vec::new());
        assert!(matches!(state.gesture_at(3.0, 14.0), BrushGesture::ResizingStart { .. }));
        assert!(matches!(state.gesture_at(415.0, 14.0), BrushGesture::ResizingEnd { .. }));
        assert!(matches!(state.gesture_at(200.0, 14.0), BrushGesture::Moving { .. }));
    }

    #[test]
    fn moving_keeps_width_inside_extent() {
        let origin = BrushSelection::new(100.0, 200.0);
        let gesture = BrushGesture::Moving {
            grab_offset: 50.0,
            origin,
        };
        let moved = gesture_interval(gesture, 400.0, 420.0).unwrap();
        assert_eq!(moved, BrushSelection::new(320.0, 420.0));
    }
}
