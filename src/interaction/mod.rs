use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Datum, ShapeId};
use crate::render::Color;

/// Caller-supplied tooltip text builder.
pub type TooltipFormatter = Arc<dyn Fn(&Datum) -> String + Send + Sync + 'static>;

/// Text used when no formatter is installed.
#[must_use]
pub fn default_tooltip_text(x_label: &str, datum: &Datum) -> String {
    format!(
        "{x_label}: {}\n{}: {}",
        datum.category, datum.series_key, datum.value
    )
}

/// Which shape, if any, the pointer is over. The pointer is in viewport
/// pixels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hover {
        shape: ShapeId,
        datum: Datum,
        pointer: (f64, f64),
    },
}

impl HoverState {
    #[must_use]
    pub fn shape(&self) -> Option<ShapeId> {
        match self {
            Self::Idle => None,
            Self::Hover { shape, .. } => Some(*shape),
        }
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        matches!(self, Self::Hover { .. })
    }
}

/// Floating tooltip placed next to the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipOverlay {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

/// Pointer offset of the tooltip's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipOffset {
    pub dx: f64,
    pub dy: f64,
}

impl Default for TooltipOffset {
    fn default() -> Self {
        Self { dx: 15.0, dy: -35.0 }
    }
}

/// Hover state machine: `Idle` on enter goes to `Hover`, move updates the
/// pointer, leave returns to `Idle`. At most one shape is hovered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    hover: HoverState,
}

impl InteractionState {
    #[must_use]
    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    #[must_use]
    pub fn hovered_shape(&self) -> Option<ShapeId> {
        self.hover.shape()
    }

    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        match &self.hover {
            HoverState::Idle => None,
            HoverState::Hover { pointer, .. } => Some(*pointer),
        }
    }

    /// Returns `true` when the hovered shape changed, which requires the
    /// data layer to be redrawn with the new highlight.
    pub fn on_pointer_enter(&mut self, shape: ShapeId, datum: Datum, x: f64, y: f64) -> bool {
        let changed = self.hover.shape() != Some(shape);
        self.hover = HoverState::Hover {
            shape,
            datum,
            pointer: (x, y),
        };
        changed
    }

    /// Moves the tooltip anchor; ignored while idle.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        match &mut self.hover {
            HoverState::Idle => false,
            HoverState::Hover { pointer, .. } => {
                *pointer = (x, y);
                true
            }
        }
    }

    /// Returns `true` when a shape was hovered.
    pub fn on_pointer_leave(&mut self) -> bool {
        let was_hovering = self.hover.is_hovering();
        self.hover = HoverState::Idle;
        was_hovering
    }

    pub fn reset(&mut self) {
        self.hover = HoverState::Idle;
    }

    /// Tooltip for the current hover, if any.
    #[must_use]
    pub fn tooltip(
        &self,
        text_for: impl FnOnce(&Datum) -> String,
        color: Color,
        offset: TooltipOffset,
    ) -> Option<TooltipOverlay> {
        match &self.hover {
            HoverState::Idle => None,
            HoverState::Hover { datum, pointer, .. } => Some(TooltipOverlay {
                text: text_for(datum),
                x: pointer.0 + offset.dx,
                y: pointer.1 + offset.dy,
                color,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionState, TooltipOffset, default_tooltip_text};
    use crate::core::{Datum, ShapeId};
    use crate::render::Color;

    fn datum() -> Datum {
        Datum {
            category: "Jan".to_owned(),
            series_key: "A".to_owned(),
            value: 5.0,
        }
    }

    #[test]
    fn enter_move_leave_cycle() {
        let mut state = InteractionState::default();
        assert!(!state.on_pointer_move(1.0, 1.0));
        assert!(state.on_pointer_enter(ShapeId::new(0, 0), datum(), 10.0, 20.0));
        assert!(!state.on_pointer_enter(ShapeId::new(0, 0), datum(), 11.0, 20.0));
        assert!(state.on_pointer_move(12.0, 22.0));
        assert_eq!(state.pointer(), Some((12.0, 22.0)));
        assert!(state.on_pointer_leave());
        assert!(!state.on_pointer_leave());
        assert_eq!(state.hovered_shape(), None);
    }

    #[test]
    fn tooltip_is_offset_from_pointer() {
        let mut state = InteractionState::default();
        state.on_pointer_enter(ShapeId::new(0, 1), datum(), 100.0, 100.0);
        let tooltip = state
            .tooltip(
                |d| default_tooltip_text("Month", d),
                Color::rgb(0.0, 0.0, 1.0),
                TooltipOffset::default(),
            )
            .expect("tooltip while hovering");
        assert_eq!((tooltip.x, tooltip.y), (115.0, 65.0));
        assert_eq!(tooltip.text, "Month: Jan\nA: 5");
    }
}
