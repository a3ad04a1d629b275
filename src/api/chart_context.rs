use crate::interaction::InteractionState;

use super::{BrushState, RedrawScope, ResolvedScales};

/// Per-instance mutable state threaded through the pure pipeline functions.
///
/// Owned by exactly one engine; only the engine's event handlers mutate it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartContext {
    /// Scales of the last pipeline pass; `None` while the chart has nothing to
    /// lay out.
    pub scales: Option<ResolvedScales>,
    pub brush: BrushState,
    pub interaction: InteractionState,
    pub pending: RedrawScope,
}

impl ChartContext {
    pub fn invalidate(&mut self, scope: RedrawScope) {
        self.pending = self.pending.max(scope);
    }

    /// Resets view state after an input change: full brush extent, no hover.
    pub fn reset_view(&mut self, plot_width: f64, categories: Vec<String>) {
        self.brush = BrushState::full(plot_width, categories);
        self.interaction.reset();
        self.invalidate(RedrawScope::Full);
    }
}
