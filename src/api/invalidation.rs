use serde::{Deserialize, Serialize};

/// Ordered redraw levels; pending requests coalesce to the widest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum RedrawScope {
    #[default]
    None,
    /// Rebuild the data-shape layer (and brush overlay) against the current
    /// scales; axes, title and legend are kept.
    DataShapes,
    /// Clear and rebuild every layer from the inputs.
    Full,
}

impl RedrawScope {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}
