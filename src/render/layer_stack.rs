use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneLayerKind {
    Grid,
    Axes,
    Baseline,
    DataShapes,
    Title,
    Legend,
    BrushOverlay,
}

impl SceneLayerKind {
    /// Whether the layer is drawn relative to the plot origin rather than the
    /// viewport origin.
    #[must_use]
    pub const fn is_plot_local(self) -> bool {
        matches!(self, Self::Grid | Self::Axes | Self::Baseline | Self::DataShapes)
    }
}

/// Bottom-to-top layer order of one chart.
#[must_use]
pub fn canonical_layer_order(brushable: bool) -> Vec<SceneLayerKind> {
    let mut layers = vec![
        SceneLayerKind::Grid,
        SceneLayerKind::Axes,
        SceneLayerKind::Baseline,
        SceneLayerKind::DataShapes,
        SceneLayerKind::Title,
        SceneLayerKind::Legend,
    ];
    if brushable {
        layers.push(SceneLayerKind::BrushOverlay);
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::{SceneLayerKind, canonical_layer_order};

    #[test]
    fn brush_overlay_is_topmost_and_optional() {
        assert_eq!(canonical_layer_order(false).len(), 6);
        let layers = canonical_layer_order(true);
        assert_eq!(layers.first(), Some(&SceneLayerKind::Grid));
        assert_eq!(layers.last(), Some(&SceneLayerKind::BrushOverlay));
    }
}
