use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Outer chart size in pixels, as supplied by the container-size provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot for title, legend and axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(50.0, 30.0, 60.0, 70.0)
    }
}

/// Inner plot rectangle in absolute viewport pixels.
///
/// Data-layer geometry is expressed relative to `(left, top)`; the scene
/// carries that offset as the layer transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Derives the plot rectangle. `reserved_bottom_px` is carved out of the
    /// inner height below the plot (the brush band of the brushable variant).
    pub fn from_viewport(
        viewport: Viewport,
        margins: Margins,
        reserved_bottom_px: f64,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let width = f64::from(viewport.width) - margins.left - margins.right;
        let height =
            f64::from(viewport.height) - margins.top - margins.bottom - reserved_bottom_px;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidPlotArea { width, height });
        }

        Ok(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.left + self.width * 0.5
    }

    /// Converts absolute pointer coordinates into plot-local ones.
    #[must_use]
    pub fn to_local(self, x: f64, y: f64) -> (f64, f64) {
        (x - self.left, y - self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::{Margins, PlotArea, Viewport};
    use crate::error::ChartError;

    #[test]
    fn plot_area_subtracts_margins_and_reserved_band() {
        let plot =
            PlotArea::from_viewport(Viewport::new(800, 400), Margins::default(), 60.0).unwrap();
        assert_eq!(plot.width, 700.0);
        assert_eq!(plot.height, 230.0);
        assert_eq!(plot.bottom(), 280.0);
    }

    #[test]
    fn plot_area_rejects_margins_larger_than_viewport() {
        let err = PlotArea::from_viewport(Viewport::new(80, 400), Margins::default(), 0.0)
            .expect_err("collapsed width");
        assert!(matches!(err, ChartError::InvalidPlotArea { .. }));
    }
}
