//! Pixel geometry for bars, curved silhouettes and line series.
//!
//! Everything here is expressed in plot-local pixels: `x` grows right from
//! the plot's left edge and `y` grows down from its top edge.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::band_scale::BandScale;
use crate::core::dataset::{Datum, Record, SeriesKeySet};
use crate::core::path::PathGeometry;
use crate::core::value_scale::ValueScale;

/// Below this length two Catmull-Rom knots are treated as coincident.
const KNOT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarStyle {
    #[default]
    Rectangular,
    Curved,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

impl RectGeometry {
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    Rect(RectGeometry),
    Path(PathGeometry),
    Point { cx: f64, cy: f64, radius: f64 },
}

impl ShapeGeometry {
    /// Hit test in plot-local pixels. Paths use their filled outline.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(x, y),
            Self::Path(path) => path.contains(x, y),
            Self::Point { cx, cy, radius } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}

/// Stable identity of a drawn datum: dataset record index plus series index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId {
    pub record_index: usize,
    pub series_index: usize,
}

impl ShapeId {
    #[must_use]
    pub const fn new(record_index: usize, series_index: usize) -> Self {
        Self {
            record_index,
            series_index,
        }
    }
}

/// A hoverable data shape tagged with the datum it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub datum: Datum,
    pub geometry: ShapeGeometry,
}

/// Stroke path of one line series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLine {
    pub series_index: usize,
    pub series_key: String,
    pub path: PathGeometry,
}

/// Horizontal slot of one series inside one category band: `(x, width)`.
#[must_use]
pub fn bar_slot(
    category_scale: &BandScale,
    series_scale: &BandScale,
    category: &str,
    series_key: &str,
) -> Option<(f64, f64)> {
    let band_start = category_scale.position(category)?;
    let offset = series_scale.position(series_key)?;
    Some((band_start + offset, series_scale.bandwidth()))
}

/// Rectangle spanning from the zero baseline to `value`.
#[must_use]
pub fn bar_rect(
    x: f64,
    width: f64,
    value: f64,
    value_scale: ValueScale,
    corner_radius: f64,
) -> RectGeometry {
    let y0 = value_scale.baseline();
    let y_value = value_scale.to_pixel(value);
    let top = if value >= 0.0 { y_value } else { y0 };
    let height = (y_value - y0).abs();
    RectGeometry {
        x,
        y: top,
        width,
        height,
        corner_radius: corner_radius.min(width * 0.5).min(height * 0.5).max(0.0),
    }
}

/// Concave triangle rising from the baseline to a tip at the slot midpoint,
/// mirrored below the baseline for negative values.
#[must_use]
pub fn curved_bar_path(x: f64, width: f64, value: f64, value_scale: ValueScale) -> PathGeometry {
    let base = value_scale.baseline();
    let tip = value_scale.to_pixel(value);
    let h = (tip - base).abs();
    let dir = if value >= 0.0 { -1.0 } else { 1.0 };
    let w = width;

    PathGeometry::new()
        .move_to(x, base)
        .cubic_to(
            (x + w * 0.2, base + dir * h * 0.2),
            (x + w * 0.35, tip - dir * h * 0.4),
            (x + w * 0.5, tip),
        )
        .cubic_to(
            (x + w * 0.65, tip - dir * h * 0.4),
            (x + w * 0.8, base + dir * h * 0.2),
            (x + w, base),
        )
        .close()
}

/// Polyline through `points`, or a centripetal Catmull-Rom spline
/// (alpha 0.5) expressed as cubic Beziers when `smooth` is set.
#[must_use]
pub fn line_path(points: &[(f64, f64)], smooth: bool) -> Option<PathGeometry> {
    let (&first, rest) = points.split_first()?;
    let mut path = PathGeometry::new().move_to(first.0, first.1);
    if !smooth || points.len() < 3 {
        for &(x, y) in rest {
            path = path.line_to(x, y);
        }
        return Some(path);
    }

    for index in 0..points.len() - 1 {
        let p0 = points[index.saturating_sub(1)];
        let p1 = points[index];
        let p2 = points[index + 1];
        let p3 = points[(index + 2).min(points.len() - 1)];
        let (c1, c2) = catmull_rom_controls(p0, p1, p2, p3);
        path = path.cubic_to(c1, c2, p2);
    }
    Some(path)
}

/// Bezier control points of the centripetal segment `p1 → p2`. Duplicated
/// end knots collapse the matching control point onto the endpoint.
fn catmull_rom_controls(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
) -> ((f64, f64), (f64, f64)) {
    // (distance²)^alpha with alpha = 0.5, and its square root.
    let l01_2a = distance(p0, p1);
    let l12_2a = distance(p1, p2);
    let l23_2a = distance(p2, p3);
    let (l01_a, l12_a, l23_a) = (l01_2a.sqrt(), l12_2a.sqrt(), l23_2a.sqrt());

    let mut c1 = p1;
    if l01_a > KNOT_EPSILON {
        let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
        let n = 3.0 * l01_a * (l01_a + l12_a);
        c1 = (
            (p1.0 * a - p0.0 * l12_2a + p2.0 * l01_2a) / n,
            (p1.1 * a - p0.1 * l12_2a + p2.1 * l01_2a) / n,
        );
    }

    let mut c2 = p2;
    if l23_a > KNOT_EPSILON {
        let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
        let m = 3.0 * l23_a * (l23_a + l12_a);
        c2 = (
            (p2.0 * b + p1.0 * l23_2a - p3.0 * l12_2a) / m,
            (p2.1 * b + p1.1 * l23_2a - p3.1 * l12_2a) / m,
        );
    }

    (c1, c2)
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Scales needed to place data shapes.
#[derive(Debug, Clone, Copy)]
pub struct GeometryScales<'a> {
    pub category: &'a BandScale,
    pub series: &'a BandScale,
    pub value: ValueScale,
}

/// One shape per present `(record, series)` value in the grouped layout.
#[must_use]
pub fn build_bar_shapes(
    records: &[(usize, &Record)],
    keys: &SeriesKeySet,
    scales: GeometryScales<'_>,
    style: BarStyle,
    corner_radius: f64,
) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(records.len() * keys.len());
    for &(record_index, record) in records {
        for (series_index, key) in keys.keys().iter().enumerate() {
            let Some(value) = record.value(key) else {
                continue;
            };
            let Some((x, width)) = bar_slot(scales.category, scales.series, &record.category, key)
            else {
                continue;
            };
            let geometry = match style {
                BarStyle::Rectangular => {
                    ShapeGeometry::Rect(bar_rect(x, width, value, scales.value, corner_radius))
                }
                BarStyle::Curved => {
                    ShapeGeometry::Path(curved_bar_path(x, width, value, scales.value))
                }
            };
            shapes.push(Shape {
                id: ShapeId::new(record_index, series_index),
                datum: Datum {
                    category: record.category.clone(),
                    series_key: key.clone(),
                    value,
                },
                geometry,
            });
        }
    }
    shapes
}

/// Series stroke paths plus one point marker shape per present sample.
///
/// Samples sit at category band midpoints. Missing values are skipped, so
/// the stroke joins the neighbouring samples directly.
#[must_use]
pub fn build_line_shapes(
    records: &[(usize, &Record)],
    keys: &SeriesKeySet,
    category_scale: &BandScale,
    value_scale: ValueScale,
    smooth: bool,
    point_radius: f64,
) -> (Vec<SeriesLine>, Vec<Shape>) {
    let mut lines = Vec::with_capacity(keys.len());
    let mut points = Vec::new();

    for (series_index, key) in keys.keys().iter().enumerate() {
        let mut samples: SmallVec<[(f64, f64); 16]> = SmallVec::new();
        for &(record_index, record) in records {
            let Some(value) = record.value(key) else {
                continue;
            };
            let Some(cx) = category_scale.midpoint(&record.category) else {
                continue;
            };
            let cy = value_scale.to_pixel(value);
            samples.push((cx, cy));
            points.push(Shape {
                id: ShapeId::new(record_index, series_index),
                datum: Datum {
                    category: record.category.clone(),
                    series_key: key.clone(),
                    value,
                },
                geometry: ShapeGeometry::Point {
                    cx,
                    cy,
                    radius: point_radius,
                },
            });
        }

        if let Some(path) = line_path(&samples, smooth) {
            lines.push(SeriesLine {
                series_index,
                series_key: key.clone(),
                path,
            });
        }
    }

    (lines, points)
}

#[cfg(test)]
mod tests {
    use super::{RectGeometry, ShapeGeometry, bar_rect, curved_bar_path, line_path};
    use crate::core::path::PathSegment;
    use crate::core::value_scale::ValueScale;

    fn scale() -> ValueScale {
        ValueScale::new((-3.0, 5.0), (160.0, 0.0)).unwrap()
    }

    #[test]
    fn negative_bar_hangs_from_baseline() {
        let rect = bar_rect(10.0, 20.0, -3.0, scale(), 0.0);
        assert_eq!(
            rect,
            RectGeometry {
                x: 10.0,
                y: 100.0,
                width: 20.0,
                height: 60.0,
                corner_radius: 0.0
            }
        );
    }

    #[test]
    fn corner_radius_is_capped_by_bar_size() {
        let rect = bar_rect(0.0, 6.0, 5.0, scale(), 5.0);
        assert_eq!(rect.corner_radius, 3.0);
    }

    #[test]
    fn curved_path_tip_sits_at_slot_midpoint() {
        let path = curved_bar_path(0.0, 40.0, 5.0, scale());
        match path.segments()[1] {
            PathSegment::CubicTo { x, y, c1y, .. } => {
                assert_eq!((x, y), (20.0, 0.0));
                // Upward bar: first control point lifts above the baseline.
                assert!(c1y < 100.0);
            }
            other => panic!("unexpected segment {other:?}"),
        }
    }

    #[test]
    fn curved_bar_hit_test_follows_the_concave_outline() {
        let shape = ShapeGeometry::Path(curved_bar_path(0.0, 40.0, 5.0, scale()));
        let (min_x, min_y, _, _) = match &shape {
            ShapeGeometry::Path(path) => path.bounds().unwrap(),
            other => panic!("unexpected geometry {other:?}"),
        };
        // Empty canvas beside the tip, still inside the bounding box.
        assert!(!shape.contains(min_x + 1.0, min_y + 1.0));
        assert!(!shape.contains(4.0, 40.0));
        assert!(shape.contains(20.0, 95.0));
        assert!(shape.contains(20.0, 10.0));
    }

    #[test]
    fn smooth_line_ends_at_last_point_with_collapsed_control() {
        let points = [(0.0, 10.0), (10.0, 0.0), (20.0, 10.0)];
        let path = line_path(&points, true).unwrap();
        assert_eq!(path.segments().len(), 3);
        match path.segments()[2] {
            PathSegment::CubicTo { c2x, c2y, x, y, .. } => {
                assert_eq!((x, y), (20.0, 10.0));
                assert_eq!((c2x, c2y), (20.0, 10.0));
            }
            other => panic!("unexpected segment {other:?}"),
        }
    }

    #[test]
    fn single_point_line_is_a_bare_move() {
        let path = line_path(&[(5.0, 5.0)], true).unwrap();
        assert_eq!(path.segments().len(), 1);
        assert!(line_path(&[], false).is_none());
    }
}
