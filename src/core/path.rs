use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Cubic-Bezier approximation constant for a quarter circle.
const KAPPA: f64 = 0.552_284_749_8;
/// Chords per cubic segment when flattening for hit tests.
const FLATTEN_STEPS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathSegment {
    fn points(self) -> SmallVec<[(f64, f64); 3]> {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => smallvec::smallvec![(x, y)],
            Self::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => smallvec::smallvec![(c1x, c1y), (c2x, c2y), (x, y)],
            Self::Close => SmallVec::new(),
        }
    }
}

/// Backend-neutral vector path in plot-local pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathGeometry {
    segments: SmallVec<[PathSegment; 8]>,
}

impl PathGeometry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo { x, y });
        self
    }

    #[must_use]
    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo { x, y });
        self
    }

    #[must_use]
    pub fn cubic_to(mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) -> Self {
        self.segments.push(PathSegment::CubicTo {
            c1x: c1.0,
            c1y: c1.1,
            c2x: c2.0,
            c2y: c2.1,
            x: end.0,
            y: end.1,
        });
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Closed circle made of four cubic arcs, starting at the rightmost point.
    #[must_use]
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        let k = radius * KAPPA;
        Self::new()
            .move_to(cx + radius, cy)
            .cubic_to((cx + radius, cy + k), (cx + k, cy + radius), (cx, cy + radius))
            .cubic_to((cx - k, cy + radius), (cx - radius, cy + k), (cx - radius, cy))
            .cubic_to((cx - radius, cy - k), (cx - k, cy - radius), (cx, cy - radius))
            .cubic_to((cx + k, cy - radius), (cx + radius, cy - k), (cx + radius, cy))
            .close()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }

    /// Axis-aligned bounds of all vertices and control points as
    /// `(min_x, min_y, max_x, max_y)`. Control points bound the curve, so the
    /// box may be slightly larger than the drawn outline.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.segments
            .iter()
            .flat_map(|segment| segment.points())
            .fold(None, |acc, (x, y)| {
                Some(match acc {
                    Some((min_x, min_y, max_x, max_y)) => (
                        f64::min(min_x, x),
                        f64::min(min_y, y),
                        f64::max(max_x, x),
                        f64::max(max_y, y),
                    ),
                    None => (x, y, x, y),
                })
            })
    }

    /// Even-odd fill test against the outline with cubics flattened into
    /// chords. Open subpaths are closed implicitly, as a fill would.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let mut inside = false;
        let mut start = (0.0, 0.0);
        let mut current = (0.0, 0.0);
        let mut edge = |a: (f64, f64), b: (f64, f64)| {
            if crosses_ray(a, b, x, y) {
                inside = !inside;
            }
        };

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo { x: mx, y: my } => {
                    edge(current, start);
                    start = (mx, my);
                    current = start;
                }
                PathSegment::LineTo { x: lx, y: ly } => {
                    edge(current, (lx, ly));
                    current = (lx, ly);
                }
                PathSegment::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x: ex,
                    y: ey,
                } => {
                    let p0 = current;
                    for step in 1..=FLATTEN_STEPS {
                        let t = step as f64 / FLATTEN_STEPS as f64;
                        let next = cubic_point(p0, (c1x, c1y), (c2x, c2y), (ex, ey), t);
                        edge(current, next);
                        current = next;
                    }
                }
                PathSegment::Close => {
                    edge(current, start);
                    current = start;
                }
            }
        }
        edge(current, start);
        inside
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self.segments.first() {
            None => {
                return Err(ChartError::InvalidData("path must not be empty".to_owned()));
            }
            Some(PathSegment::MoveTo { .. }) => {}
            Some(_) => {
                return Err(ChartError::InvalidData(
                    "path must start with a move-to segment".to_owned(),
                ));
            }
        }
        let finite = self
            .segments
            .iter()
            .flat_map(|segment| segment.points())
            .all(|(x, y)| x.is_finite() && y.is_finite());
        if !finite {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

fn cubic_point(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

/// Whether edge `a -> b` crosses the horizontal ray from `(x, y)` to +x.
fn crosses_ray(a: (f64, f64), b: (f64, f64), x: f64, y: f64) -> bool {
    if (a.1 > y) == (b.1 > y) {
        return false;
    }
    let cross_x = a.0 + (y - a.1) * (b.0 - a.0) / (b.1 - a.1);
    x < cross_x
}
