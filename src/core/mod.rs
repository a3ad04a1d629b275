pub mod band_scale;
pub mod dataset;
pub mod geometry;
pub mod path;
pub mod ticks;
pub mod types;
pub mod value_scale;
pub mod windowing;

pub use band_scale::BandScale;
pub use dataset::{Dataset, Datum, Record, SeriesKeySet};
pub use geometry::{
    BarStyle, GeometryScales, RectGeometry, SeriesLine, Shape, ShapeGeometry, ShapeId,
};
pub use path::{PathGeometry, PathSegment};
pub use types::{Margins, PlotArea, Viewport};
pub use value_scale::{ValueScale, ValueScaleOptions};
