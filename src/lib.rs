//! category-chart: grouped bar, curved bar and line charts over categorical
//! data.
//!
//! The engine resolves band and value scales, builds typed shape geometry,
//! lays out a legend, tracks hover and brush state, and emits a layered
//! `Scene` that any `Renderer` backend can draw.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine};
pub use error::{ChartError, ChartResult};
