mod brush_controller;
mod chart_context;
mod config;
mod data_controller;
mod engine;
mod interaction_controller;
mod invalidation;
mod plugin_registry;
mod render_style;
mod snapshot;
mod validation;

pub mod legend_layout;
pub mod palette;
pub mod render_pipeline;
pub mod scale_resolver;

pub use brush_controller::{
    BrushGesture, BrushOutcome, BrushSelection, BrushState, gesture_interval, map_selection,
};
pub use chart_context::ChartContext;
pub use config::{BrushLayout, ChartConfig, ChartVariant, LegendPosition, LineOptions};
pub use data_controller::ContainerSizeProvider;
pub use engine::ChartEngine;
pub use invalidation::RedrawScope;
pub use legend_layout::{
    LegendEntry, LegendLayout, PlacedLegendEntry, layout_legend, legend_entries,
};
pub use render_pipeline::{PipelineInput, recompute, recompute_data_layers};
pub use render_style::RenderStyle;
pub use scale_resolver::{
    ResolvedScales, ScaleInputs, compute_category_scale, compute_series_scale, compute_value_scale,
    resolve_scales,
};
pub use snapshot::EngineSnapshot;
