//! Observer hooks for host-side extensions.

pub mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
