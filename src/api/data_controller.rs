use tracing::debug;

use crate::core::{Dataset, SeriesKeySet, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::TooltipFormatter;
use crate::render::{Color, Renderer};

use super::validation::validate_config;
use super::{ChartConfig, ChartEngine, RedrawScope};

/// Source of the host container's current size, polled by
/// `ChartEngine::sync_dimensions`.
pub trait ContainerSizeProvider {
    /// Current container size in pixels; `None` while it is not laid out.
    fn container_size(&self) -> Option<(u32, u32)>;
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn series_keys(&self) -> &SeriesKeySet {
        &self.keys
    }

    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Replaces the records. Resets the brush to the full extent and clears
    /// hover.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        debug!(
            records = dataset.len(),
            categories = dataset.categories().len(),
            "set dataset"
        );
        self.dataset = dataset;
        self.reset_view();
    }

    /// Parses JSON rows against the current series keys, then behaves like
    /// `set_dataset`.
    pub fn set_dataset_json(
        &mut self,
        json: &str,
        category_field: Option<&str>,
    ) -> ChartResult<()> {
        let dataset = Dataset::from_json_rows(json, &self.keys, category_field)?;
        self.set_dataset(dataset);
        Ok(())
    }

    pub fn set_series_keys(&mut self, keys: SeriesKeySet) {
        debug!(series = keys.len(), "set series keys");
        self.keys = keys;
        self.reset_view();
    }

    /// Colors assigned to series keys by position. A short palette is cycled.
    pub fn set_palette(&mut self, palette: Vec<Color>) -> ChartResult<()> {
        for color in &palette {
            color.validate()?;
        }
        debug!(colors = palette.len(), "set palette");
        self.palette = palette;
        self.context.invalidate(RedrawScope::Full);
        Ok(())
    }

    /// Resizes the configured viewport and relays out everything.
    pub fn set_dimensions(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport { width, height });
        }
        if viewport == self.config.viewport {
            return Ok(());
        }
        let mut config = self.config.clone();
        config.viewport = viewport;
        self.plot = validate_config(&config)?;
        self.config = config;
        debug!(width, height, "set dimensions");
        self.reset_view();
        self.emit_plugin_event(ChartEvent::DimensionsChanged { width, height });
        Ok(())
    }

    /// Polls `provider` and applies its size when it changed. Returns `true`
    /// when the dimensions were updated.
    pub fn sync_dimensions(&mut self, provider: &dyn ContainerSizeProvider) -> ChartResult<bool> {
        let Some((width, height)) = provider.container_size() else {
            return Ok(false);
        };
        if Viewport::new(width, height) == self.config.viewport {
            return Ok(false);
        }
        self.set_dimensions(width, height)?;
        Ok(true)
    }

    /// Replaces the whole configuration after validating it.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        let plot = validate_config(&config)?;
        let resized = config.viewport != self.config.viewport;
        debug!(
            variant = ?config.variant,
            bar_style = ?config.bar_style,
            brushable = config.brushable,
            "set config"
        );
        self.config = config;
        self.plot = plot;
        self.reset_view();
        if resized {
            self.emit_plugin_event(ChartEvent::DimensionsChanged {
                width: self.config.viewport.width,
                height: self.config.viewport.height,
            });
        }
        Ok(())
    }

    /// Installs or clears the tooltip text builder. The scene is unaffected.
    pub fn set_tooltip_formatter(&mut self, formatter: Option<TooltipFormatter>) {
        self.tooltip_formatter = formatter;
    }

    fn reset_view(&mut self) {
        self.context
            .reset_view(self.plot.width, self.dataset.categories());
    }
}
