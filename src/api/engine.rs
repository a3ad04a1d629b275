use tracing::{debug, trace};

use crate::core::{Dataset, PlotArea, SeriesKeySet};
use crate::error::ChartResult;
use crate::extensions::{ChartEvent, ChartPlugin};
use crate::interaction::TooltipFormatter;
use crate::render::{Color, Renderer, Scene};

use super::render_pipeline::{PipelineInput, recompute, recompute_data_layers};
use super::validation::{validate_config, validate_render_style};
use super::{ChartConfig, ChartContext, RedrawScope, RenderStyle};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the inputs (dataset, series keys, palette, config),
/// the per-instance view state (brush, hover, pending redraw) and the last
/// built scene. Every mutation goes through it; redraws are coalesced and
/// applied on the next `render`, `scene` access or brush update.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) style: RenderStyle,
    pub(super) plot: PlotArea,
    pub(super) dataset: Dataset,
    pub(super) keys: SeriesKeySet,
    pub(super) palette: Vec<Color>,
    pub(super) tooltip_formatter: Option<TooltipFormatter>,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) context: ChartContext,
    pub(super) scene: Scene,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no data. The first render draws an empty scene
    /// until a dataset and series keys are supplied.
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        let plot = validate_config(&config)?;
        let scene = Scene::empty(config.canvas());
        let mut context = ChartContext::default();
        context.reset_view(plot.width, Vec::new());
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            variant = ?config.variant,
            brushable = config.brushable,
            "chart engine created"
        );
        Ok(Self {
            renderer,
            config,
            style: RenderStyle::default(),
            plot,
            dataset: Dataset::default(),
            keys: SeriesKeySet::default(),
            palette: Vec::new(),
            tooltip_formatter: None,
            plugins: Vec::new(),
            context,
            scene,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        self.style = validate_render_style(style)?;
        self.context.invalidate(RedrawScope::Full);
        Ok(())
    }

    /// Redraw scope waiting to be applied.
    #[must_use]
    pub fn pending_redraw(&self) -> RedrawScope {
        self.context.pending
    }

    /// Applies pending invalidation and returns the current scene.
    pub fn scene(&mut self) -> ChartResult<&Scene> {
        self.flush_pending()?;
        Ok(&self.scene)
    }

    /// Rebuilds every layer regardless of pending invalidation.
    pub fn build_scene(&mut self) -> ChartResult<&Scene> {
        self.context.invalidate(RedrawScope::Full);
        self.scene()
    }

    pub fn render(&mut self) -> ChartResult<()> {
        self.flush_pending()?;
        self.renderer.render(&self.scene)?;
        trace!(layers = self.scene.layers.len(), "rendered scene");
        self.emit_plugin_event(ChartEvent::Rendered);
        Ok(())
    }

    /// Renders the scene into an external cairo context.
    ///
    /// Used by toolkit draw callbacks while keeping the renderer decoupled
    /// from toolkit-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        self.flush_pending()?;
        self.renderer.render_on_cairo_context(context, &self.scene)?;
        self.emit_plugin_event(ChartEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn pipeline_input(&self) -> PipelineInput<'_> {
        PipelineInput {
            dataset: &self.dataset,
            keys: &self.keys,
            palette: &self.palette,
            config: &self.config,
            style: &self.style,
            plot: self.plot,
            brush: &self.context.brush,
            hovered: self.context.interaction.hovered_shape(),
        }
    }

    /// Applies the pending redraw scope, if any.
    pub(super) fn flush_pending(&mut self) -> ChartResult<()> {
        let scope = std::mem::take(&mut self.context.pending);
        match scope {
            RedrawScope::None => Ok(()),
            RedrawScope::Full => {
                let (scene, scales) = recompute(self.pipeline_input())?;
                self.scene = scene;
                self.context.scales = scales;
                let shape_count = self.scene.shapes.len();
                self.emit_plugin_event(ChartEvent::SceneRebuilt { shape_count });
                Ok(())
            }
            RedrawScope::DataShapes => {
                let Some(scales) = self.context.scales.clone() else {
                    return Ok(());
                };
                let mut scene =
                    std::mem::replace(&mut self.scene, Scene::empty(self.config.canvas()));
                let result = recompute_data_layers(self.pipeline_input(), &scales, &mut scene);
                self.scene = scene;
                result?;
                let shape_count = self.scene.shapes.len();
                self.emit_plugin_event(ChartEvent::DataLayerRedrawn { shape_count });
                Ok(())
            }
        }
    }
}
