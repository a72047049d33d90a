use tracing::debug;

use crate::core::{BrushWindow, ChartId, Viewport};
use crate::error::ChartResult;
use crate::extensions::ZoomListener;
use crate::host::{ChartHost, RenderStatus};
use crate::interaction::{GestureRecognizer, TransitionDriver};
use crate::render::Renderer;

use super::{
    ZoomChartConfig, gesture_arbiter::ArbiterState, render_orchestrator::RenderState,
    transform_state::TransformState,
};

/// Zoom, brush and view coordinator for one chart instance.
///
/// `ZoomChart` owns the transform state and arbitrates every change to it;
/// the hosting chart supplies scales and drawing through `ChartHost`, chrome
/// goes to the `Renderer`.
pub struct ZoomChart<H: ChartHost, R: Renderer> {
    pub(super) id: ChartId,
    pub(super) host: H,
    pub(super) renderer: R,
    pub(super) config: ZoomChartConfig,
    pub(super) state: TransformState,
    /// Overview brush extents; authoritative for axes that cannot zoom.
    pub(super) brushes: BrushWindow,
    pub(super) arbiter: ArbiterState,
    pub(super) recognizer: GestureRecognizer,
    pub(super) transitions: TransitionDriver,
    pub(super) render_state: RenderState,
    pub(super) listeners: Vec<Box<dyn ZoomListener>>,
}

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    #[must_use]
    pub fn id(&self) -> &ChartId {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> &ZoomChartConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to load new data before `render(false, false)`.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Updates the container size and renders.
    ///
    /// Zero-sized containers are accepted; rendering no-ops until the plot
    /// area is non-empty again.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<Option<RenderStatus>> {
        debug!(chart = %self.id, width = viewport.width, height = viewport.height, "resize");
        self.config.viewport = viewport;
        self.render(false, false)
    }

    /// Toggles overview brushing; rebuilds gesture bindings.
    pub fn set_brush_enabled(&mut self, enabled: bool) -> ChartResult<Option<RenderStatus>> {
        self.config.brush_enabled = enabled;
        self.render(true, false)
    }

    #[must_use]
    pub fn into_parts(self) -> (H, R) {
        (self.host, self.renderer)
    }
}
