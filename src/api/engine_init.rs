use tracing::debug;

use crate::core::{BrushWindow, ChartId};
use crate::error::ChartResult;
use crate::host::ChartHost;
use crate::interaction::{GestureRecognizer, TransitionDriver};
use crate::render::Renderer;

use super::{
    ZoomChart, ZoomChartConfig, gesture_arbiter::ArbiterState,
    render_orchestrator::RenderState, transform_state::TransformState,
    validation::validate_zoom_chart_config,
};

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    /// Creates an engine at the identity transform. Nothing is laid out until
    /// the first `render`.
    pub fn new(id: impl Into<ChartId>, host: H, renderer: R, config: ZoomChartConfig) -> ChartResult<Self> {
        validate_zoom_chart_config(&config)?;
        let id = id.into();
        let zoom = config.zoom;
        debug!(chart = %id, layout = ?config.layout, "zoom chart created");

        Ok(Self {
            id,
            host,
            renderer,
            config,
            state: TransformState::default(),
            brushes: BrushWindow::full(0.0, 0.0),
            arbiter: ArbiterState::default(),
            recognizer: GestureRecognizer::new(zoom.scale_extent(), zoom.step_ratio),
            transitions: TransitionDriver::default(),
            render_state: RenderState::default(),
            listeners: Vec::new(),
        })
    }
}
