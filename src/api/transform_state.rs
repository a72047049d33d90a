use tracing::{trace, warn};

use crate::core::{BrushWindow, ZoomTransform};
use crate::error::{ChartError, ChartResult};
use crate::host::ChartHost;
use crate::interaction::ZoomSource;
use crate::render::Renderer;

use super::{
    ZoomChart,
    brush_sync::{BrushSynchronizer, ConstrainedView},
    gesture_arbiter::GestureArbiter,
    render_orchestrator::RenderOrchestrator,
};

/// Committed zoom state: what the user is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TransformState {
    pub(super) transform: ZoomTransform,
    pub(super) y_multiplier: f64,
    /// Brush-space window displayed by `transform`.
    pub(super) window: BrushWindow,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            y_multiplier: 1.0,
            window: BrushWindow::full(0.0, 0.0),
        }
    }
}

pub(super) struct TransformCoordinator;

impl TransformCoordinator {
    /// Single entry point for transform mutations: state, brush mirroring,
    /// an `update_zoom` render cycle, then `on_zoom`.
    ///
    /// A transform the render cycle rejects is rolled back, so the chart keeps
    /// showing the last drawable view.
    pub(super) fn commit<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        view: ConstrainedView,
        source: ZoomSource,
    ) -> ChartResult<()> {
        let (previous, brushes) = (engine.state, engine.brushes);
        Self::apply(engine, view, source)?;
        if let Err(err) = RenderOrchestrator::render(engine, false, true) {
            warn!(chart = %engine.id, ?source, error = %err, "zoom commit rolled back");
            engine.state = previous;
            engine.brushes = brushes;
            if !engine.transitions.is_active() {
                GestureArbiter::sync_recognizer(engine, previous.transform, previous.y_multiplier)?;
            }
            return Err(err);
        }
        engine.emit_zoom(source);
        Ok(())
    }

    /// State part of [`TransformCoordinator::commit`], used directly by the
    /// render orchestrator while it is already inside a render cycle.
    pub(super) fn apply<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        view: ConstrainedView,
        source: ZoomSource,
    ) -> ChartResult<()> {
        engine.state = TransformState {
            transform: view.transform,
            y_multiplier: view.y_multiplier,
            window: view.window,
        };
        BrushSynchronizer::mirror(engine, view.window, source);
        trace!(
            chart = %engine.id,
            ?source,
            k = view.transform.k,
            x = view.transform.x,
            y = view.transform.y,
            y_multiplier = view.y_multiplier,
            was_clamped = view.was_clamped,
            "zoom transform committed"
        );

        // While gliding, the recognizer already holds the transition target.
        if !engine.transitions.is_active() {
            GestureArbiter::sync_recognizer(engine, view.transform, view.y_multiplier)?;
        }
        Ok(())
    }

    pub(super) fn set_zoom_transform<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        transform: ZoomTransform,
        y_multiplier: Option<f64>,
        animate: bool,
    ) -> ChartResult<()> {
        let transform = transform.validate()?;
        let y_multiplier = y_multiplier.unwrap_or(engine.state.y_multiplier);
        if !y_multiplier.is_finite() || y_multiplier <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom y multiplier must be finite and > 0".to_owned(),
            ));
        }

        let Some(geometry) = engine.brush_geometry() else {
            // Constrained against the plot on first layout.
            engine.state.transform = transform;
            engine.state.y_multiplier = y_multiplier;
            trace!(chart = %engine.id, "zoom transform stored before first layout");
            return Ok(());
        };
        let target = geometry.constrain_transform(transform, y_multiplier, engine.brushes);
        GestureArbiter::apply_target(engine, target, ZoomSource::Programmatic, false, animate)
    }
}

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    #[must_use]
    pub fn zoom_transform(&self) -> ZoomTransform {
        self.state.transform
    }

    /// Ratio between vertical and horizontal zoom scale (`1` for 1-D layouts).
    #[must_use]
    pub fn zoom_y_multiplier(&self) -> f64 {
        self.state.y_multiplier
    }

    /// Imposes a transform, constrained to the data bounds.
    ///
    /// `y_multiplier = None` keeps the current multiplier. With `animate` the
    /// change glides over the configured transition duration; any in-flight
    /// gesture or transition is superseded.
    pub fn set_zoom_transform(
        &mut self,
        transform: ZoomTransform,
        y_multiplier: Option<f64>,
        animate: bool,
    ) -> ChartResult<()> {
        TransformCoordinator::set_zoom_transform(self, transform, y_multiplier, animate)
    }
}
