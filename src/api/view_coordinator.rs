use tracing::{debug, warn};

use crate::core::{
    Axis, AxisView, BrushExtent, ChartId, Scale, View, ViewRequest, ZoomTransform,
};
use crate::error::{ChartError, ChartResult};
use crate::host::{ChartHost, RenderStatus};
use crate::interaction::ZoomSource;
use crate::render::Renderer;

use super::{ZoomChart, gesture_arbiter::GestureArbiter};

pub(super) struct ViewCoordinator;

impl ViewCoordinator {
    pub(super) fn view<H: ChartHost, R: Renderer>(engine: &ZoomChart<H, R>) -> Option<View> {
        let sizes = engine.render_state.sizes?;
        let transform = engine.state.transform;
        let y_multiplier = engine.state.y_multiplier;

        let x_scale = engine
            .host
            .x_scale((0.0, sizes.width()))
            .zoomed(Axis::X, transform, y_multiplier)
            .inspect_err(|err| warn!(chart = %engine.id, axis = ?Axis::X, error = %err, "view unavailable"))
            .ok()?;
        let x = Self::axis_view(&x_scale, sizes.width())?;

        let y = if engine.config.layout.is_two_dimensional() {
            engine
                .host
                .y_scale((sizes.height(), 0.0))
                .and_then(|scale| {
                    scale
                        .zoomed(Axis::Y, transform, y_multiplier)
                        .inspect_err(|err| {
                            warn!(chart = %engine.id, axis = ?Axis::Y, error = %err, "y view unavailable");
                        })
                        .ok()
                })
                .and_then(|scale| Self::axis_view(&scale, sizes.height()))
        } else {
            None
        };
        Some(View { x, y })
    }

    fn axis_view(zoomed: &Scale, axis_size: f64) -> Option<AxisView> {
        match zoomed {
            Scale::Linear(scale) => {
                let (start, end) = scale.domain();
                Some(AxisView::Continuous {
                    min: start.min(end),
                    max: start.max(end),
                })
            }
            Scale::Band(scale) => {
                let (first_index, last_index) = scale.indices_in_pixel_range(0.0, axis_size)?;
                let keys = scale.keys();
                Some(AxisView::Ordinal {
                    first_index,
                    last_index,
                    first: keys.get(first_index)?.clone(),
                    last: keys.get(last_index)?.clone(),
                })
            }
        }
    }

    fn brush_for_bounds(scale: Option<Scale>, axis: Axis, (min, max): (f64, f64)) -> ChartResult<BrushExtent> {
        let Some(scale) = scale else {
            return Err(ChartError::InvalidView(format!(
                "{axis:?} axis has no scale to map view bounds"
            )));
        };
        let Some(linear) = scale.as_linear() else {
            return Err(ChartError::InvalidView(format!(
                "{axis:?} axis is ordinal; view bounds need a continuous scale"
            )));
        };
        BrushExtent::from_unordered(linear.apply(min), linear.apply(max))
            .map_err(|err| ChartError::InvalidView(err.to_string()))
    }

    pub(super) fn set_zoom_to_limits<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        request: ViewRequest,
        caused_by_user: bool,
    ) -> ChartResult<Option<ZoomTransform>> {
        let request = request.validate()?;
        let (Some(sizes), Some(geometry)) = (engine.render_state.sizes, engine.brush_geometry())
        else {
            debug!(chart = %engine.id, "zoom to limits requested before first layout");
            return Ok(None);
        };

        let mut target = engine.brushes;
        if geometry.axis_zoomable(Axis::X) {
            let scale = Some(engine.host.x_scale((0.0, sizes.width())));
            target.x = Self::brush_for_bounds(scale, Axis::X, request.x)?;
        } else {
            debug!(chart = %engine.id, "x view bounds ignored: x zoom disabled");
        }
        if let Some(bounds) = request.y {
            if geometry.axis_zoomable(Axis::Y) {
                let scale = engine.host.y_scale((sizes.height(), 0.0));
                target.y = Self::brush_for_bounds(scale, Axis::Y, bounds)?;
            } else {
                debug!(chart = %engine.id, "y view bounds ignored: y zoom unavailable");
            }
        }

        let view = geometry.constrain_window(target, engine.brushes);
        GestureArbiter::apply_target(engine, view, ZoomSource::Programmatic, caused_by_user, true)?;
        Ok(Some(view.transform))
    }

    pub(super) fn set_view<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        request: ViewRequest,
        source: Option<&ChartId>,
        caused_by_user: bool,
    ) -> ChartResult<bool> {
        if source == Some(&engine.id) {
            debug!(chart = %engine.id, "set_view from self ignored");
            return Ok(false);
        }
        if engine.render_state.last_status == Some(RenderStatus::NoData) {
            debug!(chart = %engine.id, "set_view ignored: chart has no data");
            return Ok(false);
        }
        Ok(Self::set_zoom_to_limits(engine, request, caused_by_user)?.is_some())
    }

    pub(super) fn reset_zoom<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        caused_by_user: bool,
    ) -> ChartResult<()> {
        let Some(geometry) = engine.brush_geometry() else {
            engine.state.transform = ZoomTransform::IDENTITY;
            engine.state.y_multiplier = 1.0;
            return Ok(());
        };
        let view = geometry.view_of(geometry.full_window());
        GestureArbiter::apply_target(engine, view, ZoomSource::Reset, caused_by_user, true)
    }
}

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    /// Visible domain per axis; `None` before the first successful layout.
    #[must_use]
    pub fn view(&self) -> Option<View> {
        ViewCoordinator::view(self)
    }

    /// Imposes a visible domain coming from `source` (another chart or an
    /// external controller).
    ///
    /// Returns `Ok(false)` without touching state when `source` is this chart,
    /// when the last render reported no data, or before the first layout.
    pub fn set_view(
        &mut self,
        request: ViewRequest,
        source: Option<&ChartId>,
        caused_by_user: bool,
    ) -> ChartResult<bool> {
        ViewCoordinator::set_view(self, request, source, caused_by_user)
    }

    /// Computes the transform showing `request` and glides to it.
    ///
    /// Returns the target transform, or `None` before the first layout.
    pub fn set_zoom_to_limits(
        &mut self,
        request: ViewRequest,
        caused_by_user: bool,
    ) -> ChartResult<Option<ZoomTransform>> {
        ViewCoordinator::set_zoom_to_limits(self, request, caused_by_user)
    }

    /// Glides back to the identity transform and full brushes on both axes.
    pub fn reset_zoom(&mut self, caused_by_user: bool) -> ChartResult<()> {
        ViewCoordinator::reset_zoom(self, caused_by_user)
    }
}
