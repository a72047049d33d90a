use tracing::{debug, trace};

use crate::core::{Axis, BrushExtent, BrushWindow, ChartSizes, ZoomTransform};
use crate::error::{ChartError, ChartResult};
use crate::host::ChartHost;
use crate::interaction::{BrushEvent, BrushEventSource, BrushPhase, ZoomSource};
use crate::render::Renderer;

use super::{
    AxisLayout, ZoomBehavior, ZoomChart, ZoomChartConfig, behavior::axis_zoomable,
    gesture_arbiter::GestureArbiter, transform_state::TransformCoordinator,
};

/// Relative tolerance below which a width correction is treated as rounding.
const WIDTH_TOLERANCE: f64 = 1e-9;

/// Plot geometry and zoom bounds the brush/transform conversions run against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushGeometry {
    pub width: f64,
    pub height: f64,
    pub layout: AxisLayout,
    pub zoom: ZoomBehavior,
    /// Overview brushes drive the axes that cannot zoom.
    pub brush_enabled: bool,
    /// Narrowest extent per axis (`[x, y]`, pixels) the host scales can still
    /// resolve; see [`Scale::min_zoom_extent`](crate::core::Scale::min_zoom_extent).
    pub min_extent: [f64; 2],
}

/// A brush window together with the transform that displays it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstrainedView {
    pub window: BrushWindow,
    pub transform: ZoomTransform,
    pub y_multiplier: f64,
    /// The candidate had to be corrected to stay inside the data bounds.
    pub was_clamped: bool,
}

impl BrushGeometry {
    pub fn new(width: f64, height: f64, layout: AxisLayout, zoom: ZoomBehavior) -> ChartResult<Self> {
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "brush geometry size must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            width,
            height,
            layout,
            zoom,
            brush_enabled: true,
            min_extent: [0.0; 2],
        })
    }

    pub(super) fn from_sizes(sizes: ChartSizes, config: &ZoomChartConfig, min_extent: [f64; 2]) -> Self {
        Self {
            width: sizes.width(),
            height: sizes.height(),
            layout: config.layout,
            zoom: config.zoom,
            brush_enabled: config.brush_enabled,
            min_extent,
        }
    }

    #[must_use]
    pub fn with_brush_enabled(mut self, enabled: bool) -> Self {
        self.brush_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_min_extent(mut self, axis: Axis, extent: f64) -> Self {
        self.min_extent[axis_index(axis)] = extent;
        self
    }

    #[must_use]
    pub fn axis_size(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    #[must_use]
    pub fn axis_zoomable(self, axis: Axis) -> bool {
        axis_zoomable(self.layout, self.zoom, axis)
    }

    /// A non-zoomable axis with no brush to follow while the other axis zooms.
    /// Its transform component is left as committed instead of being
    /// constrained to the data.
    #[must_use]
    pub fn axis_free(self, axis: Axis) -> bool {
        let other = match axis {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        };
        self.layout.is_two_dimensional()
            && !self.brush_enabled
            && !self.axis_zoomable(axis)
            && self.axis_zoomable(other)
    }

    #[must_use]
    pub fn full_window(self) -> BrushWindow {
        BrushWindow::full(self.width, self.height)
    }

    /// Brush windows displayed by `transform`.
    ///
    /// Axes pinned to their brush keep the extent from `brushes`. The flag reports
    /// whether a derived extent had to be pulled back inside the data bounds or
    /// the zoom level bounds.
    #[must_use]
    pub fn compute_brush_from_transform(
        self,
        transform: ZoomTransform,
        y_multiplier: f64,
        brushes: BrushWindow,
    ) -> (BrushWindow, bool) {
        let mut window = brushes;
        let mut was_clamped = false;
        for axis in [Axis::X, Axis::Y] {
            if !self.axis_zoomable(axis) && !self.axis_free(axis) {
                continue;
            }
            let size = self.axis_size(axis);
            let derived = match axis {
                Axis::X => BrushExtent::new(transform.invert_x(0.0), transform.invert_x(size)),
                Axis::Y => BrushExtent::new(
                    transform.invert_y(0.0, y_multiplier),
                    transform.invert_y(size, y_multiplier),
                ),
            };
            let (extent, clamped) = self.constrain_axis(axis, derived);
            window.set(axis, extent);
            was_clamped |= clamped;
        }
        if !self.layout.is_two_dimensional() {
            window.y = BrushExtent::full(self.height);
        }
        (window, was_clamped)
    }

    /// Transform displaying `window`: `k = size / width`, `x = -k * low`.
    #[must_use]
    pub fn compute_transform_from_brush(self, window: BrushWindow) -> (ZoomTransform, f64) {
        let k = self.width / window.x.width();
        let x = -k * window.x.low;
        if !self.layout.is_two_dimensional() {
            return (ZoomTransform::new(k, x, 0.0), 1.0);
        }
        let ky = self.height / window.y.width();
        (ZoomTransform::new(k, x, -ky * window.y.low), ky / k)
    }

    #[must_use]
    pub fn constrain_transform(
        self,
        transform: ZoomTransform,
        y_multiplier: f64,
        brushes: BrushWindow,
    ) -> ConstrainedView {
        let (window, was_clamped) =
            self.compute_brush_from_transform(transform, y_multiplier, brushes);
        let (transform, y_multiplier) = self.compute_transform_from_brush(window);
        ConstrainedView {
            window,
            transform,
            y_multiplier,
            was_clamped,
        }
    }

    /// Constrains a target window; pinned axes keep `brushes`, free axes keep
    /// the target.
    #[must_use]
    pub fn constrain_window(self, target: BrushWindow, brushes: BrushWindow) -> ConstrainedView {
        let mut window = brushes;
        let mut was_clamped = false;
        for axis in [Axis::X, Axis::Y] {
            if !self.axis_zoomable(axis) && !self.axis_free(axis) {
                continue;
            }
            let (extent, clamped) = self.constrain_axis(axis, target.get(axis));
            window.set(axis, extent);
            was_clamped |= clamped;
        }
        if !self.layout.is_two_dimensional() {
            window.y = BrushExtent::full(self.height);
        }
        let (transform, y_multiplier) = self.compute_transform_from_brush(window);
        ConstrainedView {
            window,
            transform,
            y_multiplier,
            was_clamped,
        }
    }

    /// View of an already constrained window, e.g. a transition frame.
    #[must_use]
    pub fn view_of(self, window: BrushWindow) -> ConstrainedView {
        let (transform, y_multiplier) = self.compute_transform_from_brush(window);
        ConstrainedView {
            window,
            transform,
            y_multiplier,
            was_clamped: false,
        }
    }

    /// Applies zoom level bounds around the extent center, then shifts the
    /// extent back inside `[0, size]`.
    #[must_use]
    pub fn constrain_extent(self, axis: Axis, extent: BrushExtent) -> (BrushExtent, bool) {
        let size = self.axis_size(axis);
        let (level_min, level_max) = self.zoom.scale_extent();
        let max_width = size / level_min;
        let min_width = (size / level_max)
            .max(self.min_extent[axis_index(axis)])
            .min(max_width);

        let mut extent = extent;
        let mut resized = false;
        let width = extent.width();
        if width.is_finite() && width > 0.0 {
            let bounded = width.clamp(min_width, max_width);
            if (bounded - width).abs() > WIDTH_TOLERANCE * size {
                let center = (extent.low + extent.high) * 0.5;
                extent = BrushExtent::new(center - bounded * 0.5, center + bounded * 0.5);
                resized = true;
            }
        }
        let (extent, shifted) = extent.clamp_within(size);
        (extent, resized || shifted)
    }

    fn constrain_axis(self, axis: Axis, extent: BrushExtent) -> (BrushExtent, bool) {
        if self.axis_free(axis) {
            self.widen_to_resolution(axis, extent)
        } else {
            self.constrain_extent(axis, extent)
        }
    }

    /// Widens `extent` around its center up to the resolvable minimum and
    /// nothing else.
    fn widen_to_resolution(self, axis: Axis, extent: BrushExtent) -> (BrushExtent, bool) {
        let min_width = self.min_extent[axis_index(axis)];
        let width = extent.width();
        if !(width.is_finite() && width < min_width) {
            return (extent, false);
        }
        let center = (extent.low + extent.high) * 0.5;
        (
            BrushExtent::new(center - min_width * 0.5, center + min_width * 0.5),
            true,
        )
    }
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
    }
}

pub(super) struct BrushSynchronizer;

impl BrushSynchronizer {
    /// Writes the committed window into the brushes `source` may move.
    pub(super) fn mirror<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        window: BrushWindow,
        source: ZoomSource,
    ) {
        for axis in [Axis::X, Axis::Y] {
            if source.mirrors_brush(axis, engine.config.axis_zoomable(axis)) {
                engine.brushes.set(axis, window.get(axis));
            }
        }
    }

    /// Proportional renormalization after a plot size change.
    pub(super) fn resize_window(window: BrushWindow, from: ChartSizes, to: ChartSizes) -> BrushWindow {
        let mut resized = window;
        for axis in [Axis::X, Axis::Y] {
            let extent = window
                .get(axis)
                .renormalized(from.axis_size(axis), to.axis_size(axis));
            resized.set(axis, extent);
        }
        resized
    }

    /// [`BrushSynchronizer::resize_window`] for brushes, which always stay
    /// inside the plot.
    pub(super) fn resize_brushes(brushes: BrushWindow, from: ChartSizes, to: ChartSizes) -> BrushWindow {
        let mut resized = Self::resize_window(brushes, from, to);
        for axis in [Axis::X, Axis::Y] {
            let (extent, _) = resized.get(axis).clamp_within(to.axis_size(axis));
            resized.set(axis, extent);
        }
        resized
    }

    pub(super) fn brush_overview<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        event: BrushEvent,
    ) -> ChartResult<bool> {
        if !engine.config.brush_enabled {
            trace!(chart = %engine.id, "brush event ignored: brushing disabled");
            return Ok(false);
        }
        if event.source == BrushEventSource::Programmatic {
            trace!(chart = %engine.id, axis = ?event.axis, "ignoring brush echo of a mirror move");
            return Ok(false);
        }
        if event.axis == Axis::Y && !engine.config.layout.is_two_dimensional() {
            return Err(ChartError::InvalidData(
                "y brush requires a two-dimensional layout".to_owned(),
            ));
        }
        let Some(geometry) = engine.brush_geometry() else {
            debug!(chart = %engine.id, "brush event before first layout ignored");
            return Ok(false);
        };

        let source = ZoomSource::Brush(event.axis);
        let owned = engine
            .arbiter
            .owner
            .is_some_and(|owner| owner.source == source);
        if event.phase == BrushPhase::Start || !owned {
            GestureArbiter::interrupt(engine)?;
            engine.begin_zoom(source, true);
        }

        let size = geometry.axis_size(event.axis);
        let requested = event.extent.unwrap_or(BrushExtent::full(size));
        let extent = if geometry.axis_zoomable(event.axis) {
            geometry.constrain_extent(event.axis, requested).0
        } else {
            requested.clamp_within(size).0
        };
        engine.brushes.set(event.axis, extent);

        let mut target = engine.state.window;
        target.set(event.axis, extent);
        let view = geometry.constrain_window(target, engine.brushes);
        TransformCoordinator::commit(engine, view, source)?;

        if event.phase == BrushPhase::End {
            engine.end_zoom();
        }
        Ok(true)
    }
}

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    /// Forwards an overview brush event from the host brush widget.
    ///
    /// Returns `Ok(false)` when the event was ignored.
    pub fn brush_overview(&mut self, event: BrushEvent) -> ChartResult<bool> {
        BrushSynchronizer::brush_overview(self, event)
    }

    /// Conversion geometry of the last successful layout.
    #[must_use]
    pub fn brush_geometry(&self) -> Option<BrushGeometry> {
        self.render_state
            .sizes
            .map(|sizes| BrushGeometry::from_sizes(sizes, &self.config, self.render_state.min_extent))
    }

    #[must_use]
    pub fn brush_window(&self) -> Option<BrushWindow> {
        self.render_state.sizes.map(|_| self.brushes)
    }

    #[must_use]
    pub fn brush_extent(&self, axis: Axis) -> Option<BrushExtent> {
        self.brush_window().map(|window| window.get(axis))
    }
}
