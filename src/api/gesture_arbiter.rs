use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::core::{Axis, BrushExtent, ChartSizes, PixelRect, ZoomTransform};
use crate::error::ChartResult;
use crate::host::ChartHost;
use crate::interaction::{
    GestureKind, GestureState, TransitionStep, ZoomPhase, ZoomSignal, ZoomSignals, ZoomSource,
};
use crate::render::Renderer;

use super::{
    ZoomChart, brush_sync::ConstrainedView, render_orchestrator::RenderOrchestrator,
    transform_state::TransformCoordinator,
};

/// Regions narrower than this (displayed pixels) are discarded on release.
const MIN_REGION_SELECT_PX: f64 = 1.0;

/// The change source currently owning the transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ZoomOwner {
    pub(super) source: ZoomSource,
    pub(super) caused_by_user: bool,
}

/// Modifier-held drag on the plot, in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct RegionSelection {
    origin: (f64, f64),
    current: (f64, f64),
}

impl RegionSelection {
    fn rect(self, sizes: ChartSizes, two_dimensional: bool) -> PixelRect {
        let clamp_x = |x: f64| x.clamp(0.0, sizes.width());
        let clamp_y = |y: f64| y.clamp(0.0, sizes.height());
        let (x0, x1) = (clamp_x(self.origin.0), clamp_x(self.current.0));
        let (top, height) = if two_dimensional {
            let (y0, y1) = (clamp_y(self.origin.1), clamp_y(self.current.1));
            (y0.min(y1), (y1 - y0).abs())
        } else {
            (0.0, sizes.height())
        };
        PixelRect::new(x0.min(x1), top, (x1 - x0).abs(), height)
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct ArbiterState {
    pub(super) owner: Option<ZoomOwner>,
    /// Set while the engine pushes a transform into the recognizer.
    pub(super) ignore_zoom_events: bool,
    pub(super) ignored_signals: u64,
    pub(super) region_modifier: bool,
    pub(super) selection: Option<RegionSelection>,
}

pub(super) struct GestureArbiter;

impl GestureArbiter {
    pub(super) fn state<H: ChartHost, R: Renderer>(engine: &ZoomChart<H, R>) -> GestureState {
        if engine.arbiter.selection.is_some() {
            GestureState::Brushing
        } else if engine.transitions.is_active() {
            GestureState::Animating
        } else if engine.arbiter.owner.is_some() {
            GestureState::Zooming
        } else {
            GestureState::Idle
        }
    }

    fn owned_by_pointer<H: ChartHost, R: Renderer>(engine: &ZoomChart<H, R>) -> Option<ZoomSource> {
        engine
            .arbiter
            .owner
            .map(|owner| owner.source)
            .filter(|source| matches!(source, ZoomSource::Drag | ZoomSource::Pinch))
    }

    fn plot_point(sizes: ChartSizes, x: f64, y: f64) -> (f64, f64) {
        (x - sizes.plot.left, y - sizes.plot.top)
    }

    fn inside_plot(sizes: ChartSizes, (x, y): (f64, f64)) -> bool {
        (0.0..=sizes.width()).contains(&x) && (0.0..=sizes.height()).contains(&y)
    }

    fn dispatch<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        signals: ZoomSignals,
    ) -> ChartResult<bool> {
        let handled = !signals.is_empty();
        for signal in signals {
            Self::handle_zoom_signal(engine, signal)?;
        }
        Ok(handled)
    }

    /// Routes one recognizer signal through ownership rules and the commit path.
    pub(super) fn handle_zoom_signal<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        signal: ZoomSignal,
    ) -> ChartResult<()> {
        if engine.arbiter.ignore_zoom_events {
            engine.arbiter.ignored_signals += 1;
            trace!(chart = %engine.id, phase = ?signal.phase, "ignoring self-triggered zoom signal");
            return Ok(());
        }
        let Some(kind) = signal.source else {
            warn!(chart = %engine.id, "dropping synthetic zoom signal outside a recognizer sync");
            return Ok(());
        };
        let source = ZoomSource::from(kind);

        match signal.phase {
            ZoomPhase::Start => {
                engine.begin_zoom(source, true);
                Ok(())
            }
            ZoomPhase::Zoom => {
                let Some(geometry) = engine.brush_geometry() else {
                    return Ok(());
                };
                let target = geometry.constrain_transform(
                    signal.transform,
                    signal.y_multiplier,
                    engine.brushes,
                );
                if kind == GestureKind::Wheel {
                    Self::glide_wheel(engine, target)
                } else {
                    TransformCoordinator::commit(engine, target, source)
                }
            }
            ZoomPhase::End => {
                engine.end_zoom();
                Ok(())
            }
        }
    }

    /// Pushes a transform into the recognizer, dropping the signals it echoes.
    pub(super) fn sync_recognizer<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        transform: ZoomTransform,
        y_multiplier: f64,
    ) -> ChartResult<()> {
        if engine.recognizer.transform() == transform
            && engine.recognizer.y_multiplier() == y_multiplier
        {
            return Ok(());
        }
        engine.arbiter.ignore_zoom_events = true;
        let signals = engine.recognizer.set_transform(transform, y_multiplier);
        let result = signals
            .into_iter()
            .try_for_each(|signal| Self::handle_zoom_signal(engine, signal));
        engine.arbiter.ignore_zoom_events = false;
        result
    }

    /// Stops whatever currently owns the transform, leaving the displayed
    /// state in place.
    pub(super) fn interrupt<H: ChartHost, R: Renderer>(engine: &mut ZoomChart<H, R>) -> ChartResult<()> {
        engine.recognizer.cancel_gestures();
        if let Some(cancelled) = engine.transitions.cancel() {
            debug!(chart = %engine.id, source = ?cancelled.source, "transition superseded");
            let (transform, y_multiplier) = (engine.state.transform, engine.state.y_multiplier);
            Self::sync_recognizer(engine, transform, y_multiplier)?;
        }
        engine.finish_zoom(false);
        Ok(())
    }

    /// Drops bound gestures; transitions are not bindings and keep running.
    pub(super) fn rebind<H: ChartHost, R: Renderer>(engine: &mut ZoomChart<H, R>) {
        if engine.arbiter.selection.take().is_some() {
            debug!(chart = %engine.id, "region selection dropped by rebind");
        }
        if Self::owned_by_pointer(engine).is_some() {
            engine.finish_zoom(false);
        }
        let zoom = engine.config.zoom;
        engine.recognizer.rebind(zoom.scale_extent(), zoom.step_ratio);
        debug!(
            chart = %engine.id,
            generation = engine.recognizer.generation(),
            "gesture bindings rebuilt"
        );
    }

    /// Applies a target view on behalf of `source`, animated when allowed.
    pub(super) fn apply_target<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        target: ConstrainedView,
        source: ZoomSource,
        caused_by_user: bool,
        animate: bool,
    ) -> ChartResult<()> {
        Self::interrupt(engine)?;
        engine.begin_zoom(source, caused_by_user);

        let transition = engine.config.transition;
        if animate && transition.enabled && transition.duration_ms > 0 {
            engine.transitions.start(
                engine.state.window,
                target.window,
                Duration::from_millis(transition.duration_ms),
                source,
                caused_by_user,
            );
            debug!(
                chart = %engine.id,
                ?source,
                target_k = target.transform.k,
                duration_ms = transition.duration_ms,
                "transition started"
            );
            return Self::sync_recognizer(engine, target.transform, target.y_multiplier);
        }

        if let Err(err) = TransformCoordinator::commit(engine, target, source) {
            engine.finish_zoom(false);
            return Err(err);
        }
        engine.end_zoom();
        Ok(())
    }

    fn glide_wheel<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        target: ConstrainedView,
    ) -> ChartResult<()> {
        let wheel_owned = engine
            .arbiter
            .owner
            .is_some_and(|owner| owner.source == ZoomSource::Wheel);
        if !wheel_owned {
            Self::interrupt(engine)?;
            engine.begin_zoom(ZoomSource::Wheel, true);
        }

        let transition = engine.config.transition;
        if !transition.enabled || transition.duration_ms == 0 {
            TransformCoordinator::commit(engine, target, ZoomSource::Wheel)?;
            engine.end_zoom();
            return Ok(());
        }

        // Restart from the displayed window; the previous glide is dropped.
        let superseded = engine.transitions.start(
            engine.state.window,
            target.window,
            Duration::from_millis(transition.duration_ms),
            ZoomSource::Wheel,
            true,
        );
        trace!(
            chart = %engine.id,
            superseded = superseded.is_some(),
            target_k = target.transform.k,
            "wheel glide started"
        );
        Self::sync_recognizer(engine, target.transform, target.y_multiplier)
    }

    pub(super) fn wheel<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        delta_y: f64,
        x: f64,
        y: f64,
    ) -> ChartResult<bool> {
        if !engine.config.input.wheel_zoom {
            return Ok(false);
        }
        let Some(sizes) = engine.render_state.sizes else {
            return Ok(false);
        };
        if let Some(owner) = Self::owned_by_pointer(engine) {
            trace!(chart = %engine.id, ?owner, "wheel ignored while pointer gesture owns the transform");
            return Ok(false);
        }
        if engine.arbiter.selection.is_some() {
            return Ok(false);
        }

        let (px, py) = Self::plot_point(sizes, x, y);
        let signals = engine.recognizer.wheel(delta_y, px, py)?;
        Self::dispatch(engine, signals)
    }

    pub(super) fn pointer_down<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        x: f64,
        y: f64,
    ) -> ChartResult<bool> {
        let Some(sizes) = engine.render_state.sizes else {
            return Ok(false);
        };
        let point = Self::plot_point(sizes, x, y);
        if !Self::inside_plot(sizes, point) {
            return Ok(false);
        }

        if engine.arbiter.region_modifier && engine.config.input.region_select {
            engine.arbiter.selection = Some(RegionSelection {
                origin: point,
                current: point,
            });
            debug!(chart = %engine.id, x = point.0, y = point.1, "region selection started");
            return Ok(true);
        }
        if !engine.config.input.drag_pan {
            return Ok(false);
        }
        if Self::owned_by_pointer(engine) == Some(ZoomSource::Pinch) {
            trace!(chart = %engine.id, "drag start ignored while pinching");
            return Ok(false);
        }

        Self::interrupt(engine)?;
        let signals = engine.recognizer.drag_start(point.0, point.1);
        Self::dispatch(engine, signals)
    }

    pub(super) fn pointer_move<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        x: f64,
        y: f64,
    ) -> ChartResult<bool> {
        let Some(sizes) = engine.render_state.sizes else {
            return Ok(false);
        };
        let point = Self::plot_point(sizes, x, y);

        if let Some(selection) = engine.arbiter.selection.as_mut() {
            selection.current = point;
            RenderOrchestrator::render(engine, false, false)?;
            return Ok(true);
        }
        if !engine.recognizer.is_dragging() {
            return Ok(false);
        }
        let signals = engine.recognizer.drag_move(point.0, point.1);
        Self::dispatch(engine, signals)
    }

    pub(super) fn pointer_up<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        x: f64,
        y: f64,
    ) -> ChartResult<bool> {
        let Some(sizes) = engine.render_state.sizes else {
            return Ok(false);
        };

        if let Some(mut selection) = engine.arbiter.selection.take() {
            selection.current = Self::plot_point(sizes, x, y);
            Self::finish_region_selection(engine, sizes, selection)?;
            return Ok(true);
        }
        let signals = engine.recognizer.drag_end();
        Self::dispatch(engine, signals)
    }

    fn finish_region_selection<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        sizes: ChartSizes,
        selection: RegionSelection,
    ) -> ChartResult<()> {
        let Some(geometry) = engine.brush_geometry() else {
            return Ok(());
        };
        let rect = selection.rect(sizes, engine.config.layout.is_two_dimensional());
        let transform = engine.state.transform;
        let y_multiplier = engine.state.y_multiplier;

        let mut target = engine.state.window;
        let mut too_narrow = false;
        if geometry.axis_zoomable(Axis::X) {
            too_narrow |= rect.width < MIN_REGION_SELECT_PX;
            target.x = BrushExtent::new(
                transform.invert_x(rect.left),
                transform.invert_x(rect.left + rect.width),
            );
        }
        if geometry.axis_zoomable(Axis::Y) {
            too_narrow |= rect.height < MIN_REGION_SELECT_PX;
            target.y = BrushExtent::new(
                transform.invert_y(rect.top, y_multiplier),
                transform.invert_y(rect.top + rect.height, y_multiplier),
            );
        }

        if too_narrow {
            debug!(chart = %engine.id, width = rect.width, height = rect.height, "region selection discarded");
        } else {
            let view = geometry.constrain_window(target, engine.brushes);
            debug!(chart = %engine.id, target_k = view.transform.k, "region selection applied");
            Self::apply_target(engine, view, ZoomSource::RegionSelect, true, true)?;
        }
        // Clears the selection rectangle.
        RenderOrchestrator::render(engine, false, false)?;
        Ok(())
    }

    pub(super) fn set_region_select_modifier<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        held: bool,
    ) -> ChartResult<()> {
        engine.arbiter.region_modifier = held;
        if !held && engine.arbiter.selection.take().is_some() {
            debug!(chart = %engine.id, "region selection cancelled by modifier release");
            RenderOrchestrator::render(engine, false, false)?;
        }
        Ok(())
    }

    pub(super) fn pinch_start<H: ChartHost, R: Renderer>(engine: &mut ZoomChart<H, R>) -> ChartResult<bool> {
        if !engine.config.input.pinch_zoom || engine.render_state.sizes.is_none() {
            return Ok(false);
        }
        engine.arbiter.selection = None;
        Self::interrupt(engine)?;
        let signals = engine.recognizer.pinch_start();
        Self::dispatch(engine, signals)
    }

    pub(super) fn pinch_update<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        scale_factor: f64,
        center_x: f64,
        center_y: f64,
    ) -> ChartResult<bool> {
        let Some(sizes) = engine.render_state.sizes else {
            return Ok(false);
        };
        let (px, py) = Self::plot_point(sizes, center_x, center_y);
        let signals = engine.recognizer.pinch_update(scale_factor, px, py)?;
        Self::dispatch(engine, signals)
    }

    pub(super) fn pinch_end<H: ChartHost, R: Renderer>(engine: &mut ZoomChart<H, R>) -> ChartResult<bool> {
        let signals = engine.recognizer.pinch_end();
        Self::dispatch(engine, signals)
    }

    /// Advances the active transition; the only clock the engine has.
    pub(super) fn tick<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        delta: Duration,
    ) -> ChartResult<bool> {
        let Some((transition, step)) = engine.transitions.tick(delta)? else {
            return Ok(false);
        };
        let Some(geometry) = engine.brush_geometry() else {
            return Ok(false);
        };
        match step {
            TransitionStep::Frame(window) => {
                TransformCoordinator::commit(engine, geometry.view_of(window), transition.source)?;
            }
            TransitionStep::Finished(window) => {
                TransformCoordinator::commit(engine, geometry.view_of(window), transition.source)?;
                debug!(chart = %engine.id, source = ?transition.source, "transition finished");
                engine.end_zoom();
            }
        }
        Ok(true)
    }
}

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        GestureArbiter::state(self)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.is_active()
    }

    /// Recognizer signals dropped because the engine itself caused them.
    #[must_use]
    pub fn ignored_zoom_signal_count(&self) -> u64 {
        self.arbiter.ignored_signals
    }

    /// Current region-selection rectangle in plot pixels.
    #[must_use]
    pub fn region_selection(&self) -> Option<PixelRect> {
        let sizes = self.render_state.sizes?;
        self.arbiter
            .selection
            .map(|selection| selection.rect(sizes, self.config.layout.is_two_dimensional()))
    }

    /// Wheel input at container coordinates `(x, y)`; negative deltas zoom in.
    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) -> ChartResult<bool> {
        GestureArbiter::wheel(self, delta_y, x, y)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        GestureArbiter::pointer_down(self, x, y)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        GestureArbiter::pointer_move(self, x, y)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        GestureArbiter::pointer_up(self, x, y)
    }

    pub fn pinch_start(&mut self) -> ChartResult<bool> {
        GestureArbiter::pinch_start(self)
    }

    /// `scale_factor` is relative to the finger distance at pinch start.
    pub fn pinch_update(&mut self, scale_factor: f64, center_x: f64, center_y: f64) -> ChartResult<bool> {
        GestureArbiter::pinch_update(self, scale_factor, center_x, center_y)
    }

    pub fn pinch_end(&mut self) -> ChartResult<bool> {
        GestureArbiter::pinch_end(self)
    }

    /// Tracks the region-select modifier key; releasing it mid-drag cancels
    /// the selection.
    pub fn set_region_select_modifier(&mut self, held: bool) -> ChartResult<()> {
        GestureArbiter::set_region_select_modifier(self, held)
    }

    /// Advances animated transitions by `delta`. Returns whether a frame was
    /// committed.
    pub fn tick(&mut self, delta: Duration) -> ChartResult<bool> {
        GestureArbiter::tick(self, delta)
    }
}
