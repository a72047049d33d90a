use std::time::Duration;

use crate::core::BrushWindow;
use crate::error::{ChartError, ChartResult};

use super::ZoomSource;

/// Cubic in-out easing over `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// One in-flight animated zoom change.
///
/// Interpolation runs between brush windows: a convex combination of two
/// in-bounds windows is itself in bounds, so every frame is a valid view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: BrushWindow,
    pub to: BrushWindow,
    pub duration: Duration,
    pub elapsed: Duration,
    pub source: ZoomSource,
    pub caused_by_user: bool,
}

impl Transition {
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[must_use]
    pub fn window_at(&self, progress: f64) -> BrushWindow {
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, ease_cubic_in_out(progress))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStep {
    Frame(BrushWindow),
    Finished(BrushWindow),
}

/// Frame-driven animation driver; the host's frame scheduler calls
/// [`TransitionDriver::tick`] and nothing else advances time.
#[derive(Debug, Clone, Default)]
pub struct TransitionDriver {
    active: Option<Transition>,
}

impl TransitionDriver {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active(&self) -> Option<&Transition> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn target(&self) -> Option<BrushWindow> {
        self.active.map(|transition| transition.to)
    }

    /// Starts a transition, superseding any in-flight one. The superseded
    /// transition is returned; it is never resumed.
    pub fn start(
        &mut self,
        from: BrushWindow,
        to: BrushWindow,
        duration: Duration,
        source: ZoomSource,
        caused_by_user: bool,
    ) -> Option<Transition> {
        self.active.replace(Transition {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            source,
            caused_by_user,
        })
    }

    pub fn cancel(&mut self) -> Option<Transition> {
        self.active.take()
    }

    /// Advances the active transition by `delta`.
    ///
    /// Returns `Ok(None)` when idle.
    pub fn tick(&mut self, delta: Duration) -> ChartResult<Option<(Transition, TransitionStep)>> {
        let Some(transition) = self.active.as_mut() else {
            return Ok(None);
        };
        transition.elapsed = transition
            .elapsed
            .checked_add(delta)
            .ok_or_else(|| ChartError::InvalidData("transition clock overflow".to_owned()))?;

        let progress = transition.progress();
        let snapshot = *transition;
        if progress >= 1.0 {
            self.active = None;
            return Ok(Some((snapshot, TransitionStep::Finished(snapshot.to))));
        }
        Ok(Some((snapshot, TransitionStep::Frame(snapshot.window_at(progress)))))
    }
}
