use tracing::debug;

use crate::core::ViewChange;
use crate::extensions::ZoomEvent;
use crate::host::ChartHost;
use crate::interaction::ZoomSource;
use crate::render::Renderer;

use super::{ZoomChart, gesture_arbiter::ZoomOwner};

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    fn zoom_event(&self, source: ZoomSource, caused_by_user: bool) -> ZoomEvent {
        ZoomEvent {
            chart: self.id.clone(),
            source,
            transform: self.state.transform,
            y_multiplier: self.state.y_multiplier,
            caused_by_user,
        }
    }

    /// Takes ownership of the transform for `source`, closing any previous owner.
    pub(super) fn begin_zoom(&mut self, source: ZoomSource, caused_by_user: bool) {
        self.finish_zoom(false);
        self.arbiter.owner = Some(ZoomOwner {
            source,
            caused_by_user,
        });
        debug!(chart = %self.id, ?source, caused_by_user, "zoom started");
        let event = self.zoom_event(source, caused_by_user);
        for listener in &mut self.listeners {
            listener.on_zoom_start(&event);
        }
    }

    pub(super) fn emit_zoom(&mut self, source: ZoomSource) {
        let caused_by_user = self
            .arbiter
            .owner
            .is_some_and(|owner| owner.caused_by_user);
        let event = self.zoom_event(source, caused_by_user);
        for listener in &mut self.listeners {
            listener.on_zoom(&event);
        }
    }

    /// Settles the current owner and publishes the resulting view.
    pub(super) fn end_zoom(&mut self) {
        self.finish_zoom(true);
    }

    /// Releases the current owner. Superseded owners (`settled = false`) get
    /// `on_zoom_end` but no view change.
    pub(super) fn finish_zoom(&mut self, settled: bool) {
        let Some(owner) = self.arbiter.owner.take() else {
            return;
        };
        debug!(chart = %self.id, source = ?owner.source, settled, "zoom ended");
        let event = self.zoom_event(owner.source, owner.caused_by_user);
        for listener in &mut self.listeners {
            listener.on_zoom_end(&event);
        }
        if !settled {
            return;
        }
        let Some(view) = self.view() else {
            return;
        };
        let change = ViewChange {
            chart: self.id.clone(),
            view,
            caused_by_user: owner.caused_by_user,
        };
        for listener in &mut self.listeners {
            listener.on_view_change(&change);
        }
    }
}
