use serde::{Deserialize, Serialize};

use crate::core::{ChartId, ViewChange, ZoomTransform};
use crate::interaction::ZoomSource;

/// Transform notification passed to listener hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomEvent {
    pub chart: ChartId,
    pub source: ZoomSource,
    pub transform: ZoomTransform,
    pub y_multiplier: f64,
    pub caused_by_user: bool,
}

/// Observer of one chart's zoom lifecycle.
///
/// Every `on_zoom_start` is matched by exactly one `on_zoom_end`, including
/// when the change is superseded by another gesture or transition.
pub trait ZoomListener {
    fn id(&self) -> &str;

    fn on_zoom_start(&mut self, _event: &ZoomEvent) {}

    fn on_zoom(&mut self, _event: &ZoomEvent) {}

    fn on_zoom_end(&mut self, _event: &ZoomEvent) {}

    fn on_view_change(&mut self, _change: &ViewChange) {}
}
