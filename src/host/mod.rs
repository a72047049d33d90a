mod static_host;

pub use static_host::StaticHost;

use serde::{Deserialize, Serialize};

use crate::core::{Axis, ChartSizes, PixelRect, Scale, ZoomTransform};

/// Outcome of the host draw hook for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStatus {
    Success,
    /// Nothing to draw yet; axes, overviews and brushes are skipped.
    NoData,
}

/// Inputs handed to the host data-preparation and draw hooks.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Container identity changed or bindings were rebuilt.
    pub force_refresh: bool,
    /// Only the zoom transform changed since the previous cycle.
    pub update_zoom: bool,
    pub sizes: ChartSizes,
    /// Host X scale composed with the current transform.
    pub x_scale: &'a Scale,
    pub y_scale: Option<&'a Scale>,
    pub transform: ZoomTransform,
    pub y_multiplier: f64,
}

/// Inputs for drawing one overview mini-chart.
#[derive(Debug, Clone, Copy)]
pub struct OverviewContext<'a> {
    pub axis: Axis,
    /// Unzoomed scale mapped onto the overview area.
    pub scale: &'a Scale,
    pub area: PixelRect,
}

/// Callbacks implemented by the chart embedding the zoom engine.
///
/// Scales are requested on every render and never cached, since the host may
/// change its domain between calls (new bucket boundaries, fresh data).
pub trait ChartHost {
    fn x_scale(&self, range: (f64, f64)) -> Scale;

    /// Vertical scale for two-dimensional charts.
    fn y_scale(&self, _range: (f64, f64)) -> Option<Scale> {
        None
    }

    /// Lets the host refit data (re-bucket, re-aggregate) before drawing.
    fn prepare_chart(&mut self, _context: &RenderContext<'_>) {}

    fn create_chart(&mut self, context: &RenderContext<'_>) -> RenderStatus;

    fn create_overview_x(&mut self, _context: &OverviewContext<'_>) {}

    fn create_overview_y(&mut self, _context: &OverviewContext<'_>) {}
}
