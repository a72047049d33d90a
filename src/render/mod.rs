mod frame;
mod null_renderer;

pub use frame::{AxisFrame, AxisTick, ChromeFrame, OverviewFrame};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any chrome drawing backend.
///
/// Axes, overview brushes, selection rectangles and status placeholders are
/// handed over as a deterministic `ChromeFrame`; the chart body itself is
/// drawn by the host through `ChartHost::create_chart`.
pub trait Renderer {
    fn render(&mut self, frame: &ChromeFrame) -> ChartResult<()>;
}
