use serde::{Deserialize, Serialize};

use crate::core::{Axis, BrushExtent, ChartSizes, PixelRect};
use crate::error::{ChartError, ChartResult};
use crate::host::RenderStatus;

/// One labelled tick, positioned in plot pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub axis: Axis,
    pub ticks: Vec<AxisTick>,
    pub label: Option<String>,
}

/// Overview mini-chart area plus the brush overlay drawn on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverviewFrame {
    pub axis: Axis,
    pub area: PixelRect,
    /// `None` when brushing is disabled.
    pub brush: Option<BrushExtent>,
}

/// Everything the engine draws around the host chart in one cycle.
///
/// Backends receive a fully materialized frame so chrome drawing stays
/// isolated from zoom arbitration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromeFrame {
    pub sizes: ChartSizes,
    pub status: RenderStatus,
    pub x_axis: Option<AxisFrame>,
    pub y_axis: Option<AxisFrame>,
    pub overview_x: Option<OverviewFrame>,
    pub overview_y: Option<OverviewFrame>,
    /// Transient region-selection rectangle in plot pixels.
    pub selection: Option<PixelRect>,
    /// Status text shown instead of axes when there is no data.
    pub placeholder: Option<String>,
}

impl ChromeFrame {
    #[must_use]
    pub fn new(sizes: ChartSizes, status: RenderStatus) -> Self {
        Self {
            sizes,
            status,
            x_axis: None,
            y_axis: None,
            overview_x: None,
            overview_y: None,
            selection: None,
            placeholder: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.sizes.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.sizes.viewport.width,
                height: self.sizes.viewport.height,
            });
        }

        for axis in [&self.x_axis, &self.y_axis].into_iter().flatten() {
            if axis.ticks.iter().any(|tick| !tick.position.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "{:?} axis tick position must be finite",
                    axis.axis
                )));
            }
        }
        for overview in [&self.overview_x, &self.overview_y].into_iter().flatten() {
            if let Some(brush) = overview.brush {
                if !brush.low.is_finite() || !brush.high.is_finite() {
                    return Err(ChartError::InvalidData(
                        "overview brush extent must be finite".to_owned(),
                    ));
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn has_axes(&self) -> bool {
        self.x_axis.is_some() || self.y_axis.is_some()
    }
}
