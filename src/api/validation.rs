use crate::core::{Margins, TickFormat};
use crate::error::{ChartError, ChartResult};

use super::{AxisLabelConfig, OverviewBehavior, ZoomBehavior, ZoomChartConfig};

const MAX_TICK_DECIMALS: u8 = 12;
const MAX_TICK_COUNT: usize = 100;

pub(super) fn validate_zoom_chart_config(config: &ZoomChartConfig) -> ChartResult<()> {
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }
    validate_margins(config.margins)?;
    validate_zoom_behavior(config.zoom)?;
    validate_overview_behavior("x", config.overview_x)?;
    validate_overview_behavior("y", config.overview_y)?;
    validate_axis_label_config("x", &config.x_axis)?;
    validate_axis_label_config("y", &config.y_axis)?;
    Ok(())
}

fn validate_margins(margins: Margins) -> ChartResult<()> {
    let sides = [margins.top, margins.right, margins.bottom, margins.left];
    if sides.iter().any(|side| !side.is_finite() || *side < 0.0) {
        return Err(ChartError::InvalidConfig(
            "chart margins must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_zoom_behavior(zoom: ZoomBehavior) -> ChartResult<ZoomBehavior> {
    if !zoom.level_min.is_finite() || zoom.level_min <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "zoom level min must be finite and > 0".to_owned(),
        ));
    }
    if let Some(level_max) = zoom.level_max {
        if !level_max.is_finite() || level_max < zoom.level_min {
            return Err(ChartError::InvalidConfig(
                "zoom level max must be finite and >= zoom level min".to_owned(),
            ));
        }
    }
    if !zoom.step_ratio.is_finite() || zoom.step_ratio <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "zoom step ratio must be finite and > 0".to_owned(),
        ));
    }
    Ok(zoom)
}

fn validate_overview_behavior(axis: &str, overview: OverviewBehavior) -> ChartResult<()> {
    if !overview.enabled {
        return Ok(());
    }
    if !overview.size.is_finite() || overview.size <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{axis} overview size must be finite and > 0"
        )));
    }
    if !overview.margin.is_finite() || overview.margin < 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{axis} overview margin must be finite and >= 0"
        )));
    }
    Ok(())
}

fn validate_axis_label_config(axis: &str, labels: &AxisLabelConfig) -> ChartResult<()> {
    if labels.tick_count == 0 || labels.tick_count > MAX_TICK_COUNT {
        return Err(ChartError::InvalidConfig(format!(
            "{axis} axis tick count must be between 1 and {MAX_TICK_COUNT}"
        )));
    }
    match labels.format {
        TickFormat::Fixed { decimals } | TickFormat::Scientific { decimals }
            if decimals > MAX_TICK_DECIMALS =>
        {
            Err(ChartError::InvalidConfig(format!(
                "{axis} axis tick decimals must be <= {MAX_TICK_DECIMALS}"
            )))
        }
        _ => Ok(()),
    }
}
