use serde::{Deserialize, Serialize};

use crate::core::{Axis, Margins, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{
    AxisLabelConfig, AxisLayout, OverviewBehavior, TransitionBehavior, ZoomBehavior,
    ZoomInputBehavior, behavior::axis_zoomable,
};

/// Public zoom chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub layout: AxisLayout,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_zoom_behavior")]
    pub zoom: ZoomBehavior,
    #[serde(default = "default_transition_behavior")]
    pub transition: TransitionBehavior,
    #[serde(default = "default_brush_enabled")]
    pub brush_enabled: bool,
    #[serde(default)]
    pub overview_x: OverviewBehavior,
    #[serde(default)]
    pub overview_y: OverviewBehavior,
    #[serde(default)]
    pub x_axis: AxisLabelConfig,
    #[serde(default)]
    pub y_axis: AxisLabelConfig,
    #[serde(default = "default_input_behavior")]
    pub input: ZoomInputBehavior,
    #[serde(default = "default_no_data_text")]
    pub no_data_text: String,
}

impl ZoomChartConfig {
    /// Creates a one-dimensional config with default behavior.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layout: AxisLayout::X,
            margins: Margins::default(),
            zoom: default_zoom_behavior(),
            transition: default_transition_behavior(),
            brush_enabled: default_brush_enabled(),
            overview_x: OverviewBehavior::default(),
            overview_y: OverviewBehavior::default(),
            x_axis: AxisLabelConfig::default(),
            y_axis: AxisLabelConfig::default(),
            input: default_input_behavior(),
            no_data_text: default_no_data_text(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: AxisLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_zoom_behavior(mut self, zoom: ZoomBehavior) -> Self {
        self.zoom = zoom;
        self
    }

    /// Enables or disables zoom per axis.
    #[must_use]
    pub fn with_zoom_enabled(mut self, x_enabled: bool, y_enabled: bool) -> Self {
        self.zoom.x_enabled = x_enabled;
        self.zoom.y_enabled = y_enabled;
        self
    }

    #[must_use]
    pub fn with_zoom_level_bounds(mut self, level_min: f64, level_max: Option<f64>) -> Self {
        self.zoom.level_min = level_min;
        self.zoom.level_max = level_max;
        self
    }

    #[must_use]
    pub fn with_transition_behavior(mut self, transition: TransitionBehavior) -> Self {
        self.transition = transition;
        self
    }

    /// Shortcut for snapping every change instead of gliding.
    #[must_use]
    pub fn without_transitions(mut self) -> Self {
        self.transition.enabled = false;
        self
    }

    #[must_use]
    pub fn with_brush_enabled(mut self, enabled: bool) -> Self {
        self.brush_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_overview(mut self, axis: Axis, overview: OverviewBehavior) -> Self {
        match axis {
            Axis::X => self.overview_x = overview,
            Axis::Y => self.overview_y = overview,
        }
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, axis: Axis, labels: AxisLabelConfig) -> Self {
        match axis {
            Axis::X => self.x_axis = labels,
            Axis::Y => self.y_axis = labels,
        }
        self
    }

    #[must_use]
    pub fn with_input_behavior(mut self, input: ZoomInputBehavior) -> Self {
        self.input = input;
        self
    }

    #[must_use]
    pub fn with_no_data_text(mut self, text: impl Into<String>) -> Self {
        self.no_data_text = text.into();
        self
    }

    #[must_use]
    pub fn axis_zoomable(&self, axis: Axis) -> bool {
        axis_zoomable(self.layout, self.zoom, axis)
    }

    #[must_use]
    pub(crate) fn overview(&self, axis: Axis) -> OverviewBehavior {
        match axis {
            Axis::X => self.overview_x,
            Axis::Y => self.overview_y,
        }
    }

    #[must_use]
    pub(crate) fn axis_labels(&self, axis: Axis) -> &AxisLabelConfig {
        match axis {
            Axis::X => &self.x_axis,
            Axis::Y => &self.y_axis,
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_zoom_behavior() -> ZoomBehavior {
    ZoomBehavior::default()
}

fn default_transition_behavior() -> TransitionBehavior {
    TransitionBehavior::default()
}

fn default_brush_enabled() -> bool {
    true
}

fn default_input_behavior() -> ZoomInputBehavior {
    ZoomInputBehavior::default()
}

fn default_no_data_text() -> String {
    "No data".to_owned()
}
