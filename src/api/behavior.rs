use serde::{Deserialize, Serialize};

use crate::core::{Axis, TickFormat};

fn default_true() -> bool {
    true
}

/// Number of chart dimensions driven by the zoom transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisLayout {
    /// Histogram / line chart: only X is zoomed, `y = 0`, multiplier `1`.
    #[default]
    X,
    /// Heatmap / scatter: both axes follow the transform.
    XY,
}

impl AxisLayout {
    #[must_use]
    pub fn is_two_dimensional(self) -> bool {
        self == Self::XY
    }
}

/// Zoom level bounds and wheel step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBehavior {
    #[serde(default = "default_true")]
    pub x_enabled: bool,
    #[serde(default = "default_true")]
    pub y_enabled: bool,
    #[serde(default = "default_zoom_level_min")]
    pub level_min: f64,
    /// `None` leaves zoom-in unbounded.
    #[serde(default)]
    pub level_max: Option<f64>,
    /// One wheel notch zooms by `1 + step_ratio`.
    #[serde(default = "default_zoom_step_ratio")]
    pub step_ratio: f64,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self {
            x_enabled: true,
            y_enabled: true,
            level_min: default_zoom_level_min(),
            level_max: None,
            step_ratio: default_zoom_step_ratio(),
        }
    }
}

impl ZoomBehavior {
    /// Scale bounds handed to the gesture recognizer.
    #[must_use]
    pub fn scale_extent(self) -> (f64, f64) {
        (self.level_min, self.level_max.unwrap_or(f64::INFINITY))
    }
}

fn default_zoom_level_min() -> f64 {
    1.0
}

fn default_zoom_step_ratio() -> f64 {
    0.2
}

/// Animated glide used by wheel zoom, view sets, resets and region selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionBehavior {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_transition_duration_ms")]
    pub duration_ms: u64,
}

impl Default for TransitionBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: default_transition_duration_ms(),
        }
    }
}

fn default_transition_duration_ms() -> u64 {
    150
}

/// Overview mini-chart placement for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverviewBehavior {
    #[serde(default)]
    pub enabled: bool,
    /// Thickness of the overview strip in pixels.
    #[serde(default = "default_overview_size")]
    pub size: f64,
    /// Gap between the overview strip and the axis it belongs to.
    #[serde(default = "default_overview_margin")]
    pub margin: f64,
}

impl Default for OverviewBehavior {
    fn default() -> Self {
        Self {
            enabled: false,
            size: default_overview_size(),
            margin: default_overview_margin(),
        }
    }
}

impl OverviewBehavior {
    /// Space taken away from the plot area.
    #[must_use]
    pub(crate) fn reserved(self) -> f64 {
        if self.enabled {
            self.size + self.margin
        } else {
            0.0
        }
    }
}

fn default_overview_size() -> f64 {
    40.0
}

fn default_overview_margin() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabelConfig {
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub format: TickFormat,
    #[serde(default)]
    pub label: Option<String>,
}

impl Default for AxisLabelConfig {
    fn default() -> Self {
        Self {
            visible: true,
            tick_count: default_tick_count(),
            format: TickFormat::Auto,
            label: None,
        }
    }
}

impl AxisLabelConfig {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

fn default_tick_count() -> usize {
    5
}

/// Host-configurable gates for individual input families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomInputBehavior {
    #[serde(default = "default_true")]
    pub wheel_zoom: bool,
    #[serde(default = "default_true")]
    pub drag_pan: bool,
    #[serde(default = "default_true")]
    pub pinch_zoom: bool,
    /// Modifier-held pointer drag selects a region to zoom into.
    #[serde(default = "default_true")]
    pub region_select: bool,
}

impl Default for ZoomInputBehavior {
    fn default() -> Self {
        Self {
            wheel_zoom: true,
            drag_pan: true,
            pinch_zoom: true,
            region_select: true,
        }
    }
}

/// Zoom availability of one axis under a given layout.
#[must_use]
pub(crate) fn axis_zoomable(layout: AxisLayout, zoom: ZoomBehavior, axis: Axis) -> bool {
    match axis {
        Axis::X => zoom.x_enabled,
        Axis::Y => layout.is_two_dimensional() && zoom.y_enabled,
    }
}
