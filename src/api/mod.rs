//! Public engine facade. `ZoomChart` methods are split by concern across the
//! coordinator modules below; each coordinator owns one part of the zoom
//! pipeline and operates on the engine through `pub(super)` state.

mod behavior;
mod brush_sync;
mod engine;
mod engine_config;
mod engine_init;
mod gesture_arbiter;
mod json_contract;
mod listener_dispatch;
mod listener_registry;
mod render_orchestrator;
mod transform_state;
mod validation;
mod view_coordinator;

pub use behavior::{
    AxisLabelConfig, AxisLayout, OverviewBehavior, TransitionBehavior, ZoomBehavior,
    ZoomInputBehavior,
};
pub use brush_sync::{BrushGeometry, ConstrainedView};
pub use engine::ZoomChart;
pub use engine_config::ZoomChartConfig;
pub use json_contract::{ZOOM_CHART_CONFIG_JSON_SCHEMA_V1, ZoomChartConfigJsonContractV1};
