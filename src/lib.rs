//! chart-zoom: zoom, brush and linked-view engine for 2-D charts.
//!
//! `ZoomChart` keeps a single zoom transform per chart and arbitrates every
//! change to it (wheel, drag, pinch, region selection, overview brushes,
//! programmatic view requests), keeping overview brushes and linked charts
//! consistent. Hosts plug in scales and drawing through `host::ChartHost`;
//! chart chrome is handed to a `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod host;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ZoomChart, ZoomChartConfig};
pub use error::{ChartError, ChartResult};
