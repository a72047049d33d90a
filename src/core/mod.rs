pub mod buckets;
pub mod extent;
pub mod scale;
pub mod ticks;
pub mod transform;
pub mod types;
pub mod view;

pub use buckets::BucketPlan;
pub use extent::{BrushExtent, BrushWindow};
pub use scale::{BandScale, LinearScale, Scale};
pub use ticks::{TickFormat, linear_ticks, tick_step};
pub use transform::ZoomTransform;
pub use types::{Axis, ChartId, ChartSizes, Margins, PixelRect, Viewport};
pub use view::{AxisView, View, ViewChange, ViewRequest};
