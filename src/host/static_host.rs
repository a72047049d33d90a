use crate::core::{BucketPlan, LinearScale, Scale};
use crate::error::ChartResult;

use super::{ChartHost, OverviewContext, RenderContext, RenderStatus};

const MIN_BUCKET_PX: f64 = 4.0;

/// Host with fixed linear domains, used by tests and headless embedding.
///
/// It records what the engine asked of it so callers can assert on render
/// cycles without a drawing backend.
#[derive(Debug, Clone)]
pub struct StaticHost {
    x_base: LinearScale,
    y_base: Option<LinearScale>,
    pub status: RenderStatus,
    pub prepare_calls: usize,
    pub create_calls: usize,
    pub overview_x_calls: usize,
    pub overview_y_calls: usize,
    pub last_force_refresh: bool,
    pub last_update_zoom: bool,
    pub last_x_domain: Option<(f64, f64)>,
    pub last_y_domain: Option<(f64, f64)>,
    pub last_plot_width: Option<f64>,
    /// Bucket layout a histogram host would re-aggregate into for the last
    /// visible X window.
    pub last_buckets: Option<BucketPlan>,
}

impl StaticHost {
    pub fn new(x_domain: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            x_base: LinearScale::new(x_domain, (0.0, 1.0))?,
            y_base: None,
            status: RenderStatus::Success,
            prepare_calls: 0,
            create_calls: 0,
            overview_x_calls: 0,
            overview_y_calls: 0,
            last_force_refresh: false,
            last_update_zoom: false,
            last_x_domain: None,
            last_y_domain: None,
            last_plot_width: None,
            last_buckets: None,
        })
    }

    pub fn with_y_domain(mut self, y_domain: (f64, f64)) -> ChartResult<Self> {
        self.y_base = Some(LinearScale::new(y_domain, (0.0, 1.0))?);
        Ok(self)
    }

    /// Replaces the X domain, as a host does after loading new data.
    pub fn set_x_domain(&mut self, x_domain: (f64, f64)) -> ChartResult<()> {
        self.x_base = LinearScale::new(x_domain, (0.0, 1.0))?;
        Ok(())
    }

    #[must_use]
    pub fn with_status(mut self, status: RenderStatus) -> Self {
        self.status = status;
        self
    }
}

impl ChartHost for StaticHost {
    fn x_scale(&self, range: (f64, f64)) -> Scale {
        Scale::Linear(self.x_base.with_range(range))
    }

    fn y_scale(&self, range: (f64, f64)) -> Option<Scale> {
        self.y_base.map(|scale| Scale::Linear(scale.with_range(range)))
    }

    fn prepare_chart(&mut self, context: &RenderContext<'_>) {
        self.prepare_calls += 1;
        self.last_plot_width = Some(context.sizes.width());
        self.last_buckets = context.x_scale.as_linear().and_then(|scale| {
            let (start, end) = scale.domain();
            BucketPlan::for_window(
                start.min(end),
                start.max(end),
                context.sizes.width(),
                MIN_BUCKET_PX,
            )
            .ok()
        });
    }

    fn create_chart(&mut self, context: &RenderContext<'_>) -> RenderStatus {
        self.create_calls += 1;
        self.last_force_refresh = context.force_refresh;
        self.last_update_zoom = context.update_zoom;
        self.last_x_domain = context.x_scale.as_linear().map(LinearScale::domain);
        self.last_y_domain = context
            .y_scale
            .and_then(Scale::as_linear)
            .map(LinearScale::domain);
        self.status
    }

    fn create_overview_x(&mut self, _context: &OverviewContext<'_>) {
        self.overview_x_calls += 1;
    }

    fn create_overview_y(&mut self, _context: &OverviewContext<'_>) {
        self.overview_y_calls += 1;
    }
}
