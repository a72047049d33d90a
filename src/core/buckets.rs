use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Bucket layout for re-aggregating histogram/heatmap data at the current
/// visible window and pixel resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketPlan {
    pub start: f64,
    pub step: f64,
    pub count: usize,
}

impl BucketPlan {
    /// Picks the smallest 1/2/5 x 10^n step that keeps every bucket at least
    /// `min_bucket_px` wide when `[min, max]` is drawn over `pixel_width`.
    pub fn for_window(min: f64, max: f64, pixel_width: f64, min_bucket_px: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(ChartError::InvalidData(
                "bucket window must be finite with max > min".to_owned(),
            ));
        }
        if !pixel_width.is_finite() || pixel_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "bucket pixel width must be finite and > 0".to_owned(),
            ));
        }
        if !min_bucket_px.is_finite() || min_bucket_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "minimum bucket width must be finite and > 0".to_owned(),
            ));
        }

        let max_buckets = (pixel_width / min_bucket_px).floor().max(1.0);
        let raw = (max - min) / max_buckets;
        let step = nice_step_at_least(raw);
        let start = (min / step).floor() * step;
        let count = ((max - start) / step).ceil().max(1.0) as usize;

        Ok(Self { start, step, count })
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.step * self.count as f64
    }

    /// Bucket index containing `value`, if inside the plan.
    #[must_use]
    pub fn bucket_of(self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.start || value >= self.end() {
            return None;
        }
        let index = ((value - self.start) / self.step).floor() as usize;
        Some(index.min(self.count - 1))
    }
}

fn nice_step_at_least(raw: f64) -> f64 {
    let power = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * power)
        .find(|candidate| *candidate >= raw * (1.0 - 1e-12))
        .unwrap_or(10.0 * power)
}
