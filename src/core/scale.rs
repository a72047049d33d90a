use serde::{Deserialize, Serialize};

use crate::core::{Axis, ZoomTransform};
use crate::error::{ChartError, ChartResult};

/// Smallest visible domain span, relative to the domain magnitude, that still
/// resolves into distinct floating-point values across the range.
const MIN_RELATIVE_SPAN: f64 = 1e-12;

/// Continuous domain-to-pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Same domain, new output range.
    #[must_use]
    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self {
            range_start: range.0,
            range_end: range.1,
            ..self
        }
    }

    /// Narrowest range extent (pixels) whose domain span stays representable.
    ///
    /// Domains far from zero (epoch milliseconds) run out of `f64` resolution
    /// long before any configured zoom level is reached.
    #[must_use]
    pub fn min_zoom_extent(self) -> f64 {
        let span = (self.domain_end - self.domain_start).abs();
        let magnitude = self.domain_start.abs().max(self.domain_end.abs());
        let range_span = (self.range_end - self.range_start).abs();
        range_span * (magnitude * MIN_RELATIVE_SPAN / span)
    }

    /// Rescales the domain so the zoomed scale maps the visible window onto
    /// the unchanged output range.
    pub fn rescaled(self, axis: Axis, transform: ZoomTransform, y_multiplier: f64) -> ChartResult<Self> {
        let invert = |px: f64| match axis {
            Axis::X => transform.invert_x(px),
            Axis::Y => transform.invert_y(px, y_multiplier),
        };
        let start = self.invert(invert(self.range_start));
        let end = self.invert(invert(self.range_end));
        Self::new((start, end), self.range())
    }
}

/// Ordinal scale splitting the output range into equal bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    keys: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
}

impl BandScale {
    pub fn new(keys: Vec<String>, range: (f64, f64), padding: f64) -> ChartResult<Self> {
        if keys.is_empty() {
            return Err(ChartError::InvalidData(
                "band scale requires at least one key".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        Ok(Self {
            keys,
            range_start: range.0,
            range_end: range.1,
            padding,
        })
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|entry| entry == key)
    }

    fn layout(&self) -> (f64, f64, bool) {
        let reversed = self.range_end < self.range_start;
        let (lo, hi) = if reversed {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };
        let n = self.keys.len() as f64;
        let step = (hi - lo) / (n + self.padding);
        let start = lo + (hi - lo - step * (n - self.padding)) * 0.5;
        (start, step, reversed)
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.layout().1
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Leading pixel edge of the band at `index`.
    #[must_use]
    pub fn apply_index(&self, index: usize) -> Option<f64> {
        if index >= self.keys.len() {
            return None;
        }
        let (start, step, reversed) = self.layout();
        let slot = if reversed {
            self.keys.len() - 1 - index
        } else {
            index
        };
        Some(start + step * slot as f64)
    }

    #[must_use]
    pub fn apply(&self, key: &str) -> Option<f64> {
        self.index_of(key).and_then(|index| self.apply_index(index))
    }

    /// Ordinal domains cannot be rescaled, so zoom remaps the range endpoints.
    #[must_use]
    pub fn zoomed(&self, axis: Axis, transform: ZoomTransform, y_multiplier: f64) -> Self {
        let apply = |px: f64| match axis {
            Axis::X => transform.apply_x(px),
            Axis::Y => transform.apply_y(px, y_multiplier),
        };
        Self {
            keys: self.keys.clone(),
            range_start: apply(self.range_start),
            range_end: apply(self.range_end),
            padding: self.padding,
        }
    }

    /// Indices of the first and last band intersecting `[low, high]` pixels.
    #[must_use]
    pub fn indices_in_pixel_range(&self, low: f64, high: f64) -> Option<(usize, usize)> {
        let bandwidth = self.bandwidth();
        let mut visible = (0..self.keys.len()).filter(|&index| {
            self.apply_index(index)
                .is_some_and(|edge| edge + bandwidth > low && edge < high)
        });
        let first = visible.next()?;
        let last = visible.last().unwrap_or(first);
        Some((first, last))
    }
}

/// Scale returned by the hosting chart for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Linear(LinearScale),
    Band(BandScale),
}

impl Scale {
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Linear(_))
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.range(),
            Self::Band(scale) => scale.range(),
        }
    }

    /// Domain value at `pixel`; `None` for ordinal scales.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> Option<f64> {
        match self {
            Self::Linear(scale) => Some(scale.invert(pixel)),
            Self::Band(_) => None,
        }
    }

    #[must_use]
    pub fn as_linear(&self) -> Option<LinearScale> {
        match self {
            Self::Linear(scale) => Some(*scale),
            Self::Band(_) => None,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Linear(_) => None,
            Self::Band(scale) => Some(scale),
        }
    }

    /// See [`LinearScale::min_zoom_extent`]; bands never collapse.
    #[must_use]
    pub fn min_zoom_extent(&self) -> f64 {
        match self {
            Self::Linear(scale) => scale.min_zoom_extent(),
            Self::Band(_) => 0.0,
        }
    }

    /// Composes the host scale with the current zoom transform.
    pub fn zoomed(&self, axis: Axis, transform: ZoomTransform, y_multiplier: f64) -> ChartResult<Self> {
        match self {
            Self::Linear(scale) => Ok(Self::Linear(scale.rescaled(axis, transform, y_multiplier)?)),
            Self::Band(scale) => Ok(Self::Band(scale.zoomed(axis, transform, y_multiplier))),
        }
    }
}

impl From<LinearScale> for Scale {
    fn from(scale: LinearScale) -> Self {
        Self::Linear(scale)
    }
}

impl From<BandScale> for Scale {
    fn from(scale: BandScale) -> Self {
        Self::Band(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::{BandScale, LinearScale, Scale};
    use crate::core::{Axis, ZoomTransform};

    #[test]
    fn linear_rescale_maps_visible_window_onto_range() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 400.0)).expect("scale");
        let t = ZoomTransform::IDENTITY.scale(4.0).translate(-100.0, 0.0);
        let zoomed = scale.rescaled(Axis::X, t, 1.0).expect("rescaled");
        let (start, end) = zoomed.domain();
        assert!((start - 25.0).abs() <= 1e-9);
        assert!((end - 50.0).abs() <= 1e-9);
    }

    #[test]
    fn linear_rescale_handles_inverted_vertical_range() {
        let scale = LinearScale::new((0.0, 10.0), (200.0, 0.0)).expect("scale");
        let t = ZoomTransform::new(1.0, 0.0, 0.0);
        let zoomed = scale.rescaled(Axis::Y, t, 2.0).expect("rescaled");
        // Top half of the pixel range is the upper half of the domain.
        let (start, end) = zoomed.domain();
        assert!((start - 5.0).abs() <= 1e-9);
        assert!((end - 10.0).abs() <= 1e-9);
    }

    #[test]
    fn far_from_zero_domain_limits_the_zoom_extent() {
        let epoch = LinearScale::new((1e12, 1e12 + 10.0), (0.0, 400.0)).expect("scale");
        // One domain unit out of ten, at 1e-12 relative resolution.
        assert!((epoch.min_zoom_extent() - 40.0).abs() <= 1e-6);

        let t = ZoomTransform::new(10.0, -1_800.0, 0.0);
        let zoomed = epoch.rescaled(Axis::X, t, 1.0).expect("still representable");
        let (start, end) = zoomed.domain();
        assert!(end - start > 0.5);

        let small = LinearScale::new((0.0, 100.0), (0.0, 400.0)).expect("scale");
        assert!(small.min_zoom_extent() < 1e-6);
        let keys = vec!["a".to_owned()];
        let band = Scale::from(BandScale::new(keys, (0.0, 10.0), 0.0).expect("band"));
        assert_eq!(band.min_zoom_extent(), 0.0);
    }

    #[test]
    fn band_scale_lays_out_bands_and_zooms_range() {
        let keys = ["a", "b", "c", "d"].map(str::to_owned).to_vec();
        let scale = BandScale::new(keys, (0.0, 400.0), 0.0).expect("band");
        assert_eq!(scale.bandwidth(), 100.0);
        assert_eq!(scale.apply("c"), Some(200.0));

        let zoomed = scale.zoomed(Axis::X, ZoomTransform::new(2.0, -400.0, 0.0), 1.0);
        assert_eq!(zoomed.range(), (-400.0, 400.0));
        assert_eq!(zoomed.indices_in_pixel_range(0.0, 400.0), Some((2, 3)));
    }

    #[test]
    fn reversed_band_range_places_first_key_at_the_end() {
        let keys = ["low", "high"].map(str::to_owned).to_vec();
        let scale = BandScale::new(keys, (100.0, 0.0), 0.0).expect("band");
        assert_eq!(scale.apply("low"), Some(50.0));
        assert_eq!(scale.apply("high"), Some(0.0));
    }

    #[test]
    fn band_scale_has_no_inverse() {
        let keys = vec!["only".to_owned()];
        let scale = Scale::from(BandScale::new(keys, (0.0, 10.0), 0.1).expect("band"));
        assert!(scale.invert(5.0).is_none());
        assert!(!scale.is_continuous());
    }
}
