use serde::{Deserialize, Serialize};

use crate::core::Axis;
use crate::error::{ChartError, ChartResult};

/// Pixel-space `[low, high]` selection of one axis of the unzoomed plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushExtent {
    pub low: f64,
    pub high: f64,
}

impl BrushExtent {
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Builds an extent from two unordered pixel positions.
    pub fn from_unordered(a: f64, b: f64) -> ChartResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ChartError::InvalidData(
                "brush extent bounds must be finite".to_owned(),
            ));
        }
        Ok(Self::new(a.min(b), a.max(b)))
    }

    #[must_use]
    pub const fn full(size: f64) -> Self {
        Self::new(0.0, size)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.high - self.low
    }

    #[must_use]
    pub fn is_within(self, size: f64) -> bool {
        self.low >= 0.0 && self.high <= size && self.low < self.high
    }

    /// Moves the extent back inside `[0, size]` keeping its width when
    /// possible. Returns the corrected extent and whether a correction happened.
    #[must_use]
    pub fn clamp_within(self, size: f64) -> (Self, bool) {
        const EPS: f64 = 1e-9;
        let width = self.width();
        if !(width > 0.0) || width >= size - EPS {
            let full = Self::full(size);
            let corrected = (self.low - full.low).abs() > EPS || (self.high - full.high).abs() > EPS;
            return (full, corrected);
        }
        if self.low < -EPS {
            return (Self::new(0.0, width), true);
        }
        if self.high > size + EPS {
            return (Self::new(size - width, size), true);
        }
        (self, false)
    }

    /// Rescales the extent proportionally from `from_size` to `to_size`.
    #[must_use]
    pub fn renormalized(self, from_size: f64, to_size: f64) -> Self {
        if !(from_size > 0.0) {
            return Self::full(to_size);
        }
        let ratio = to_size / from_size;
        Self::new(self.low * ratio, self.high * ratio)
    }

    /// Linear interpolation between two extents, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.low + (other.low - self.low) * t,
            self.high + (other.high - self.high) * t,
        )
    }

    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.low - other.low).abs() <= tolerance && (self.high - other.high).abs() <= tolerance
    }
}

/// Brush extents of both axes; the unit transitions interpolate in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushWindow {
    pub x: BrushExtent,
    pub y: BrushExtent,
}

impl BrushWindow {
    #[must_use]
    pub const fn new(x: BrushExtent, y: BrushExtent) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn full(width: f64, height: f64) -> Self {
        Self::new(BrushExtent::full(width), BrushExtent::full(height))
    }

    #[must_use]
    pub fn get(self, axis: Axis) -> BrushExtent {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, extent: BrushExtent) {
        match axis {
            Axis::X => self.x = extent,
            Axis::Y => self.y = extent,
        }
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(self.x.lerp(other.x, t), self.y.lerp(other.y, t))
    }
}
