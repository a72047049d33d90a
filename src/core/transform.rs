use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Affine zoom transform shared by both chart axes.
///
/// A pixel `p` of the unzoomed plot is displayed at `p * k + x` horizontally.
/// Vertically the factor is `k * y_multiplier`, kept outside this type so the
/// two axes can zoom independently while one gesture drives them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    #[must_use]
    pub const fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom transform scale must be finite and > 0".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom transform translation must be finite".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Multiplies the scale factor, keeping translation (`t.scale(k)`).
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            k: self.k * factor,
            ..self
        }
    }

    /// Translates in unzoomed pixel units (`t.translate(tx, ty)`).
    #[must_use]
    pub fn translate(self, tx: f64, ty: f64) -> Self {
        Self {
            x: self.x + self.k * tx,
            y: self.y + self.k * ty,
            ..self
        }
    }

    #[must_use]
    pub fn y_scale(self, y_multiplier: f64) -> f64 {
        self.k * y_multiplier
    }

    #[must_use]
    pub fn apply_x(self, px: f64) -> f64 {
        px * self.k + self.x
    }

    #[must_use]
    pub fn invert_x(self, px: f64) -> f64 {
        (px - self.x) / self.k
    }

    #[must_use]
    pub fn apply_y(self, py: f64, y_multiplier: f64) -> f64 {
        py * self.y_scale(y_multiplier) + self.y
    }

    #[must_use]
    pub fn invert_y(self, py: f64, y_multiplier: f64) -> f64 {
        (py - self.y) / self.y_scale(y_multiplier)
    }

    /// Returns a transform that keeps `anchor` (displayed pixel) fixed while
    /// the horizontal scale becomes `k`.
    #[must_use]
    pub fn scaled_around_x(self, k: f64, anchor_x: f64) -> Self {
        let base = self.invert_x(anchor_x);
        Self {
            k,
            x: anchor_x - base * k,
            y: self.y,
        }
    }

    /// Two-axis variant of [`ZoomTransform::scaled_around_x`]; the vertical
    /// factor follows `k * y_multiplier`.
    #[must_use]
    pub fn scaled_around(self, k: f64, anchor_x: f64, anchor_y: f64, y_multiplier: f64) -> Self {
        let base_x = self.invert_x(anchor_x);
        let base_y = self.invert_y(anchor_y, y_multiplier);
        Self {
            k,
            x: anchor_x - base_x * k,
            y: anchor_y - base_y * k * y_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ZoomTransform;

    #[test]
    fn scale_then_translate_matches_brush_formula() {
        let t = ZoomTransform::IDENTITY.scale(4.0).translate(-100.0, 0.0);
        assert_eq!(t, ZoomTransform::new(4.0, -400.0, 0.0));
        assert_eq!(t.apply_x(100.0), 0.0);
        assert_eq!(t.apply_x(200.0), 400.0);
    }

    #[test]
    fn invert_is_inverse_of_apply() {
        let t = ZoomTransform::new(2.5, -120.0, 33.0);
        let px = 87.25;
        assert!((t.invert_x(t.apply_x(px)) - px).abs() <= 1e-12);
        assert!((t.invert_y(t.apply_y(px, 0.5), 0.5) - px).abs() <= 1e-12);
    }

    #[test]
    fn scaling_around_anchor_keeps_anchor_fixed() {
        let t = ZoomTransform::new(2.0, -50.0, 0.0);
        let anchor = 130.0;
        let before = t.invert_x(anchor);
        let zoomed = t.scaled_around_x(3.0, anchor);
        assert!((zoomed.invert_x(anchor) - before).abs() <= 1e-12);
        assert_eq!(zoomed.k, 3.0);
    }

    #[test]
    fn validate_rejects_non_positive_scale() {
        let err = ZoomTransform::new(0.0, 0.0, 0.0)
            .validate()
            .expect_err("zero scale must fail");
        assert!(format!("{err}").contains("scale"));
        assert!(ZoomTransform::new(1.0, f64::NAN, 0.0).validate().is_err());
    }
}
