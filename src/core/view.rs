use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartId;

/// Visible part of one axis, derived from the zoomed scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisView {
    Continuous {
        min: f64,
        max: f64,
    },
    /// First and last band keys intersecting the plot area.
    Ordinal {
        first_index: usize,
        last_index: usize,
        first: String,
        last: String,
    },
}

impl AxisView {
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Self::Continuous { min, max } => Some((*min, *max)),
            Self::Ordinal { .. } => None,
        }
    }
}

/// What the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub x: AxisView,
    /// Present for two-dimensional layouts only.
    pub y: Option<AxisView>,
}

/// Domain-space bounds imposed on a chart by `set_view`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub x: (f64, f64),
    pub y: Option<(f64, f64)>,
}

impl ViewRequest {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            x: (min, max),
            y: None,
        }
    }

    #[must_use]
    pub fn with_y(mut self, min: f64, max: f64) -> Self {
        self.y = Some((min, max));
        self
    }

    /// Request reproducing `view`; `None` when the X axis is ordinal.
    #[must_use]
    pub fn from_view(view: &View) -> Option<Self> {
        Some(Self {
            x: view.x.bounds()?,
            y: view.y.as_ref().and_then(AxisView::bounds),
        })
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_bounds("x", self.x)?;
        if let Some(y) = self.y {
            validate_bounds("y", y)?;
        }
        Ok(self)
    }
}

fn validate_bounds(axis: &str, (min, max): (f64, f64)) -> ChartResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidView(format!(
            "{axis} view bounds must be finite"
        )));
    }
    if min == max {
        return Err(ChartError::InvalidView(format!(
            "{axis} view bounds must span a non-empty range"
        )));
    }
    Ok(())
}

/// Notification delivered once a gesture or transition settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewChange {
    pub chart: ChartId,
    pub view: View,
    pub caused_by_user: bool,
}

#[cfg(test)]
mod tests {
    use super::{AxisView, View, ViewRequest};

    #[test]
    fn validate_rejects_non_finite_and_degenerate_bounds() {
        assert!(ViewRequest::new(f64::NAN, 1.0).validate().is_err());
        assert!(ViewRequest::new(1.0, 1.0).validate().is_err());
        assert!(
            ViewRequest::new(0.0, 1.0)
                .with_y(2.0, f64::INFINITY)
                .validate()
                .is_err()
        );
        assert!(ViewRequest::new(1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn ordinal_views_cannot_be_replayed() {
        let view = View {
            x: AxisView::Ordinal {
                first_index: 0,
                last_index: 2,
                first: "a".to_owned(),
                last: "c".to_owned(),
            },
            y: None,
        };
        assert!(ViewRequest::from_view(&view).is_none());

        let view = View {
            x: AxisView::Continuous {
                min: 10.0,
                max: 20.0,
            },
            y: Some(AxisView::Continuous { min: 0.0, max: 1.0 }),
        };
        assert_eq!(
            ViewRequest::from_view(&view),
            Some(ViewRequest::new(10.0, 20.0).with_y(0.0, 1.0))
        );
    }
}
