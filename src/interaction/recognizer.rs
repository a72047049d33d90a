use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::ZoomTransform;
use crate::error::{ChartError, ChartResult};

const WHEEL_STEP_UNITS: f64 = 120.0;

/// Converts a wheel delta into a multiplicative zoom factor.
///
/// One notch (`120` units) zooms by `1 + zoom_step_ratio`; negative deltas
/// zoom in. Returns `None` for a zero delta.
pub fn wheel_zoom_factor(wheel_delta_y: f64, zoom_step_ratio: f64) -> ChartResult<Option<f64>> {
    if !wheel_delta_y.is_finite() {
        return Err(ChartError::InvalidData(
            "wheel delta must be finite".to_owned(),
        ));
    }
    if !zoom_step_ratio.is_finite() || zoom_step_ratio <= 0.0 {
        return Err(ChartError::InvalidData(
            "zoom step ratio must be finite and > 0".to_owned(),
        ));
    }
    if wheel_delta_y == 0.0 {
        return Ok(None);
    }

    let normalized_steps = wheel_delta_y / WHEEL_STEP_UNITS;
    let factor = (1.0 + zoom_step_ratio).powf(-normalized_steps);
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ChartError::InvalidData(
            "computed wheel zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(Some(factor))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Wheel,
    Drag,
    Pinch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPhase {
    Start,
    Zoom,
    End,
}

/// Zoom notification produced by the recognizer.
///
/// `source` is `None` for signals caused by [`GestureRecognizer::set_transform`],
/// i.e. by the engine itself rather than by user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSignal {
    pub phase: ZoomPhase,
    pub transform: ZoomTransform,
    pub y_multiplier: f64,
    pub source: Option<GestureKind>,
}

pub type ZoomSignals = SmallVec<[ZoomSignal; 3]>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer_x: f64,
    pointer_y: f64,
    transform: ZoomTransform,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchAnchor {
    transform: ZoomTransform,
}

/// Raw gesture tracker bound to one chart's plot area.
///
/// It owns a copy of the transform it proposes changes to; the engine pushes
/// every committed transform back so the next gesture step starts from it.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    transform: ZoomTransform,
    y_multiplier: f64,
    scale_extent: (f64, f64),
    zoom_step_ratio: f64,
    drag: Option<DragAnchor>,
    pinch: Option<PinchAnchor>,
    generation: u64,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(scale_extent: (f64, f64), zoom_step_ratio: f64) -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            y_multiplier: 1.0,
            scale_extent,
            zoom_step_ratio,
            drag: None,
            pinch: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    #[must_use]
    pub fn y_multiplier(&self) -> f64 {
        self.y_multiplier
    }

    /// Number of times the bindings were torn down and rebuilt.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Drops every in-progress gesture and starts a new binding generation.
    pub fn rebind(&mut self, scale_extent: (f64, f64), zoom_step_ratio: f64) {
        self.cancel_gestures();
        self.scale_extent = scale_extent;
        self.zoom_step_ratio = zoom_step_ratio;
        self.generation += 1;
    }

    /// Drops in-progress drag/pinch anchors without emitting an end signal.
    pub fn cancel_gestures(&mut self) {
        self.drag = None;
        self.pinch = None;
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.scale_extent.0, self.scale_extent.1)
    }

    /// Programmatic transform update; emits a synthetic start/zoom/end triple.
    pub fn set_transform(&mut self, transform: ZoomTransform, y_multiplier: f64) -> ZoomSignals {
        self.transform = transform;
        self.y_multiplier = y_multiplier;
        [ZoomPhase::Start, ZoomPhase::Zoom, ZoomPhase::End]
            .into_iter()
            .map(|phase| ZoomSignal {
                phase,
                transform,
                y_multiplier,
                source: None,
            })
            .collect()
    }

    fn signal(&self, phase: ZoomPhase, kind: GestureKind) -> ZoomSignal {
        ZoomSignal {
            phase,
            transform: self.transform,
            y_multiplier: self.y_multiplier,
            source: Some(kind),
        }
    }

    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) -> ChartResult<ZoomSignals> {
        let Some(factor) = wheel_zoom_factor(delta_y, self.zoom_step_ratio)? else {
            return Ok(SmallVec::new());
        };
        let k = self.clamp_scale(self.transform.k * factor);
        self.transform = self.transform.scaled_around(k, x, y, self.y_multiplier);
        Ok(smallvec![self.signal(ZoomPhase::Zoom, GestureKind::Wheel)])
    }

    pub fn drag_start(&mut self, x: f64, y: f64) -> ZoomSignals {
        self.drag = Some(DragAnchor {
            pointer_x: x,
            pointer_y: y,
            transform: self.transform,
        });
        smallvec![self.signal(ZoomPhase::Start, GestureKind::Drag)]
    }

    pub fn drag_move(&mut self, x: f64, y: f64) -> ZoomSignals {
        let Some(anchor) = self.drag else {
            return SmallVec::new();
        };
        self.transform = ZoomTransform {
            k: anchor.transform.k,
            x: anchor.transform.x + (x - anchor.pointer_x),
            y: anchor.transform.y + (y - anchor.pointer_y),
        };
        smallvec![self.signal(ZoomPhase::Zoom, GestureKind::Drag)]
    }

    pub fn drag_end(&mut self) -> ZoomSignals {
        if self.drag.take().is_none() {
            return SmallVec::new();
        }
        smallvec![self.signal(ZoomPhase::End, GestureKind::Drag)]
    }

    pub fn pinch_start(&mut self) -> ZoomSignals {
        self.drag = None;
        self.pinch = Some(PinchAnchor {
            transform: self.transform,
        });
        smallvec![self.signal(ZoomPhase::Start, GestureKind::Pinch)]
    }

    /// `scale_factor` is relative to the finger distance at pinch start.
    pub fn pinch_update(&mut self, scale_factor: f64, center_x: f64, center_y: f64) -> ChartResult<ZoomSignals> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "pinch zoom factor must be finite and > 0".to_owned(),
            ));
        }
        let Some(anchor) = self.pinch else {
            return Ok(SmallVec::new());
        };
        let k = self.clamp_scale(anchor.transform.k * scale_factor);
        self.transform = self
            .transform
            .scaled_around(k, center_x, center_y, self.y_multiplier);
        Ok(smallvec![self.signal(ZoomPhase::Zoom, GestureKind::Pinch)])
    }

    pub fn pinch_end(&mut self) -> ZoomSignals {
        if self.pinch.take().is_none() {
            return SmallVec::new();
        }
        smallvec![self.signal(ZoomPhase::End, GestureKind::Pinch)]
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureKind, GestureRecognizer, ZoomPhase, wheel_zoom_factor};
    use crate::core::ZoomTransform;

    #[test]
    fn zero_wheel_delta_returns_none() {
        let factor = wheel_zoom_factor(0.0, 0.1).expect("factor");
        assert!(factor.is_none());
    }

    #[test]
    fn negative_wheel_delta_produces_zoom_in_factor() {
        let factor = wheel_zoom_factor(-120.0, 0.2)
            .expect("factor")
            .expect("some");
        assert!((factor - 1.2).abs() <= 1e-12);
    }

    #[test]
    fn wheel_rejects_invalid_inputs() {
        assert!(wheel_zoom_factor(f64::NAN, 0.2).is_err());
        assert!(wheel_zoom_factor(-120.0, 0.0).is_err());
    }

    #[test]
    fn wheel_zoom_respects_scale_extent() {
        let mut recognizer = GestureRecognizer::new((1.0, 2.0), 1.0);
        recognizer.wheel(-360.0, 100.0, 0.0).expect("wheel");
        assert_eq!(recognizer.transform().k, 2.0);

        recognizer.wheel(1200.0, 100.0, 0.0).expect("wheel");
        assert_eq!(recognizer.transform().k, 1.0);
    }

    #[test]
    fn drag_pans_relative_to_start_transform() {
        let mut recognizer = GestureRecognizer::new((1.0, f64::INFINITY), 0.2);
        recognizer.set_transform(ZoomTransform::new(2.0, -100.0, 0.0), 1.0);
        recognizer.drag_start(50.0, 50.0);
        recognizer.drag_move(60.0, 50.0);
        let signals = recognizer.drag_move(80.0, 40.0);
        assert_eq!(signals[0].transform, ZoomTransform::new(2.0, -70.0, -10.0));
        assert_eq!(signals[0].source, Some(GestureKind::Drag));

        let end = recognizer.drag_end();
        assert_eq!(end[0].phase, ZoomPhase::End);
        assert!(recognizer.drag_end().is_empty());
    }

    #[test]
    fn programmatic_set_emits_synthetic_triple() {
        let mut recognizer = GestureRecognizer::new((1.0, f64::INFINITY), 0.2);
        let signals = recognizer.set_transform(ZoomTransform::new(3.0, 0.0, 0.0), 1.0);
        assert_eq!(signals.len(), 3);
        assert!(signals.iter().all(|signal| signal.source.is_none()));
    }

    #[test]
    fn rebind_drops_in_progress_drag() {
        let mut recognizer = GestureRecognizer::new((1.0, f64::INFINITY), 0.2);
        recognizer.drag_start(0.0, 0.0);
        recognizer.rebind((1.0, f64::INFINITY), 0.2);
        assert!(!recognizer.is_dragging());
        assert_eq!(recognizer.generation(), 1);
        assert!(recognizer.drag_move(10.0, 0.0).is_empty());
    }
}
