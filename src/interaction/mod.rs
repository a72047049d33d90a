//! Gesture input plumbing: state enums, the gesture recognizer and the
//! transition driver used for animated zoom changes.

mod recognizer;
mod transition;

pub use recognizer::{
    GestureKind, GestureRecognizer, ZoomPhase, ZoomSignal, ZoomSignals, wheel_zoom_factor,
};
pub use transition::{Transition, TransitionDriver, TransitionStep, ease_cubic_in_out};

use serde::{Deserialize, Serialize};

use crate::core::{Axis, BrushExtent};

/// Arbitration state of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A wheel, drag or pinch gesture is changing the transform.
    Zooming,
    /// Region selection with the modifier held.
    Brushing,
    /// A transition is gliding toward a target transform.
    Animating,
}

/// Origin of a transform change, carried through the commit path and
/// reported to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomSource {
    Wheel,
    Drag,
    Pinch,
    RegionSelect,
    Brush(Axis),
    Programmatic,
    Reset,
    Resize,
}

impl ZoomSource {
    /// Whether committing from this source writes the derived brush of `axis`.
    ///
    /// Brushes of non-zoomable axes are only rewritten by a reset or by their
    /// own brush; a brush never mirrors back into itself.
    #[must_use]
    pub fn mirrors_brush(self, axis: Axis, axis_zoomable: bool) -> bool {
        match self {
            Self::Brush(origin) => origin != axis && axis_zoomable,
            Self::Reset => true,
            Self::Resize => false,
            _ => axis_zoomable,
        }
    }

    #[must_use]
    pub fn is_gesture(self) -> bool {
        matches!(self, Self::Wheel | Self::Drag | Self::Pinch)
    }
}

impl From<GestureKind> for ZoomSource {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Wheel => Self::Wheel,
            GestureKind::Drag => Self::Drag,
            GestureKind::Pinch => Self::Pinch,
        }
    }
}

/// Where a brush event reported by the host came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushEventSource {
    /// The user dragged the brush.
    User,
    /// The brush widget echoed a programmatic move.
    Programmatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushPhase {
    Start,
    Brush,
    End,
}

/// Overview brush event forwarded by the host brush widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushEvent {
    pub axis: Axis,
    /// `None` when the widget cleared its selection.
    pub extent: Option<BrushExtent>,
    pub phase: BrushPhase,
    pub source: BrushEventSource,
}

impl BrushEvent {
    #[must_use]
    pub fn user(axis: Axis, extent: BrushExtent, phase: BrushPhase) -> Self {
        Self {
            axis,
            extent: Some(extent),
            phase,
            source: BrushEventSource::User,
        }
    }
}
