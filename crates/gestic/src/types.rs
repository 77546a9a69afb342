//! Gesture axis types and the payloads delivered to observers.

use crate::id::ObservationId;

/// The dominant motion axis locked for a gesture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which locked axis an observation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisFilter {
    Horizontal,
    Vertical,
    #[default]
    Either,
}

impl AxisFilter {
    /// Whether a gesture locked to `axis` should reach this observation.
    pub fn admits(self, axis: Axis) -> bool {
        match self {
            AxisFilter::Either => true,
            AxisFilter::Horizontal => axis == Axis::Horizontal,
            AxisFilter::Vertical => axis == Axis::Vertical,
        }
    }
}

/// End-of-gesture velocity estimate in device-scaled pixels per millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// Delivered once per selected observation when the axis locks.
///
/// `start_x`/`start_y` are the re-anchored coordinates of the decision point;
/// subsequent move/end deltas are measured from here, not from the original
/// touch point.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureStart {
    pub start_x: f32,
    pub start_y: f32,
    pub id: ObservationId,
}

/// Delivered once per selected observation for every move after axis lock.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureMove {
    pub start_x: f32,
    pub start_y: f32,
    pub x: f32,
    pub y: f32,
    /// Cumulative offset from the re-anchored start point.
    pub dx: f32,
    pub dy: f32,
    pub id: ObservationId,
}

/// Delivered once per selected observation when the gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEnd {
    pub start_x: f32,
    pub start_y: f32,
    /// Final tracked position.
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    /// Fling velocity over the retained sample window.
    pub velocity: Velocity,
    /// Time between the last tracked move and the gesture start.
    pub elapsed_ms: f64,
    pub id: ObservationId,
}
