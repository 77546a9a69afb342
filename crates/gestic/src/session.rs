//! Per-gesture capture session.
//!
//! A session is an explicit value owned by the compositor, created on pointer
//! down and consumed on release. It owns the axis decision, the re-anchored
//! deltas, the frozen selection snapshot, and the velocity window. Transition
//! methods never invoke observers directly; they return emit batches the
//! compositor delivers after releasing its internal borrow, so observer
//! callbacks can freely call back into the compositor.

use crate::gesture_constants::AXIS_LOCK_SLOP;
use crate::observer::GestureObserver;
use crate::registry::{ObservationRegistry, Selection};
use crate::types::{Axis, GestureEnd, GestureMove, GestureStart};
use crate::velocity_sampler::VelocitySampler;
use smallvec::SmallVec;
use std::rc::Rc;

/// One observer invocation, prepared under the compositor's borrow and
/// delivered outside it.
pub(crate) enum Emit {
    Start(Rc<dyn GestureObserver>, GestureStart),
    Move(Rc<dyn GestureObserver>, GestureMove),
    End(Rc<dyn GestureObserver>, GestureEnd),
}

impl Emit {
    pub(crate) fn deliver(&self) {
        match self {
            Emit::Start(observer, gesture) => observer.on_start(gesture),
            Emit::Move(observer, gesture) => observer.on_move(gesture),
            Emit::End(observer, gesture) => observer.on_end(gesture),
        }
    }
}

pub(crate) type Emits = SmallVec<[Emit; 4]>;

pub(crate) struct GestureSession {
    axis: Option<Axis>,
    start_x: f32,
    start_y: f32,
    last_x: f32,
    last_y: f32,
    dx: f32,
    dy: f32,
    started_at_ms: f64,
    last_event_ms: f64,
    selection: Selection,
    sampler: VelocitySampler,
}

impl GestureSession {
    /// Starts capturing at the anchor point, seeding the velocity window with
    /// one sample. No axis yet, no selection, no callbacks.
    pub(crate) fn begin(x: f32, y: f32, time_ms: f64) -> Self {
        let mut sampler = VelocitySampler::new();
        sampler.push(x, y, time_ms);
        Self {
            axis: None,
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
            dx: 0.0,
            dy: 0.0,
            started_at_ms: time_ms,
            last_event_ms: time_ms,
            selection: Selection::new(),
            sampler,
        }
    }

    pub(crate) fn axis(&self) -> Option<Axis> {
        self.axis
    }

    pub(crate) fn track_move(
        &mut self,
        x: f32,
        y: f32,
        time_ms: f64,
        registry: &ObservationRegistry,
    ) -> Emits {
        match self.axis {
            None => self.try_lock_axis(x, y, registry),
            Some(_) => self.track_locked_move(x, y, time_ms),
        }
    }

    /// First sufficient movement decides the axis, once per session.
    ///
    /// Displacements within [`AXIS_LOCK_SLOP`] of each other are ambiguous
    /// diagonal motion; the decision waits for more movement. On lock the
    /// anchor moves to the decision point, the selection snapshot is captured
    /// from the registry, and each selected observer gets its start payload.
    /// The locking move itself emits no move payload.
    fn try_lock_axis(&mut self, x: f32, y: f32, registry: &ObservationRegistry) -> Emits {
        let adx = (x - self.start_x).abs();
        let ady = (y - self.start_y).abs();
        if (adx - ady).abs() < AXIS_LOCK_SLOP {
            return Emits::new();
        }

        let axis = if adx >= ady {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        self.axis = Some(axis);
        self.start_x = x;
        self.start_y = y;
        self.last_x = x;
        self.last_y = y;
        self.dx = 0.0;
        self.dy = 0.0;
        self.selection = registry.select(axis);
        log::trace!(
            "axis locked {:?} at ({x}, {y}); {} observation(s) selected",
            axis,
            self.selection.len()
        );

        self.selection
            .iter()
            .map(|selected| {
                Emit::Start(
                    selected.observer.clone(),
                    GestureStart {
                        start_x: x,
                        start_y: y,
                        id: selected.id.clone(),
                    },
                )
            })
            .collect()
    }

    fn track_locked_move(&mut self, x: f32, y: f32, time_ms: f64) -> Emits {
        // One sample per move event, whether or not anyone is listening.
        self.sampler.push(x, y, time_ms);
        self.dx = x - self.start_x;
        self.dy = y - self.start_y;
        self.last_x = x;
        self.last_y = y;
        self.last_event_ms = time_ms;

        self.selection
            .iter()
            .map(|selected| {
                Emit::Move(
                    selected.observer.clone(),
                    GestureMove {
                        start_x: self.start_x,
                        start_y: self.start_y,
                        x,
                        y,
                        dx: self.dx,
                        dy: self.dy,
                        id: selected.id.clone(),
                    },
                )
            })
            .collect()
    }

    /// Finalizes the session, producing end payloads for the frozen
    /// selection. A session that never locked an axis has an empty selection
    /// and finishes silently.
    pub(crate) fn finish(mut self, scale: f32) -> Emits {
        let elapsed_ms = self.last_event_ms - self.started_at_ms;
        let velocity = self.sampler.take_velocity(scale);

        self.selection
            .iter()
            .map(|selected| {
                Emit::End(
                    selected.observer.clone(),
                    GestureEnd {
                        start_x: self.start_x,
                        start_y: self.start_y,
                        x: self.last_x,
                        y: self.last_y,
                        dx: self.dx,
                        dy: self.dy,
                        velocity,
                        elapsed_ms,
                        id: selected.id.clone(),
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ObservationConfig;
    use crate::types::AxisFilter;

    fn registry_with_one() -> ObservationRegistry {
        let mut registry = ObservationRegistry::new();
        registry.register(ObservationConfig::new());
        registry
    }

    #[test]
    fn diagonal_within_slop_defers_the_decision() {
        let registry = registry_with_one();
        let mut session = GestureSession::begin(100.0, 100.0, 0.0);

        let emits = session.track_move(101.0, 100.5, 5.0, &registry);
        assert!(emits.is_empty());
        assert_eq!(session.axis(), None);
    }

    #[test]
    fn dominant_horizontal_motion_locks_horizontal_and_reanchors() {
        let registry = registry_with_one();
        let mut session = GestureSession::begin(100.0, 100.0, 0.0);

        let emits = session.track_move(110.0, 100.0, 5.0, &registry);
        assert_eq!(session.axis(), Some(Axis::Horizontal));
        assert_eq!(emits.len(), 1);
        match &emits[0] {
            Emit::Start(_, gesture) => {
                assert_eq!(gesture.start_x, 110.0);
                assert_eq!(gesture.start_y, 100.0);
            }
            _ => panic!("expected a start emit"),
        }
    }

    #[test]
    fn dominant_vertical_motion_locks_vertical() {
        let registry = registry_with_one();
        let mut session = GestureSession::begin(100.0, 100.0, 0.0);

        session.track_move(100.0, 90.0, 5.0, &registry);
        assert_eq!(session.axis(), Some(Axis::Vertical));
    }

    #[test]
    fn axis_never_changes_after_lock() {
        let registry = registry_with_one();
        let mut session = GestureSession::begin(100.0, 100.0, 0.0);

        session.track_move(110.0, 100.0, 5.0, &registry);
        // Strongly vertical afterwards; lock must hold.
        session.track_move(110.0, 300.0, 10.0, &registry);
        assert_eq!(session.axis(), Some(Axis::Horizontal));
    }

    #[test]
    fn moves_report_deltas_from_the_decision_point() {
        let registry = registry_with_one();
        let mut session = GestureSession::begin(100.0, 100.0, 0.0);

        session.track_move(110.0, 100.0, 5.0, &registry);
        let emits = session.track_move(130.0, 101.0, 10.0, &registry);
        match &emits[0] {
            Emit::Move(_, gesture) => {
                assert_eq!(gesture.start_x, 110.0);
                assert_eq!(gesture.dx, 20.0);
                assert_eq!(gesture.dy, 1.0);
            }
            _ => panic!("expected a move emit"),
        }
    }

    #[test]
    fn selection_is_frozen_at_lock_time() {
        let mut registry = ObservationRegistry::new();
        let id = registry.register(ObservationConfig::new());
        let mut session = GestureSession::begin(0.0, 0.0, 0.0);

        session.track_move(10.0, 0.0, 5.0, &registry);
        assert!(registry.remove(&id));

        // Removed from the registry, still in the session snapshot.
        let emits = session.track_move(20.0, 0.0, 10.0, &registry);
        assert_eq!(emits.len(), 1);
        let ends = session.finish(1.0);
        assert_eq!(ends.len(), 1);
    }

    #[test]
    fn unlocked_session_finishes_silently() {
        let mut session = GestureSession::begin(0.0, 0.0, 0.0);
        let registry = registry_with_one();
        session.track_move(1.0, 0.5, 5.0, &registry);

        let emits = session.finish(1.0);
        assert!(emits.is_empty());
    }

    #[test]
    fn finish_reports_elapsed_time_and_final_position() {
        let registry = registry_with_one();
        let mut session = GestureSession::begin(100.0, 100.0, 1000.0);

        session.track_move(110.0, 100.0, 1050.0, &registry);
        session.track_move(130.0, 100.0, 1200.0, &registry);
        let emits = session.finish(1.0);
        match &emits[0] {
            Emit::End(_, gesture) => {
                assert_eq!(gesture.x, 130.0);
                assert_eq!(gesture.dx, 20.0);
                assert_eq!(gesture.elapsed_ms, 200.0);
            }
            _ => panic!("expected an end emit"),
        }
    }

    #[test]
    fn direction_mismatch_locks_axis_but_selects_nothing() {
        let mut registry = ObservationRegistry::new();
        registry.register(ObservationConfig::new().with_direction(AxisFilter::Vertical));
        let mut session = GestureSession::begin(0.0, 0.0, 0.0);

        let emits = session.track_move(15.0, 0.0, 5.0, &registry);
        assert_eq!(session.axis(), Some(Axis::Horizontal));
        assert!(emits.is_empty());
        assert!(session.track_move(30.0, 0.0, 10.0, &registry).is_empty());
        assert!(session.finish(1.0).is_empty());
    }
}
