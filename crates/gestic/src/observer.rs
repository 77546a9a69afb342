//! Observer capability interface and a closure-backed adapter.

use crate::types::{GestureEnd, GestureMove, GestureStart};
use std::rc::Rc;

/// Lifecycle callbacks a registrant supplies with an observation.
///
/// Every method defaults to a no-op, so implementations only override what
/// they care about. Observers take `&self`; stateful ones use interior
/// mutability, since callbacks run synchronously during host event dispatch.
pub trait GestureObserver {
    fn on_start(&self, _gesture: &GestureStart) {}
    fn on_move(&self, _gesture: &GestureMove) {}
    fn on_end(&self, _gesture: &GestureEnd) {}
}

/// Observer that ignores every callback. The registration default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GestureObserver for NoopObserver {}

type StartFn = Rc<dyn Fn(&GestureStart)>;
type MoveFn = Rc<dyn Fn(&GestureMove)>;
type EndFn = Rc<dyn Fn(&GestureEnd)>;

/// Closure-backed observer for call sites that only want plain callbacks.
///
/// ```
/// use gestic::GestureCallbacks;
///
/// let observer = GestureCallbacks::new()
///     .with_move(|gesture| println!("dx={}", gesture.dx))
///     .with_end(|gesture| println!("fling {:?}", gesture.velocity));
/// ```
#[derive(Clone, Default)]
pub struct GestureCallbacks {
    start: Option<StartFn>,
    movement: Option<MoveFn>,
    end: Option<EndFn>,
}

impl GestureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, callback: impl Fn(&GestureStart) + 'static) -> Self {
        self.start = Some(Rc::new(callback));
        self
    }

    pub fn with_move(mut self, callback: impl Fn(&GestureMove) + 'static) -> Self {
        self.movement = Some(Rc::new(callback));
        self
    }

    pub fn with_end(mut self, callback: impl Fn(&GestureEnd) + 'static) -> Self {
        self.end = Some(Rc::new(callback));
        self
    }
}

impl GestureObserver for GestureCallbacks {
    fn on_start(&self, gesture: &GestureStart) {
        if let Some(callback) = &self.start {
            callback(gesture);
        }
    }

    fn on_move(&self, gesture: &GestureMove) {
        if let Some(callback) = &self.movement {
            callback(gesture);
        }
    }

    fn on_end(&self, gesture: &GestureEnd) {
        if let Some(callback) = &self.end {
            callback(gesture);
        }
    }
}
