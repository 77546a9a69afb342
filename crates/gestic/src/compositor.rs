//! The gesture compositor: host wiring, capture lifecycle, consumer surface.

use crate::host::{InputEvent, InputHandler, InputHost, PointerEventKind, SubscriptionId};
use crate::id::ObservationId;
use crate::registry::{ObservationConfig, ObservationRegistry};
use crate::session::{Emits, GestureSession};
use crate::types::Axis;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Listens to a host's raw pointer stream, infers one dominant motion axis
/// per gesture, and fans the gesture lifecycle out to the selected
/// observations.
///
/// All state lives on this instance; several compositors can coexist against
/// different hosts without shared globals. Single-threaded by construction
/// (`Rc`/`RefCell`): every event is processed to completion inside host
/// dispatch, in delivery order.
pub struct GestureCompositor {
    inner: Rc<RefCell<Inner>>,
    host: Rc<dyn InputHost>,
    subscription: Cell<Option<SubscriptionId>>,
}

struct Inner {
    registry: ObservationRegistry,
    session: Option<GestureSession>,
    scale: f32,
    destroyed: bool,
}

impl Inner {
    fn finish_session(&mut self) -> Emits {
        match self.session.take() {
            Some(session) => session.finish(self.scale),
            None => Emits::new(),
        }
    }
}

impl GestureCompositor {
    /// Builds a compositor and subscribes it to the host's pointer stream.
    pub fn new(host: Rc<dyn InputHost>) -> Self {
        let inner = Rc::new(RefCell::new(Inner {
            registry: ObservationRegistry::new(),
            session: None,
            scale: host.device_pixel_ratio(),
            destroyed: false,
        }));

        let handler: InputHandler = {
            let inner = Rc::clone(&inner);
            let host = Rc::clone(&host);
            Rc::new(move |event| dispatch(&inner, host.as_ref(), event))
        };
        let subscription = host.subscribe(handler);

        Self {
            inner,
            host,
            subscription: Cell::new(Some(subscription)),
        }
    }

    /// Registers an observation and returns its id. Always succeeds.
    pub fn observe(&self, config: ObservationConfig) -> ObservationId {
        self.inner.borrow_mut().registry.register(config)
    }

    /// Hides an observation from future selections without removing it.
    /// Returns whether the id existed.
    pub fn pause(&self, id: &ObservationId) -> bool {
        self.inner.borrow_mut().registry.pause(id)
    }

    /// Restores a paused observation's eligibility. Returns whether the id
    /// existed.
    pub fn resume(&self, id: &ObservationId) -> bool {
        self.inner.borrow_mut().registry.resume(id)
    }

    /// Removes an observation. Returns whether the id existed.
    ///
    /// A gesture in flight keeps its frozen selection snapshot, so a removed
    /// observation still receives move/end callbacks until that gesture
    /// finishes; the next gesture no longer sees it.
    pub fn unobserve(&self, id: &ObservationId) -> bool {
        self.inner.borrow_mut().registry.remove(id)
    }

    /// Whether a gesture session is currently in flight.
    pub fn is_capturing(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    /// The in-flight gesture's locked axis, if one has been decided.
    pub fn locked_axis(&self) -> Option<Axis> {
        self.inner.borrow().session.as_ref().and_then(|s| s.axis())
    }

    /// Number of registered observations, paused ones included.
    pub fn observation_count(&self) -> usize {
        self.inner.borrow().registry.len()
    }

    /// Programmatic end for the in-flight gesture, for hosts that detect
    /// pointer capture loss without a matching up/leave event. Delivers end
    /// callbacks exactly as a pointer-up would. No-op while idle.
    pub fn cancel(&self) {
        let emits = self.inner.borrow_mut().finish_session();
        for emit in &emits {
            emit.deliver();
        }
    }

    /// Tears the compositor down: finalizes any in-flight gesture, releases
    /// the host subscription, and ignores all further input. Safe to call
    /// repeatedly.
    pub fn destroy(&self) {
        if let Some(subscription) = self.subscription.take() {
            self.host.unsubscribe(subscription);
        }
        let emits = {
            let mut inner = self.inner.borrow_mut();
            inner.destroyed = true;
            inner.finish_session()
        };
        for emit in &emits {
            emit.deliver();
        }
    }
}

/// Processes one host event to completion.
///
/// State mutation happens under the `RefCell` borrow; the prepared emit batch
/// is delivered after the borrow is released, so observer callbacks may
/// re-enter the compositor (register, pause, unobserve) freely.
fn dispatch(inner: &Rc<RefCell<Inner>>, host: &dyn InputHost, event: &InputEvent) {
    let emits = {
        let mut inner = inner.borrow_mut();
        if inner.destroyed {
            return;
        }

        match event.kind {
            PointerEventKind::Down => {
                event.prevent_default();
                let mut emits = Emits::new();
                if inner.session.is_some() {
                    // The host never delivered an up/leave for the previous
                    // gesture; finalize it rather than capturing forever.
                    log::warn!("pointer down while capturing; finalizing stale gesture session");
                    emits = inner.finish_session();
                }
                inner.scale = host.device_pixel_ratio();
                inner.session = Some(GestureSession::begin(event.x, event.y, event.timestamp_ms));
                emits
            }
            PointerEventKind::Move => {
                event.prevent_default();
                let Inner {
                    registry, session, ..
                } = &mut *inner;
                match session.as_mut() {
                    Some(session) => {
                        session.track_move(event.x, event.y, event.timestamp_ms, registry)
                    }
                    None => Emits::new(),
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => inner.finish_session(),
        }
    };

    for emit in &emits {
        emit.deliver();
    }
}
