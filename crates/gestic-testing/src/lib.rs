//! Testing utilities and harness for Gestic.
//!
//! [`ScriptedHost`] stands in for a real input backend: tests construct a
//! compositor against it and feed synthetic pointer events deterministically,
//! with no display or input device. [`RecordingObserver`] captures delivered
//! lifecycle payloads in order for assertion.

use gestic::{
    GestureEnd, GestureMove, GestureObserver, GestureStart, InputEvent, InputHandler, InputHost,
    PointerEventKind, SubscriptionId,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Input source double that replays whatever the test script feeds it.
pub struct ScriptedHost {
    handlers: RefCell<Vec<(SubscriptionId, InputHandler)>>,
    next_subscription: Cell<u64>,
    device_pixel_ratio: Cell<f32>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            device_pixel_ratio: Cell::new(1.0),
        }
    }
}

impl ScriptedHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_device_pixel_ratio(&self, scale: f32) {
        self.device_pixel_ratio.set(scale);
    }

    /// Number of live subscriptions - lets tests assert `destroy()` released
    /// the compositor's handler.
    pub fn subscription_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Delivers an event to every subscribed handler, in subscription order.
    ///
    /// Handlers are cloned out first so a handler may subscribe or
    /// unsubscribe while the event is in flight.
    pub fn emit(&self, event: &InputEvent) {
        let handlers: Vec<InputHandler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    /// Emits a pointer-down and returns the event for suppression checks.
    pub fn down(&self, x: f32, y: f32, timestamp_ms: f64) -> InputEvent {
        let event = InputEvent::new(PointerEventKind::Down, x, y, timestamp_ms);
        self.emit(&event);
        event
    }

    /// Emits a pointer-move and returns the event for suppression checks.
    pub fn move_to(&self, x: f32, y: f32, timestamp_ms: f64) -> InputEvent {
        let event = InputEvent::new(PointerEventKind::Move, x, y, timestamp_ms);
        self.emit(&event);
        event
    }

    pub fn up(&self, x: f32, y: f32, timestamp_ms: f64) -> InputEvent {
        let event = InputEvent::new(PointerEventKind::Up, x, y, timestamp_ms);
        self.emit(&event);
        event
    }

    pub fn cancel(&self, x: f32, y: f32, timestamp_ms: f64) -> InputEvent {
        let event = InputEvent::new(PointerEventKind::Cancel, x, y, timestamp_ms);
        self.emit(&event);
        event
    }

    /// Scripts a full drag: down at `from`, `steps` evenly spaced moves, up
    /// at `to`, with timestamps spread evenly across `duration_ms`.
    pub fn drag(&self, from: (f32, f32), to: (f32, f32), start_ms: f64, duration_ms: f64, steps: usize) {
        let steps = steps.max(1);
        self.down(from.0, from.1, start_ms);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(
                from.0 + (to.0 - from.0) * t,
                from.1 + (to.1 - from.1) * t,
                start_ms + duration_ms * f64::from(t),
            );
        }
        self.up(to.0, to.1, start_ms + duration_ms);
    }
}

impl InputHost for ScriptedHost {
    fn subscribe(&self, handler: InputHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.handlers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio.get()
    }
}

/// One captured lifecycle callback, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedGesture {
    Start(GestureStart),
    Move(GestureMove),
    End(GestureEnd),
}

/// Observer that records every payload it receives.
#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<RecordedGesture>>,
}

impl RecordingObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<RecordedGesture> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn starts(&self) -> Vec<GestureStart> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::Start(gesture) => Some(gesture.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn moves(&self) -> Vec<GestureMove> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::Move(gesture) => Some(gesture.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn ends(&self) -> Vec<GestureEnd> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::End(gesture) => Some(gesture.clone()),
                _ => None,
            })
            .collect()
    }
}

impl GestureObserver for RecordingObserver {
    fn on_start(&self, gesture: &GestureStart) {
        self.events
            .borrow_mut()
            .push(RecordedGesture::Start(gesture.clone()));
    }

    fn on_move(&self, gesture: &GestureMove) {
        self.events
            .borrow_mut()
            .push(RecordedGesture::Move(gesture.clone()));
    }

    fn on_end(&self, gesture: &GestureEnd) {
        self.events
            .borrow_mut()
            .push(RecordedGesture::End(gesture.clone()));
    }
}
