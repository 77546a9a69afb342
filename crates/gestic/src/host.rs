//! Host environment boundary: raw pointer events and the input source
//! capability.
//!
//! The compositor never talks to a windowing system directly. A platform
//! integration implements [`InputHost`], unifies its mouse and touch streams
//! into [`InputEvent`]s (primary pointer / first touch point only), and the
//! compositor subscribes at construction. Tests substitute a scripted double.

use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

/// Raw pointer event kinds after the host has unified mouse and touch.
///
/// Hosts map mouse-down/touch-start to `Down`, mouse-move/touch-move to
/// `Move`, mouse-up/mouse-leave/touch-end to `Up`, and platform capture loss
/// to `Cancel`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer event delivered by the host.
///
/// Timestamps are monotonic high-resolution milliseconds from whatever origin
/// the host uses; only differences are meaningful. The default-handling flag
/// is shared across clones via `Rc<Cell>` so the host sees suppression
/// requested by any handler.
#[derive(Clone, Debug)]
pub struct InputEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: f64,
    default_prevented: Rc<Cell<bool>>,
}

impl InputEvent {
    pub fn new(kind: PointerEventKind, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self {
            kind,
            x,
            y,
            timestamp_ms,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    /// Asks the host to suppress its default handling of this event, so
    /// native scrolling or selection does not compete with the gesture.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Handler the compositor registers with the host.
pub type InputHandler = Rc<dyn Fn(&InputEvent)>;

/// Token identifying one subscription on an [`InputHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The injected input source capability.
pub trait InputHost {
    /// Registers a handler for every subsequent pointer event.
    fn subscribe(&self, handler: InputHandler) -> SubscriptionId;

    /// Releases a subscription. Unknown tokens are ignored.
    fn unsubscribe(&self, subscription: SubscriptionId);

    /// Current device pixel ratio, used to scale reported velocities.
    fn device_pixel_ratio(&self) -> f32 {
        1.0
    }
}

/// Millisecond monotonic clock for hosts without a native high-resolution
/// timestamp source. Works on native targets and WASM alike.
#[derive(Debug, Clone)]
pub struct HostClock {
    origin: Instant,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created.
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}
