//! Axis-locking pointer/touch gesture compositor.
//!
//! Consumes a host-provided stream of raw pointer events (mouse and touch
//! unified), infers a single dominant motion axis per gesture, and fans the
//! gesture lifecycle (start/move/end) out to registered observations -
//! selecting at most one priority tier per axis, so a horizontal carousel and
//! a vertical scroller never both react to the same drag.
//!
//! ```no_run
//! use gestic::{
//!     AxisFilter, GestureCallbacks, GestureCompositor, InputHost, ObservationConfig,
//! };
//! use std::rc::Rc;
//!
//! fn wire(host: Rc<dyn InputHost>) {
//!     let compositor = GestureCompositor::new(host);
//!     let id = compositor.observe(
//!         ObservationConfig::new()
//!             .with_direction(AxisFilter::Horizontal)
//!             .with_observer(Rc::new(
//!                 GestureCallbacks::new().with_move(|gesture| {
//!                     // scroll the carousel by gesture.dx
//!                     let _ = gesture.dx;
//!                 }),
//!             )),
//!     );
//!     // ...
//!     compositor.unobserve(&id);
//!     compositor.destroy();
//! }
//! ```

pub mod compositor;
pub mod gesture_constants;
pub mod host;
pub(crate) mod id;
pub mod observer;
pub mod registry;
pub(crate) mod session;
pub mod types;
pub mod velocity_sampler;

pub use compositor::GestureCompositor;
pub use host::{HostClock, InputEvent, InputHandler, InputHost, PointerEventKind, SubscriptionId};
pub use id::ObservationId;
pub use observer::{GestureCallbacks, GestureObserver, NoopObserver};
pub use registry::ObservationConfig;
pub use types::{Axis, AxisFilter, GestureEnd, GestureMove, GestureStart, Velocity};
pub use velocity_sampler::VelocitySampler;
