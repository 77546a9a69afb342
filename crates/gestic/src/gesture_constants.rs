//! Shared gesture tuning constants.
//!
//! These values are in logical pixels. High-density screens are handled by
//! the device pixel ratio the host reports, which only affects the velocity
//! units, not the axis decision.

/// Axis decision dead zone in logical pixels.
///
/// While the absolute horizontal and vertical displacements from the anchor
/// differ by less than this, the motion is treated as ambiguous diagonal and
/// no axis is locked. A small value keeps the lock responsive; anything much
/// larger makes slow diagonal drags feel dead.
pub const AXIS_LOCK_SLOP: f32 = 2.0;

/// Number of position samples retained for the fling velocity estimate.
///
/// The sampler keeps a FIFO of this many recent samples and derives velocity
/// from the oldest and newest retained pair, which smooths out single-frame
/// spikes from input jitter.
pub const VELOCITY_WINDOW: usize = 5;

/// Human-readable prefix on every observation identifier.
pub(crate) const ID_PREFIX: &str = "obs-";

/// Combined width of the random run and the decimal counter in an identifier.
pub(crate) const ID_CODE_LENGTH: usize = 6;

/// Alphabet the random identifier run is drawn from.
pub(crate) const ID_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
