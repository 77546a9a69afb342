//! Bounded sampling window for the end-of-gesture fling velocity.

use crate::gesture_constants::VELOCITY_WINDOW;
use crate::types::Velocity;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq)]
struct VelocitySample {
    x: f32,
    y: f32,
    time_ms: f64,
}

/// FIFO of the most recent position samples, consumed once at gesture end.
///
/// Velocity is derived from only the oldest and newest retained sample. That
/// smooths single-frame spikes from input jitter, trading a little
/// responsiveness for stability - acceptable because the result feeds a
/// one-shot fling decision, not per-frame physics.
#[derive(Debug, Clone, Default)]
pub struct VelocitySampler {
    samples: SmallVec<[VelocitySample; VELOCITY_WINDOW]>,
}

impl VelocitySampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, x: f32, y: f32, time_ms: f64) {
        self.samples.push(VelocitySample { x, y, time_ms });
        if self.samples.len() > VELOCITY_WINDOW {
            self.samples.remove(0);
        }
    }

    /// Computes the window's velocity in device-scaled pixels per millisecond
    /// and clears the window.
    ///
    /// With fewer than two samples there is nothing to derive; the window is
    /// left untouched and zero is returned. A zero or negative elapsed time
    /// (non-monotonic clock, collapsed samples) also yields zero rather than
    /// a division fault.
    pub fn take_velocity(&mut self, scale: f32) -> Velocity {
        if self.samples.len() < 2 {
            return Velocity::ZERO;
        }

        let first = self.samples[0];
        let last = self.samples[self.samples.len() - 1];
        self.samples.clear();

        let dt = last.time_ms - first.time_ms;
        if dt <= 0.0 {
            return Velocity::ZERO;
        }
        let dt = dt as f32;

        Velocity {
            x: (last.x - first.x) * scale / dt,
            y: (last.y - first.y) * scale / dt,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
