//=========================================================================
// Camera Shake
//
// Time-bounded random jitter applied to the whole draw pass.
//
// Lifecycle:
//   start(intensity, duration) → advance(dt) each tick → offset() in draw
//
// The offset is {0,0} whenever no shake is active. The tick on which the
// remaining time reaches zero resets the offset in the same call, so a
// stale jitter never survives into the next draw.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;

//=== Defaults ============================================================

pub const DEFAULT_SHAKE_INTENSITY: f32 = 5.0;
pub const DEFAULT_SHAKE_DURATION: f64 = 0.5;

//=== Shake ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shake {
    remaining: f64,
    intensity: f32,
    offset: (f32, f32),
}

impl Shake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any in-progress shake. Requests never stack.
    pub fn start(&mut self, intensity: f32, duration: f64) {
        debug!(target: "session", "Shake started (intensity: {}, duration: {}s)", intensity, duration);
        self.intensity = intensity;
        self.remaining = duration;
        if !self.is_active() {
            self.offset = (0.0, 0.0);
        }
    }

    /// Advances the shake by `dt` seconds and resamples the offset.
    ///
    /// Each axis is drawn independently from `[-intensity/2, intensity/2]`.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) {
        if !self.is_active() {
            self.offset = (0.0, 0.0);
            return;
        }

        self.remaining -= dt;
        self.offset = if self.is_active() {
            (
                (rng.gen::<f32>() - 0.5) * self.intensity,
                (rng.gen::<f32>() - 0.5) * self.intensity,
            )
        } else {
            (0.0, 0.0)
        };
    }

    //--- Queries ----------------------------------------------------------

    /// NaN durations count as finished.
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Seconds of shake left (zero or negative once finished).
    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
