use serde::{Deserialize, Serialize};

/// Host-supplied timestamp in milliseconds.
///
/// Nothing in the workspace reads a wall clock; callers pass `Time` in so
/// timer behavior stays deterministic and replayable.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_ms(ms: f64) -> Self {
        Time(ms)
    }

    pub fn as_ms(self) -> f64 {
        self.0
    }

    /// The instant `delay_ms` after `self`. Negative delays are treated as zero.
    pub fn after(self, delay_ms: f64) -> Self {
        Time(self.0 + delay_ms.max(0.0))
    }

    /// Milliseconds from `self` until `later`, never negative.
    pub fn until(self, later: Time) -> f64 {
        (later.0 - self.0).max(0.0)
    }
}
