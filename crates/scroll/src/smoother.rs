use serde::{Deserialize, Serialize};

/// Jump damping for one scroll axis.
///
/// A move larger than `movement_limit` pixels from the last position only
/// lets `1 - dampening` of the jump through. `dampening` near `1` gives slow
/// catch-up; near `0`, almost none.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSmoothing {
    pub movement_limit: f64,
    pub dampening: f64,
}

impl AxisSmoothing {
    pub const TOP: AxisSmoothing = AxisSmoothing {
        movement_limit: 5.0,
        dampening: 0.9,
    };

    pub const LEFT: AxisSmoothing = AxisSmoothing {
        movement_limit: 10.0,
        dampening: 0.8,
    };

    /// Smooth `target` against `last`. With no previous value the target
    /// passes through unchanged. The result is not rounded.
    pub fn apply(&self, last: Option<i64>, target: f64) -> f64 {
        let Some(last) = last else {
            return target;
        };
        let last = last as f64;

        if target > last && target - self.movement_limit > last {
            target - (target - last) * self.dampening
        } else if target < last && target + self.movement_limit < last {
            target + (last - target) * self.dampening
        } else {
            target
        }
    }
}
