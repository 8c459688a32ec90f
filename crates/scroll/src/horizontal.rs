use foundation::math::{FULL_TURN_DEG, Interval, round_half_up};
use orientation::{NormalizedSample, Pose};
use serde::{Deserialize, Serialize};

/// Normalized tilt band around upright where portrait heading readings are
/// unreliable. Both bounds are excluded.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GimbalBand {
    pub lower: f64,
    pub upper: f64,
}

impl Default for GimbalBand {
    fn default() -> Self {
        Self {
            lower: 85.0,
            upper: 95.0,
        }
    }
}

impl GimbalBand {
    pub fn contains(&self, tilt: f64) -> bool {
        Interval::new(self.lower, self.upper).contains_open(tilt)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HorizontalTarget {
    /// Keep the previous left offset.
    Hold,
    /// Unsmoothed left offset.
    Track(f64),
}

/// Horizontal target for a normalized sample.
///
/// Turning towards higher heading moves the view the same way, so content
/// slides left: heading `0` maps to the full pannable width and a full turn
/// maps back to `0`.
pub fn horizontal_target(
    normalized: &NormalizedSample,
    pose: Pose,
    band: &GimbalBand,
    horizontal_range: f64,
) -> HorizontalTarget {
    if pose == Pose::Portrait && band.contains(normalized.beta) {
        return HorizontalTarget::Hold;
    }
    if Interval::new(0.0, horizontal_range).is_degenerate() {
        return HorizontalTarget::Track(0.0);
    }
    let ratio = normalized.alpha / FULL_TURN_DEG;
    HorizontalTarget::Track(horizontal_range - round_half_up(horizontal_range * ratio))
}
