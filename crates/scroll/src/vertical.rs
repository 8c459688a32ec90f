use foundation::math::{Interval, QUARTER_TURN_DEG, map_range};
use orientation::{Pose, RawOrientationSample};
use serde::{Deserialize, Serialize};

/// The tilt arc, in normalized degrees, that spans the page from bottom
/// (`min_beta`) to top (`max_beta`).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltWindow {
    pub min_beta: f64,
    pub max_beta: f64,
}

impl Default for TiltWindow {
    fn default() -> Self {
        Self {
            min_beta: 50.0,
            max_beta: 150.0,
        }
    }
}

impl TiltWindow {
    /// Clamp normalized tilt into the window.
    ///
    /// Portrait clamps to the nearest edge. Sideways, the normalized tilt
    /// folds at the horizon, so the edge to lock to depends on which side of
    /// it the device is on, read from the raw sample:
    /// - above `max_beta`: lock to `min_beta` when the raw gamma sign says the
    ///   device is past the fold, else `max_beta`
    /// - below `min_beta`: lock to `max_beta` while `|beta| > 90` (above the
    ///   horizon), else `min_beta`
    pub fn clamp(&self, tilt: f64, raw: &RawOrientationSample, pose: Pose) -> f64 {
        let mut clamped = tilt;

        if clamped > self.max_beta {
            clamped = match pose {
                Pose::Portrait => self.max_beta,
                Pose::LandscapeClockwise if raw.gamma > 0.0 => self.min_beta,
                Pose::LandscapeCounterClockwise if raw.gamma < 0.0 => self.min_beta,
                _ => self.max_beta,
            };
        }

        if clamped < self.min_beta {
            clamped = match pose {
                Pose::Portrait => self.min_beta,
                _ if raw.beta.abs() > QUARTER_TURN_DEG => self.max_beta,
                _ => self.min_beta,
            };
        }

        clamped
    }
}

/// Unrounded scroll top for a clamped tilt: `min_beta` maps to the bottom of
/// the scrollable range and `max_beta` to `0`.
///
/// A page with no scrollable height always maps to `0`.
pub fn vertical_target(clamped_tilt: f64, window: &TiltWindow, vertical_range: f64) -> f64 {
    if Interval::new(0.0, vertical_range).is_degenerate() {
        return 0.0;
    }
    map_range(
        clamped_tilt,
        window.min_beta,
        window.max_beta,
        vertical_range,
        0.0,
    )
}
