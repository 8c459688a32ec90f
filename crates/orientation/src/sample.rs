use serde::{Deserialize, Serialize};

/// One `deviceorientation` reading, in degrees.
///
/// - `alpha`: rotation about the vertical axis, `[0, 360)`
/// - `beta`: front-back tilt, `[-180, 180]`
/// - `gamma`: left-right tilt, `[-90, 90]`
///
/// Range validation is the sensor source's job; values are used as given.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrientationSample {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl RawOrientationSample {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Pose-corrected angles with the wrap-around discontinuities removed.
///
/// `alpha` stays in `[0, 360]`; `beta` is the tilt used for vertical
/// mapping, in `[0, 270]` for portrait and `[0, 180]` when sideways.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    pub alpha: f64,
    pub beta: f64,
}
