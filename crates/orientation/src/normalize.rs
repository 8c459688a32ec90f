//! Angle normalization.
//!
//! Front-back tilt (`beta`) wraps from `180` to `-180` halfway through a
//! forward roll, and when the phone is held sideways the tilt we care about is
//! reported on the `gamma` axis instead, folded into `[-90, 90]`. The functions
//! here unfold both into ranges that increase steadily as the device tips from
//! face-down towards face-up, and correct `alpha` for the half-turn it gains or
//! loses when a sideways device crosses the horizon.

use foundation::math::{FULL_TURN_DEG, HALF_TURN_DEG, QUARTER_TURN_DEG, add_half_turn, sub_half_turn};
use tracing::trace;

use crate::classifier::{DeviceOrientationState, Pose};
use crate::sample::{NormalizedSample, RawOrientationSample};

/// Portrait tilt values above this are folded to zero.
pub const PORTRAIT_BETA_FOLD_DEG: f64 = FULL_TURN_DEG - QUARTER_TURN_DEG;

/// Rotated clockwise, a device above the horizon reports alpha half a turn
/// short of the same heading below it.
pub fn normalize_alpha_clockwise(alpha: f64, gamma: f64) -> f64 {
    if gamma < 0.0 { add_half_turn(alpha) } else { alpha }
}

/// Rotated counter-clockwise, a device above the horizon reports alpha half a
/// turn beyond the same heading below it.
pub fn normalize_alpha_counter_clockwise(alpha: f64, gamma: f64) -> f64 {
    if gamma > 0.0 { sub_half_turn(alpha) } else { alpha }
}

/// Unfold portrait tilt from `[-180, 180]` onto `[0, 270]`.
///
/// | raw  | pose                      | result |
/// |------|---------------------------|--------|
/// | 0    | face up                   | 0      |
/// | 90   | upright                   | 90     |
/// | 179  | almost face down          | 179    |
/// | -179 | almost face down inverted | 181    |
/// | -90  | upright inverted          | 270    |
/// | -1   | almost face up inverted   | 0      |
///
/// The `(270, 360)` arc is not reachable in handheld use; it folds to `0`
/// rather than showing up as a spike near `360`.
pub fn normalize_beta(beta: f64) -> f64 {
    let unfolded = if beta < 0.0 { FULL_TURN_DEG + beta } else { beta };
    if unfolded > PORTRAIT_BETA_FOLD_DEG {
        0.0
    } else {
        unfolded
    }
}

/// Sideways tilt for a clockwise rotation, unfolded from `[-90, 90]` onto `[0, 180]`.
///
/// Below the horizon gamma runs from `-90` near the horizon up to `0` face up;
/// above it, from `90` near the horizon down to `0` face down.
///
/// | raw | result |
/// |-----|--------|
/// | -1  | 179    |
/// | -89 | 91     |
/// | 89  | 89     |
/// | 1   | 1      |
pub fn normalize_gamma_clockwise(gamma: f64) -> f64 {
    if gamma < 0.0 {
        HALF_TURN_DEG - gamma.abs()
    } else {
        gamma
    }
}

/// Sideways tilt for a counter-clockwise rotation; the mirror image of
/// [`normalize_gamma_clockwise`].
///
/// | raw | result |
/// |-----|--------|
/// | 1   | 179    |
/// | 89  | 91     |
/// | -89 | 89     |
/// | -1  | 1      |
pub fn normalize_gamma_counter_clockwise(gamma: f64) -> f64 {
    if gamma > 0.0 {
        HALF_TURN_DEG - gamma
    } else if gamma < 0.0 {
        gamma.abs()
    } else {
        gamma
    }
}

/// Pose-corrected heading.
pub fn normalize_alpha(sample: &RawOrientationSample, pose: Pose) -> f64 {
    match pose {
        Pose::Portrait => sample.alpha,
        Pose::LandscapeClockwise => normalize_alpha_clockwise(sample.alpha, sample.gamma),
        Pose::LandscapeCounterClockwise => {
            normalize_alpha_counter_clockwise(sample.alpha, sample.gamma)
        }
    }
}

/// Pose-corrected tilt used for vertical mapping.
pub fn normalize_tilt(sample: &RawOrientationSample, pose: Pose) -> f64 {
    match pose {
        Pose::Portrait => normalize_beta(sample.beta),
        Pose::LandscapeClockwise => normalize_gamma_clockwise(sample.gamma),
        Pose::LandscapeCounterClockwise => normalize_gamma_counter_clockwise(sample.gamma),
    }
}

pub fn normalize(sample: &RawOrientationSample, state: &DeviceOrientationState) -> NormalizedSample {
    let pose = state.pose();
    let normalized = NormalizedSample {
        alpha: normalize_alpha(sample, pose),
        beta: normalize_tilt(sample, pose),
    };
    trace!(
        ?pose,
        alpha = normalized.alpha,
        beta = normalized.beta,
        "normalized sample"
    );
    normalized
}
