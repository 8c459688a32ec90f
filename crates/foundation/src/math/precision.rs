//! Numeric policies shared by the mapping code.
//!
//! Positions end up as integer pixels, and the page script this pipeline
//! drives rounds the way `Math.round` does. These helpers keep that rounding
//! in one place and stop `-0.0` from leaking into outputs.

/// Canonicalize a floating-point value.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Round to the nearest integer, with halves rounded toward positive infinity.
///
/// `f64::round` sends `-2.5` to `-3`; pixel positions here must send it to `-2`.
/// `0.49999999999999994` rounds to `0`, matching `Math.round`; an inexact
/// `(v + 0.5).floor()` would give `1`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    let r = v.round();
    if v - r == 0.5 {
        canonical_f64(r + 1.0)
    } else {
        canonical_f64(r)
    }
}

/// [`round_half_up`] converted to a pixel count. Non-finite input maps to 0.
#[inline]
pub fn round_to_pixel(v: f64) -> i64 {
    if !v.is_finite() {
        return 0;
    }
    round_half_up(v) as i64
}
