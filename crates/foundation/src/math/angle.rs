//! Degree constants and the two half-turn corrections used when a device is
//! held sideways.

pub const FULL_TURN_DEG: f64 = 360.0;
pub const HALF_TURN_DEG: f64 = 180.0;
pub const QUARTER_TURN_DEG: f64 = 90.0;

/// Add half a turn, folding back by a full turn only when the sum exceeds
/// [`FULL_TURN_DEG`]. A sum of exactly 360 is kept as-is.
pub fn add_half_turn(deg: f64) -> f64 {
    let turned = deg + HALF_TURN_DEG;
    if turned > FULL_TURN_DEG {
        turned - FULL_TURN_DEG
    } else {
        turned
    }
}

/// Subtract half a turn, adding a full turn back when the result is negative.
pub fn sub_half_turn(deg: f64) -> f64 {
    let turned = deg - HALF_TURN_DEG;
    if turned < 0.0 { turned + FULL_TURN_DEG } else { turned }
}
