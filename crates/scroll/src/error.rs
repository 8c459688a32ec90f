use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tilt window must satisfy min_beta < max_beta (got {min_beta}..{max_beta})")]
    TiltWindow { min_beta: f64, max_beta: f64 },

    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("gimbal band lower bound {lower} exceeds upper bound {upper}")]
    GimbalBand { lower: f64, upper: f64 },

    #[error("{axis} dampening must be within [0, 1] (got {value})")]
    Dampening { axis: &'static str, value: f64 },

    #[error("{axis} movement limit must not be negative (got {value})")]
    MovementLimit { axis: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    NegativeDelay { field: &'static str, value: f64 },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
