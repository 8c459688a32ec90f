/// A closed interval `[min, max]` on the real line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when the interval has zero or negative width.
    pub fn is_degenerate(&self) -> bool {
        !(self.span() > 0.0)
    }

    /// Strict containment, excluding both ends.
    pub fn contains_open(&self, v: f64) -> bool {
        v > self.min && v < self.max
    }
}

/// Map `value` linearly from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// Endpoints may be given in either order on the target side, so a reversed
/// target maps `from_min` to the larger value. A zero-width source interval
/// collapses to `to_min` instead of dividing by zero.
pub fn map_range(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let from_span = from_max - from_min;
    if from_span == 0.0 || !from_span.is_finite() {
        return to_min;
    }
    (value - from_min) * (to_max - to_min) / from_span + to_min
}
