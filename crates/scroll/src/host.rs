use crate::geometry::Measurements;
use crate::pipeline::{DebugReadout, ScrollPosition};

/// Synchronous read of page and viewport dimensions.
pub trait GeometrySource {
    fn measure(&self) -> Measurements;
}

/// Receives pipeline output and activation side effects.
pub trait ScrollSink {
    fn apply(&mut self, position: ScrollPosition);

    fn mark_orientation_supported(&mut self) {}

    fn suppress_touch_scroll(&mut self) {}

    fn show_readout(&mut self, _readout: &DebugReadout) {}
}
