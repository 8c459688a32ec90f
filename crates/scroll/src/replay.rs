//! Offline replay of recorded page sessions.
//!
//! A trace is the initial page measurements plus a time-ordered list of host
//! events. Replaying drives a [`TiltController`] exactly as a page would,
//! firing due timers before each event.

use foundation::time::Time;
use orientation::RawOrientationSample;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::controller::TiltController;
use crate::geometry::Measurements;
use crate::host::{GeometrySource, ScrollSink};
use crate::pipeline::{DebugReadout, ScrollPosition};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("invalid trace json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event {index} at {at_ms}ms is earlier than the previous event at {previous_ms}ms")]
    OutOfOrder {
        index: usize,
        at_ms: f64,
        previous_ms: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    Sample(RawOrientationSample),
    Resize,
    OrientationChange,
    /// From now on the page reports these measurements.
    Measure(Measurements),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub at_ms: f64,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub measurements: Measurements,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

impl Trace {
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        let trace: Trace = serde_json::from_str(json)?;
        let mut previous_ms = f64::NEG_INFINITY;
        for (index, event) in trace.events.iter().enumerate() {
            if event.at_ms < previous_ms {
                return Err(ReplayError::OutOfOrder {
                    index,
                    at_ms: event.at_ms,
                    previous_ms,
                });
            }
            previous_ms = event.at_ms;
        }
        Ok(trace)
    }
}

/// One processed sample in replay output.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub at_ms: f64,
    pub top: i64,
    pub left: i64,
    pub readout: DebugReadout,
}

/// Geometry source that reports whatever it was last told.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeometry {
    pub measurements: Measurements,
}

impl GeometrySource for FixedGeometry {
    fn measure(&self) -> Measurements {
        self.measurements
    }
}

/// Sink that keeps everything it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub applied: Vec<ScrollPosition>,
    pub orientation_supported: bool,
    pub touch_scroll_suppressed: bool,
}

impl ScrollSink for RecordingSink {
    fn apply(&mut self, position: ScrollPosition) {
        self.applied.push(position);
    }

    fn mark_orientation_supported(&mut self) {
        self.orientation_supported = true;
    }

    fn suppress_touch_scroll(&mut self) {
        self.touch_scroll_suppressed = true;
    }
}

pub type ReplayController = TiltController<FixedGeometry, RecordingSink>;

/// Replay `trace` from page load. Returns one frame per sample event and the
/// controller in its final state.
pub fn replay(trace: &Trace, config: PipelineConfig) -> (Vec<ReplayFrame>, ReplayController) {
    let mut controller = TiltController::new(
        config,
        FixedGeometry {
            measurements: trace.measurements,
        },
        RecordingSink::default(),
    );
    controller.load();

    let mut frames = Vec::new();
    for event in &trace.events {
        let now = Time::from_ms(event.at_ms);
        controller.tick(now);
        match &event.kind {
            TraceEventKind::Sample(sample) => {
                let processed = controller.handle_sample(sample);
                frames.push(ReplayFrame {
                    at_ms: event.at_ms,
                    top: processed.position.top,
                    left: processed.position.left,
                    readout: processed.readout,
                });
            }
            TraceEventKind::Resize => controller.handle_resize(now),
            TraceEventKind::OrientationChange => controller.handle_orientation_change(now),
            TraceEventKind::Measure(measurements) => {
                controller.source_mut().measurements = *measurements;
            }
        }
    }

    (frames, controller)
}
