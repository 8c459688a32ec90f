use foundation::math::{Interval, round_to_pixel};
use orientation::{DeviceOrientationState, NormalizedSample, Pose, RawOrientationSample, normalize};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::PipelineConfig;
use crate::geometry::{Measurements, ScreenGeometry};
use crate::horizontal::{HorizontalTarget, horizontal_target};
use crate::phase::{ActivationEffect, Phase};
use crate::vertical::vertical_target;

/// Final page scroll offset in whole pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub top: i64,
    pub left: i64,
}

impl ScrollPosition {
    pub fn new(top: i64, left: i64) -> Self {
        Self { top, left }
    }
}

/// Previous output, read only by the smoother and the gimbal hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LastPosition {
    pub top: Option<i64>,
    pub left: Option<i64>,
}

/// Rounded values for an on-screen debug panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugReadout {
    pub alpha: i64,
    pub beta: i64,
    pub gamma: i64,
    pub alpha_normalized: i64,
    pub beta_normalized: i64,
    pub top: i64,
    pub left: i64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProcessedSample {
    pub position: ScrollPosition,
    pub normalized: NormalizedSample,
    pub readout: DebugReadout,
}

/// All cross-event state of the mapping pipeline.
///
/// Geometry and orientation are replaced wholesale on recompute and are
/// read-only while a sample is processed; `last` is written once per sample.
#[derive(Debug, Clone)]
pub struct ScrollPipeline {
    config: PipelineConfig,
    geometry: ScreenGeometry,
    orientation: DeviceOrientationState,
    phase: Phase,
    last: LastPosition,
}

impl ScrollPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            geometry: ScreenGeometry::default(),
            orientation: DeviceOrientationState::default(),
            phase: Phase::Uninitialized,
            last: LastPosition::default(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }

    pub fn orientation(&self) -> DeviceOrientationState {
        self.orientation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_position(&self) -> LastPosition {
        self.last
    }

    /// Replace geometry and re-classify orientation from one measurement.
    pub fn recompute_geometry(&mut self, measurements: &Measurements) {
        self.geometry = measurements.geometry();
        self.orientation = measurements.orientation();
        debug!(
            geometry = ?self.geometry,
            orientation = ?self.orientation,
            "recomputed geometry"
        );
    }

    /// Replace geometry only, keeping the current orientation.
    pub fn remeasure_dimensions(&mut self, measurements: &Measurements) {
        self.geometry = measurements.geometry();
        debug!(geometry = ?self.geometry, "remeasured dimensions");
    }

    /// Record that a sample arrived. See [`Phase::on_sample`].
    pub fn observe_sample(&mut self) -> &'static [ActivationEffect] {
        let effects = self.phase.on_sample();
        if !effects.is_empty() {
            debug!("orientation events confirmed; activating");
        }
        effects
    }

    pub fn process_sample(&mut self, sample: &RawOrientationSample) -> ProcessedSample {
        let pose = self.orientation.pose();
        let normalized = normalize(sample, &self.orientation);

        let top = self.vertical(sample, normalized.beta, pose);
        let left = self.horizontal(&normalized, pose);
        self.last = LastPosition {
            top: Some(top),
            left: Some(left),
        };

        let position = ScrollPosition { top, left };
        trace!(top, left, "scroll position");

        ProcessedSample {
            position,
            normalized,
            readout: DebugReadout {
                alpha: round_to_pixel(sample.alpha),
                beta: round_to_pixel(sample.beta),
                gamma: round_to_pixel(sample.gamma),
                alpha_normalized: round_to_pixel(normalized.alpha),
                beta_normalized: round_to_pixel(normalized.beta),
                top,
                left,
            },
        }
    }

    fn vertical(&self, sample: &RawOrientationSample, tilt: f64, pose: Pose) -> i64 {
        let range = self.geometry.vertical_range();
        let window = &self.config.tilt;
        let clamped = window.clamp(tilt, sample, pose);
        let target = vertical_target(clamped, window, range);
        let smoothed = match pose {
            Pose::Portrait => self.config.smoothing.top.apply(self.last.top, target),
            _ => target,
        };
        clamp_to_range(round_to_pixel(smoothed), range)
    }

    fn horizontal(&self, normalized: &NormalizedSample, pose: Pose) -> i64 {
        let range = self.geometry.horizontal_range();
        let left = match horizontal_target(normalized, pose, &self.config.gimbal, range) {
            HorizontalTarget::Hold => self.last.left.unwrap_or(0),
            HorizontalTarget::Track(target) => {
                let smoothed = match pose {
                    Pose::Portrait => self.config.smoothing.left.apply(self.last.left, target),
                    _ => target,
                };
                round_to_pixel(smoothed)
            }
        };
        clamp_to_range(left, range)
    }
}

/// Keep an offset inside `[0, range]`; an empty range pins it to `0`.
fn clamp_to_range(offset: i64, range: f64) -> i64 {
    if Interval::new(0.0, range).is_degenerate() {
        return 0;
    }
    offset.clamp(0, range.floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::{DebugReadout, LastPosition, ScrollPipeline, ScrollPosition};
    use crate::config::PipelineConfig;
    use crate::geometry::Measurements;
    use crate::phase::{ACTIVATION_EFFECTS, Phase};
    use orientation::{RawOrientationSample, RotationQuadrant, Viewport};
    use pretty_assertions::assert_eq;

    fn portrait() -> Measurements {
        Measurements {
            wrapper_height: 1800.0,
            wrapper_width: 400.0,
            canvas_width: 1840.0,
            viewport: Viewport::new(400.0, 800.0),
            rotation: RotationQuadrant::Upright,
        }
    }

    fn landscape(rotation: RotationQuadrant) -> Measurements {
        Measurements {
            wrapper_height: 1200.0,
            wrapper_width: 800.0,
            canvas_width: 2600.0,
            viewport: Viewport::new(800.0, 400.0),
            rotation,
        }
    }

    fn pipeline(m: Measurements) -> ScrollPipeline {
        let mut p = ScrollPipeline::new(PipelineConfig::default());
        p.recompute_geometry(&m);
        p
    }

    fn sample(alpha: f64, beta: f64, gamma: f64) -> RawOrientationSample {
        RawOrientationSample::new(alpha, beta, gamma)
    }

    #[test]
    fn first_portrait_sample_maps_without_smoothing() {
        let mut p = pipeline(portrait());
        // Vertical range 1000, horizontal range 1440.
        let out = p.process_sample(&sample(90.0, 100.0, 0.0));
        assert_eq!(out.position, ScrollPosition::new(500, 1080));
        assert_eq!(
            p.last_position(),
            LastPosition {
                top: Some(500),
                left: Some(1080)
            }
        );
    }

    #[test]
    fn portrait_tilt_past_max_locks_to_top() {
        let mut p = pipeline(portrait());
        // Raw -160 unfolds to 200, above the window.
        let out = p.process_sample(&sample(0.0, -160.0, 0.0));
        assert_eq!(out.normalized.beta, 200.0);
        assert_eq!(out.position.top, 0);
    }

    #[test]
    fn portrait_jumps_are_smoothed() {
        let mut p = pipeline(portrait());
        p.process_sample(&sample(0.0, 140.0, 0.0)); // top 100, left 1440
        let out = p.process_sample(&sample(0.0, 50.0, 0.0)); // target top 1000
        assert_eq!(out.position.top, 190);
        assert_eq!(out.position.left, 1440);
    }

    #[test]
    fn landscape_skips_smoothing() {
        let mut p = pipeline(landscape(RotationQuadrant::Clockwise));
        // Range 800. Gamma 40 -> tilt 40 -> below window, device below horizon.
        let first = p.process_sample(&sample(0.0, 10.0, 40.0));
        assert_eq!(first.position.top, 800);
        // Gamma -50 -> tilt 130.
        let second = p.process_sample(&sample(0.0, 10.0, -50.0));
        assert_eq!(second.normalized.beta, 130.0);
        assert_eq!(second.position.top, 160);
    }

    #[test]
    fn gimbal_band_holds_left_across_calls() {
        let mut p = pipeline(portrait());
        let before = p.process_sample(&sample(45.0, 120.0, 0.0)).position.left;
        let a = p.process_sample(&sample(200.0, 90.0, 0.0)).position.left;
        let b = p.process_sample(&sample(310.0, 90.0, 0.0)).position.left;
        assert_eq!(a, before);
        assert_eq!(b, before);
    }

    #[test]
    fn gimbal_band_without_history_holds_zero() {
        let mut p = pipeline(portrait());
        assert_eq!(p.process_sample(&sample(200.0, 90.0, 0.0)).position.left, 0);
    }

    #[test]
    fn degenerate_height_always_maps_to_zero() {
        let mut m = portrait();
        m.wrapper_height = m.viewport.client_height;
        let mut p = pipeline(m);
        for beta in [-170.0, -10.0, 0.0, 45.0, 100.0, 160.0] {
            assert_eq!(p.process_sample(&sample(10.0, beta, 0.0)).position.top, 0);
        }
    }

    #[test]
    fn shrinking_geometry_keeps_output_in_range() {
        let mut p = pipeline(portrait());
        p.process_sample(&sample(0.0, 50.0, 0.0)); // top 1000
        let mut smaller = portrait();
        smaller.wrapper_height = 1000.0; // range 200
        p.recompute_geometry(&smaller);
        let out = p.process_sample(&sample(0.0, 100.0, 0.0));
        assert_eq!(out.position.top, 200);
    }

    #[test]
    fn readout_rounds_like_the_page_did() {
        let mut p = pipeline(portrait());
        let out = p.process_sample(&sample(12.5, -2.5, 0.4));
        assert_eq!(
            out.readout,
            DebugReadout {
                alpha: 13,
                beta: -2,
                gamma: 0,
                alpha_normalized: 13,
                beta_normalized: 0,
                top: out.position.top,
                left: out.position.left,
            }
        );
    }

    #[test]
    fn observe_sample_activates_once() {
        let mut p = ScrollPipeline::new(PipelineConfig::default());
        assert_eq!(p.phase(), Phase::Uninitialized);
        assert_eq!(p.observe_sample(), &ACTIVATION_EFFECTS);
        assert!(p.observe_sample().is_empty());
        assert_eq!(p.phase(), Phase::Active);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut p = pipeline(landscape(RotationQuadrant::CounterClockwise));
        let (g, o) = (p.geometry(), p.orientation());
        p.recompute_geometry(&landscape(RotationQuadrant::CounterClockwise));
        assert_eq!(p.geometry(), g);
        assert_eq!(p.orientation(), o);
    }

    #[test]
    fn remeasure_keeps_orientation() {
        let mut p = pipeline(portrait());
        p.remeasure_dimensions(&landscape(RotationQuadrant::Clockwise));
        assert!(!p.orientation().is_landscape);
        assert_eq!(p.geometry().wrapper_width, 800.0);
    }
}
