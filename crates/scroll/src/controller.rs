use foundation::time::Time;
use orientation::RawOrientationSample;
use runtime::{Debounce, TimerQueue};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::host::{GeometrySource, ScrollSink};
use crate::phase::ActivationEffect;
use crate::pipeline::{ProcessedSample, ScrollPipeline, ScrollPosition};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Deferred {
    ResizeQuiet,
    Settle,
}

/// Drives a [`ScrollPipeline`] from host events.
///
/// The host forwards page load, sensor samples, resize and rotation events,
/// and calls [`TiltController::tick`] at or after [`TiltController::next_deadline`].
/// Layout recomputes after a rotation are deferred so the platform can finish
/// relayout first; newer requests replace pending ones.
pub struct TiltController<G, S> {
    pipeline: ScrollPipeline,
    source: G,
    sink: S,
    timers: TimerQueue<Deferred>,
    resize: Debounce,
    settle: Debounce,
    watching_resize: bool,
}

impl<G: GeometrySource, S: ScrollSink> TiltController<G, S> {
    pub fn new(config: PipelineConfig, source: G, sink: S) -> Self {
        let resize = Debounce::new("resize", config.timing.resize_debounce_ms);
        let settle = Debounce::new("settle", config.timing.settle_delay_ms);
        Self {
            pipeline: ScrollPipeline::new(config),
            source,
            sink,
            timers: TimerQueue::new(),
            resize,
            settle,
            watching_resize: false,
        }
    }

    pub fn pipeline(&self) -> &ScrollPipeline {
        &self.pipeline
    }

    pub fn source(&self) -> &G {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut G {
        &mut self.source
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn is_watching_resize(&self) -> bool {
        self.watching_resize
    }

    /// Measure the page, classify orientation and reset the scroll offset.
    pub fn load(&mut self) -> ScrollPosition {
        self.recompute_geometry();
        let origin = ScrollPosition::default();
        self.sink.apply(origin);
        origin
    }

    /// Re-read geometry and orientation immediately.
    pub fn recompute_geometry(&mut self) {
        let measurements = self.source.measure();
        self.pipeline.recompute_geometry(&measurements);
    }

    pub fn handle_sample(&mut self, sample: &RawOrientationSample) -> ProcessedSample {
        for effect in self.pipeline.observe_sample() {
            self.run_effect(*effect);
        }
        let processed = self.pipeline.process_sample(sample);
        self.sink.apply(processed.position);
        self.sink.show_readout(&processed.readout);
        processed
    }

    /// Resize events only count once orientation events are confirmed.
    pub fn handle_resize(&mut self, now: Time) {
        if !self.watching_resize {
            return;
        }
        self.resize
            .trigger(now, &mut self.timers, Deferred::ResizeQuiet);
    }

    pub fn handle_orientation_change(&mut self, now: Time) {
        self.settle.trigger(now, &mut self.timers, Deferred::Settle);
    }

    pub fn next_deadline(&self) -> Option<Time> {
        self.timers.next_due()
    }

    /// Fire every timer due at or before `now`. Returns how many fired.
    pub fn tick(&mut self, now: Time) -> usize {
        let mut fired = 0;
        while let Some((id, deferred)) = self.timers.pop_due(now) {
            fired += 1;
            match deferred {
                Deferred::ResizeQuiet => {
                    if self.resize.acknowledge(id) {
                        // A settled resize is handled like a rotation.
                        self.handle_orientation_change(now);
                    }
                }
                Deferred::Settle => {
                    if self.settle.acknowledge(id) {
                        debug!(at_ms = now.as_ms(), "layout settled");
                        self.recompute_geometry();
                    }
                }
            }
        }
        fired
    }

    fn run_effect(&mut self, effect: ActivationEffect) {
        match effect {
            ActivationEffect::MarkOrientationSupported => self.sink.mark_orientation_supported(),
            ActivationEffect::SuppressTouchScroll => self.sink.suppress_touch_scroll(),
            ActivationEffect::RemeasureGeometry => {
                let measurements = self.source.measure();
                self.pipeline.remeasure_dimensions(&measurements);
            }
            ActivationEffect::WatchResize => self.watching_resize = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TiltController;
    use crate::config::PipelineConfig;
    use crate::geometry::Measurements;
    use crate::host::{GeometrySource, ScrollSink};
    use crate::pipeline::{DebugReadout, ScrollPosition};
    use foundation::time::Time;
    use orientation::{RawOrientationSample, RotationQuadrant, Viewport};
    use pretty_assertions::assert_eq;

    struct Page {
        current: Measurements,
    }

    impl GeometrySource for Page {
        fn measure(&self) -> Measurements {
            self.current
        }
    }

    #[derive(Default)]
    struct Recorder {
        applied: Vec<ScrollPosition>,
        readouts: Vec<DebugReadout>,
        marked: usize,
        touch_suppressed: usize,
    }

    impl ScrollSink for Recorder {
        fn apply(&mut self, position: ScrollPosition) {
            self.applied.push(position);
        }

        fn mark_orientation_supported(&mut self) {
            self.marked += 1;
        }

        fn suppress_touch_scroll(&mut self) {
            self.touch_suppressed += 1;
        }

        fn show_readout(&mut self, readout: &DebugReadout) {
            self.readouts.push(*readout);
        }
    }

    fn portrait() -> Measurements {
        Measurements {
            wrapper_height: 1800.0,
            wrapper_width: 400.0,
            canvas_width: 1840.0,
            viewport: Viewport::new(400.0, 800.0),
            rotation: RotationQuadrant::Upright,
        }
    }

    fn landscape() -> Measurements {
        Measurements {
            wrapper_height: 1200.0,
            wrapper_width: 800.0,
            canvas_width: 2600.0,
            viewport: Viewport::new(800.0, 400.0),
            rotation: RotationQuadrant::Clockwise,
        }
    }

    fn controller() -> TiltController<Page, Recorder> {
        TiltController::new(
            PipelineConfig::default(),
            Page {
                current: portrait(),
            },
            Recorder::default(),
        )
    }

    #[test]
    fn load_resets_scroll_and_measures() {
        let mut c = controller();
        assert_eq!(c.load(), ScrollPosition::new(0, 0));
        assert_eq!(c.sink().applied, vec![ScrollPosition::new(0, 0)]);
        assert_eq!(c.pipeline().geometry().vertical_range(), 1000.0);
    }

    #[test]
    fn first_sample_runs_activation_effects_once() {
        let mut c = controller();
        c.load();
        assert!(!c.is_watching_resize());

        c.handle_sample(&RawOrientationSample::new(0.0, 100.0, 0.0));
        c.handle_sample(&RawOrientationSample::new(0.0, 100.0, 0.0));

        assert!(c.is_watching_resize());
        assert_eq!(c.sink().marked, 1);
        assert_eq!(c.sink().touch_suppressed, 1);
        assert_eq!(c.sink().applied.len(), 3);
        assert_eq!(c.sink().readouts.len(), 2);
    }

    #[test]
    fn activation_remeasures_dimensions_but_not_orientation() {
        let mut c = controller();
        c.load();
        c.source_mut().current = landscape();
        c.handle_sample(&RawOrientationSample::new(0.0, 100.0, 0.0));
        assert_eq!(c.pipeline().geometry().wrapper_width, 800.0);
        assert!(!c.pipeline().orientation().is_landscape);
    }

    #[test]
    fn resize_before_activation_is_ignored() {
        let mut c = controller();
        c.load();
        c.handle_resize(Time(0.0));
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn resize_burst_then_settle_recomputes_once() {
        let mut c = controller();
        c.load();
        c.handle_sample(&RawOrientationSample::new(0.0, 100.0, 0.0));
        c.source_mut().current = landscape();

        c.handle_resize(Time(0.0));
        c.handle_resize(Time(5.0));
        assert_eq!(c.next_deadline(), Some(Time(15.0)));

        assert_eq!(c.tick(Time(14.0)), 0);
        assert_eq!(c.tick(Time(15.0)), 1);
        assert_eq!(c.next_deadline(), Some(Time(515.0)));
        assert!(!c.pipeline().orientation().is_landscape);

        assert_eq!(c.tick(Time(515.0)), 1);
        assert!(c.pipeline().orientation().is_landscape);
        assert!(c.pipeline().orientation().is_rotated_clockwise);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn newer_rotation_replaces_pending_settle() {
        let mut c = controller();
        c.load();
        c.handle_orientation_change(Time(0.0));
        c.handle_orientation_change(Time(200.0));
        assert_eq!(c.next_deadline(), Some(Time(700.0)));
        assert_eq!(c.tick(Time(600.0)), 0);

        c.source_mut().current = landscape();
        assert_eq!(c.tick(Time(700.0)), 1);
        assert!(c.pipeline().orientation().is_landscape);
    }

    #[test]
    fn late_tick_schedules_settle_from_tick_time() {
        let mut c = controller();
        c.load();
        c.handle_sample(&RawOrientationSample::new(0.0, 100.0, 0.0));
        c.handle_resize(Time(0.0));
        c.source_mut().current = landscape();
        assert_eq!(c.tick(Time(1000.0)), 1);
        assert_eq!(c.next_deadline(), Some(Time(1500.0)));
        assert!(!c.pipeline().orientation().is_landscape);
    }
}
