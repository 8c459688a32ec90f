/// Whether the device has proven it delivers orientation events.
///
/// Browsers advertise the event even without a gyroscope, so the page stays
/// in its plain scrolling mode until the first real sample arrives.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Active,
}

/// Work the host must carry out when the first sample arrives.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ActivationEffect {
    /// Flag the page as orientation-driven (the `has-deviceOrientation` body class).
    MarkOrientationSupported,
    /// Stop touch gestures from scrolling the wrapper.
    SuppressTouchScroll,
    /// Re-read dimensions; the orientation-driven styles may change layout.
    RemeasureGeometry,
    /// Start reacting to resize events.
    WatchResize,
}

pub const ACTIVATION_EFFECTS: [ActivationEffect; 4] = [
    ActivationEffect::MarkOrientationSupported,
    ActivationEffect::SuppressTouchScroll,
    ActivationEffect::RemeasureGeometry,
    ActivationEffect::WatchResize,
];

impl Phase {
    /// Advance on a received sample. Returns the activation effects on the
    /// `Uninitialized -> Active` transition and nothing afterwards.
    pub fn on_sample(&mut self) -> &'static [ActivationEffect] {
        match self {
            Phase::Uninitialized => {
                *self = Phase::Active;
                &ACTIVATION_EFFECTS
            }
            Phase::Active => &[],
        }
    }
}
