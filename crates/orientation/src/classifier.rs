use serde::{Deserialize, Serialize};

/// Coarse screen rotation as reported by the platform (`window.orientation`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationQuadrant {
    Upright,
    /// Reported as `90`.
    CounterClockwise,
    /// Reported as `-90`.
    Clockwise,
    UpsideDown,
    #[default]
    Unavailable,
}

impl RotationQuadrant {
    /// Decode the platform's degree value. Anything outside
    /// `{0, 90, -90, 180}` is treated as unavailable.
    pub fn from_degrees(deg: Option<f64>) -> Self {
        match deg {
            Some(d) if d == 0.0 => Self::Upright,
            Some(d) if d == 90.0 => Self::CounterClockwise,
            Some(d) if d == -90.0 => Self::Clockwise,
            Some(d) if d == 180.0 || d == -180.0 => Self::UpsideDown,
            _ => Self::Unavailable,
        }
    }
}

/// Visible viewport size in CSS pixels.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub client_width: f64,
    pub client_height: f64,
}

impl Viewport {
    pub fn new(client_width: f64, client_height: f64) -> Self {
        Self {
            client_width,
            client_height,
        }
    }
}

/// How the screen is currently held.
///
/// `is_rotated_clockwise` only carries meaning while `is_landscape` is set;
/// use [`DeviceOrientationState::pose`] rather than reading it directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceOrientationState {
    pub is_landscape: bool,
    pub is_rotated_clockwise: bool,
}

/// The three poses the normalizer and mappers branch on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Pose {
    Portrait,
    LandscapeClockwise,
    LandscapeCounterClockwise,
}

impl DeviceOrientationState {
    pub fn pose(&self) -> Pose {
        match (self.is_landscape, self.is_rotated_clockwise) {
            (false, _) => Pose::Portrait,
            (true, true) => Pose::LandscapeClockwise,
            (true, false) => Pose::LandscapeCounterClockwise,
        }
    }
}

/// Classify the pose from viewport shape and platform rotation.
///
/// Landscape is a strictly wider-than-tall viewport. Only a `-90` rotation
/// counts as clockwise; a missing indicator defaults to counter-clockwise.
pub fn classify(viewport: Viewport, rotation: RotationQuadrant) -> DeviceOrientationState {
    DeviceOrientationState {
        is_landscape: viewport.client_height < viewport.client_width,
        is_rotated_clockwise: rotation == RotationQuadrant::Clockwise,
    }
}
