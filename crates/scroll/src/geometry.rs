use orientation::{DeviceOrientationState, RotationQuadrant, Viewport, classify};
use serde::{Deserialize, Serialize};

/// Pixel extents the mappers work against.
///
/// The wrapper is the scroll container; the canvas sits inside it and is
/// wider than the wrapper so content can pan sideways.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub wrapper_height: f64,
    pub wrapper_width: f64,
    pub canvas_width: f64,
    pub screen_height: f64,
}

impl ScreenGeometry {
    /// Scrollable height. May be zero or negative when the page fits on screen.
    pub fn vertical_range(&self) -> f64 {
        self.wrapper_height - self.screen_height
    }

    /// Pannable width. May be zero or negative when the canvas fits the wrapper.
    pub fn horizontal_range(&self) -> f64 {
        self.canvas_width - self.wrapper_width
    }
}

/// Everything a geometry source reports in one synchronous read.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurements {
    pub wrapper_height: f64,
    pub wrapper_width: f64,
    pub canvas_width: f64,
    pub viewport: Viewport,
    #[serde(default)]
    pub rotation: RotationQuadrant,
}

impl Measurements {
    pub fn geometry(&self) -> ScreenGeometry {
        ScreenGeometry {
            wrapper_height: self.wrapper_height,
            wrapper_width: self.wrapper_width,
            canvas_width: self.canvas_width,
            screen_height: self.viewport.client_height,
        }
    }

    pub fn orientation(&self) -> DeviceOrientationState {
        classify(self.viewport, self.rotation)
    }
}
