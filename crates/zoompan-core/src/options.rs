//! Pan/zoom configuration.

use crate::error::ZoomPanResult;
use crate::wheel::WheelConvention;
use serde::{Deserialize, Serialize};

/// Which view representation the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Transform matrix on a viewport group wrapping the drawing.
    #[default]
    Transform,
    /// `viewBox` rectangle on the root canvas.
    ViewBox,
}

/// Where wheel events are listened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WheelScope {
    #[default]
    Canvas,
    Document,
}

/// Options supplied once at initialization.
///
/// Deserializes from the JS-style option object; unknown keys are ignored and
/// missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomPanOptions {
    pub zoom: bool,
    pub pan: bool,
    /// End a pan when the pointer leaves the canvas.
    pub stop_pan_on_mouse_out: bool,
    /// Multiplier applied to every normalized wheel delta.
    pub mouse_wheel_sensitivity: f64,
    /// Keep rendered stroke thickness constant while zooming.
    pub scale_stroke_width: bool,
    pub mode: ViewMode,
    pub wheel_convention: WheelConvention,
    pub wheel_scope: WheelScope,
}

impl Default for ZoomPanOptions {
    fn default() -> Self {
        Self {
            zoom: true,
            pan: true,
            stop_pan_on_mouse_out: false,
            mouse_wheel_sensitivity: 1.0,
            scale_stroke_width: true,
            mode: ViewMode::Transform,
            wheel_convention: WheelConvention::Auto,
            wheel_scope: WheelScope::Canvas,
        }
    }
}

impl ZoomPanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON option object.
    pub fn from_json(json: &str) -> ZoomPanResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style override of the view mode.
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }
}
