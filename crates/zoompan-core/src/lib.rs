//! Zoompan Core Library
//!
//! Platform-agnostic pan/zoom view control for SVG canvases: wheel
//! normalization, view state math and the controller state machine.

pub mod controller;
pub mod error;
pub mod input;
pub mod options;
pub mod surface;
pub mod view;
pub mod wheel;

pub use controller::{Interaction, ViewController, zoom_factor};
pub use error::{ZoomPanError, ZoomPanResult};
pub use input::{EventResponse, InputEvent, PointerEvent, PointerTarget, WheelInput};
pub use options::{ViewMode, WheelScope, ZoomPanOptions};
pub use surface::{MemoryElement, MemorySurface, ViewSurface};
pub use view::{ViewBox, ViewState, describe_matrix, format_matrix, parse_matrix};
pub use wheel::{DeltaMode, NOTCH_DELTA, RawWheel, WheelConvention};
