//! Host graphics surface abstraction.

mod memory;

pub use memory::{MemoryElement, MemorySurface};

use crate::error::ZoomPanResult;
use crate::view::ViewBox;
use kurbo::{Affine, Size};

/// Trait for the drawing host a controller drives.
///
/// Implementations can wrap a live SVG element or an in-memory model.
/// The viewport group is the element whose transform maps drawing space onto
/// the canvas; the view box belongs to the root canvas.
pub trait ViewSurface {
    /// Canvas size in pixels.
    fn size(&self) -> Size;

    /// Whether a controller has already initialized this surface.
    fn is_ready(&self) -> bool;

    /// Set or clear the initialization flag.
    fn set_ready(&mut self, ready: bool);

    /// Wrap the drawn content in a viewport group.
    ///
    /// Returns `false` when a viewport group already exists.
    fn install_viewport(&mut self) -> ZoomPanResult<bool>;

    /// Remove the viewport group, handing its children back to the root.
    fn remove_viewport(&mut self) -> ZoomPanResult<()>;

    /// Current viewport group transform (identity when none is set).
    fn viewport_transform(&self) -> Affine;

    /// Replace the viewport group transform.
    fn set_viewport_transform(&mut self, transform: Affine);

    /// Current view box of the root canvas.
    fn view_box(&self) -> Option<ViewBox>;

    /// Replace or remove the root canvas view box.
    fn set_view_box(&mut self, view_box: Option<ViewBox>);

    /// Multiply the stroke width of every drawn element by `factor`.
    fn scale_stroke_widths(&mut self, factor: f64);
}
