//! In-memory surface implementation.

use super::ViewSurface;
use crate::error::{ZoomPanError, ZoomPanResult};
use crate::view::{ViewBox, format_matrix};
use kurbo::{Affine, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A drawn element tracked by `MemorySurface`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryElement {
    /// `None` for elements without a stroke.
    pub stroke_width: Option<f64>,
}

/// Headless surface for testing and replaying recorded input.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    size: Size,
    view_box: Option<ViewBox>,
    /// Viewport group transform, present once a viewport is installed.
    viewport: Option<Affine>,
    ready: bool,
    elements: HashMap<Uuid, MemoryElement>,
    /// Insertion order of elements.
    order: Vec<Uuid>,
}

impl MemorySurface {
    /// Create an empty canvas of the given pixel size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            view_box: None,
            viewport: None,
            ready: false,
            elements: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Start with an existing view box on the root canvas.
    pub fn with_view_box(mut self, view_box: ViewBox) -> Self {
        self.view_box = Some(view_box);
        self
    }

    /// Add a drawn element and return its id.
    pub fn add_element(&mut self, stroke_width: Option<f64>) -> Uuid {
        let id = Uuid::new_v4();
        self.order.push(id);
        self.elements.insert(id, MemoryElement { stroke_width });
        id
    }

    /// Get an element by id.
    pub fn element(&self, id: Uuid) -> Option<&MemoryElement> {
        self.elements.get(&id)
    }

    /// Stroke width of an element, if it has one.
    pub fn stroke_width(&self, id: Uuid) -> Option<f64> {
        self.elements.get(&id).and_then(|element| element.stroke_width)
    }

    /// Elements in insertion order.
    pub fn elements_ordered(&self) -> impl Iterator<Item = (Uuid, &MemoryElement)> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id).map(|element| (*id, element)))
    }

    pub fn has_viewport(&self) -> bool {
        self.viewport.is_some()
    }

    /// The viewport group's `transform` attribute.
    pub fn transform_attribute(&self) -> Option<String> {
        self.viewport.map(format_matrix)
    }

    /// The root canvas `viewBox` attribute.
    pub fn view_box_attribute(&self) -> Option<String> {
        self.view_box.map(|view_box| view_box.to_attribute())
    }
}

impl ViewSurface for MemorySurface {
    fn size(&self) -> Size {
        self.size
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    fn install_viewport(&mut self) -> ZoomPanResult<bool> {
        if self.viewport.is_some() {
            return Ok(false);
        }
        self.viewport = Some(Affine::IDENTITY);
        Ok(true)
    }

    fn remove_viewport(&mut self) -> ZoomPanResult<()> {
        self.viewport
            .take()
            .map(|_| ())
            .ok_or_else(|| ZoomPanError::Surface("No viewport group installed".to_string()))
    }

    fn viewport_transform(&self) -> Affine {
        self.viewport.unwrap_or(Affine::IDENTITY)
    }

    fn set_viewport_transform(&mut self, transform: Affine) {
        self.viewport = Some(transform);
    }

    fn view_box(&self) -> Option<ViewBox> {
        self.view_box
    }

    fn set_view_box(&mut self, view_box: Option<ViewBox>) {
        self.view_box = view_box;
    }

    fn scale_stroke_widths(&mut self, factor: f64) {
        for element in self.elements.values_mut() {
            if let Some(width) = element.stroke_width.as_mut() {
                *width *= factor;
            }
        }
    }
}
