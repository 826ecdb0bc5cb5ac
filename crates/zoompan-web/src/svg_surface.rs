//! `ViewSurface` over a live `<svg>` element.

use crate::attrs::{
    READY_ATTRIBUTE, STROKED_SELECTOR, SVG_NS, VIEWPORT_ID, VIEW_BOX_ALIGNMENT, scale_stroke_width,
};
use kurbo::{Affine, Point, Size};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, SvgsvgElement};
use zoompan_core::{
    ViewBox, ViewSurface, ZoomPanError, ZoomPanResult, format_matrix, parse_matrix,
};

const ASPECT_ATTRIBUTE: &str = "preserveAspectRatio";

fn dom_error(err: JsValue) -> ZoomPanError {
    ZoomPanError::Surface(format!("{:?}", err))
}

/// Surface backed by an SVG element in the document.
pub struct SvgSurface {
    svg: SvgsvgElement,
    viewport: Option<Element>,
    /// Cached viewport transform, mirrored into the group's attribute.
    transform: Affine,
    /// `preserveAspectRatio` found before the first view box write.
    saved_alignment: Option<Option<String>>,
}

impl SvgSurface {
    /// Wrap an SVG element, picking up a viewport group left by an earlier attach.
    pub fn new(svg: SvgsvgElement) -> Self {
        let viewport = svg
            .query_selector(&format!(":scope > g#{VIEWPORT_ID}"))
            .ok()
            .flatten();
        let transform = viewport
            .as_ref()
            .and_then(|group| group.get_attribute("transform"))
            .and_then(|value| parse_matrix(&value).ok())
            .unwrap_or(Affine::IDENTITY);
        Self { svg, viewport, transform, saved_alignment: None }
    }

    pub fn element(&self) -> &SvgsvgElement {
        &self.svg
    }

    /// The group wrapping the drawing in transform mode.
    ///
    /// Content added after attaching must be appended here to follow the view.
    pub fn viewport(&self) -> Option<&Element> {
        self.viewport.as_ref()
    }

    fn align_view_box(&mut self) {
        if self.saved_alignment.is_none() {
            self.saved_alignment = Some(self.svg.get_attribute(ASPECT_ATTRIBUTE));
        }
        if let Err(err) = self.svg.set_attribute(ASPECT_ATTRIBUTE, VIEW_BOX_ALIGNMENT) {
            log::warn!("Failed to set {ASPECT_ATTRIBUTE}: {:?}", err);
        }
    }

    fn restore_alignment(&mut self) {
        let result = match self.saved_alignment.take() {
            Some(Some(value)) => self.svg.set_attribute(ASPECT_ATTRIBUTE, &value),
            Some(None) => self.svg.remove_attribute(ASPECT_ATTRIBUTE),
            None => return,
        };
        if let Err(err) = result {
            log::warn!("Failed to restore {ASPECT_ATTRIBUTE}: {:?}", err);
        }
    }

    /// Convert client (page viewport) coordinates to canvas-local pixels.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.svg.get_bounding_client_rect();
        Point::new(client_x - rect.left(), client_y - rect.top())
    }
}

impl ViewSurface for SvgSurface {
    fn size(&self) -> Size {
        let rect = self.svg.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn is_ready(&self) -> bool {
        self.svg.has_attribute(READY_ATTRIBUTE)
    }

    fn set_ready(&mut self, ready: bool) {
        let result = if ready {
            self.svg.set_attribute(READY_ATTRIBUTE, "")
        } else {
            self.restore_alignment();
            self.svg.remove_attribute(READY_ATTRIBUTE)
        };
        if let Err(err) = result {
            log::warn!("Failed to update {READY_ATTRIBUTE}: {:?}", err);
        }
    }

    fn install_viewport(&mut self) -> ZoomPanResult<bool> {
        if self.viewport.is_some() {
            return Ok(false);
        }
        let document = self
            .svg
            .owner_document()
            .ok_or_else(|| ZoomPanError::Surface("SVG element has no document".to_string()))?;
        let group = document.create_element_ns(Some(SVG_NS), "g").map_err(dom_error)?;
        group.set_id(VIEWPORT_ID);

        while let Some(child) = self.svg.first_child() {
            group.append_child(&child).map_err(dom_error)?;
        }
        self.svg.append_child(&group).map_err(dom_error)?;

        self.transform = Affine::IDENTITY;
        self.viewport = Some(group);
        log::debug!("Installed #{VIEWPORT_ID} group");
        Ok(true)
    }

    fn remove_viewport(&mut self) -> ZoomPanResult<()> {
        let group = self
            .viewport
            .take()
            .ok_or_else(|| ZoomPanError::Surface("No viewport group installed".to_string()))?;
        while let Some(child) = group.first_child() {
            self.svg.insert_before(&child, Some(&group)).map_err(dom_error)?;
        }
        self.svg.remove_child(&group).map_err(dom_error)?;
        self.transform = Affine::IDENTITY;
        Ok(())
    }

    fn viewport_transform(&self) -> Affine {
        self.transform
    }

    fn set_viewport_transform(&mut self, transform: Affine) {
        self.transform = transform;
        if let Some(group) = &self.viewport {
            if let Err(err) = group.set_attribute("transform", &format_matrix(transform)) {
                log::warn!("Failed to set viewport transform: {:?}", err);
            }
        }
    }

    fn view_box(&self) -> Option<ViewBox> {
        self.svg
            .get_attribute("viewBox")
            .and_then(|value| ViewBox::parse(&value).ok())
    }

    fn set_view_box(&mut self, view_box: Option<ViewBox>) {
        let result = match view_box {
            Some(view_box) => {
                self.align_view_box();
                self.svg.set_attribute("viewBox", &view_box.to_attribute())
            }
            None => self.svg.remove_attribute("viewBox"),
        };
        if let Err(err) = result {
            log::warn!("Failed to update viewBox: {:?}", err);
        }
    }

    fn scale_stroke_widths(&mut self, factor: f64) {
        let nodes = match self.svg.query_selector_all(STROKED_SELECTOR) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("Failed to query stroked elements: {:?}", err);
                return;
            }
        };
        for index in 0..nodes.length() {
            let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(scaled) = element
                .get_attribute("stroke-width")
                .and_then(|value| scale_stroke_width(&value, factor))
            else {
                continue;
            };
            if let Err(err) = element.set_attribute("stroke-width", &scaled) {
                log::warn!("Failed to set stroke-width: {:?}", err);
            }
        }
    }
}
