//! View state: the transform or view box that maps drawing space onto the canvas.

use crate::error::{ZoomPanError, ZoomPanResult};
use kurbo::{Affine, Point, Size};
use serde::{Deserialize, Serialize};

/// Rectangle of drawing space shown by the canvas (the SVG `viewBox`).
///
/// Mapped onto the canvas the way SVG does for `preserveAspectRatio="xMinYMin meet"`:
/// one uniform scale on both axes, the larger of `width / canvas_width` and
/// `height / canvas_height` view units per pixel, with no alignment offset.
/// Zooming only changes the width, so the scale follows the width until the
/// height becomes the limiting side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Default view box for a canvas that has none: full pixel width, unit height.
    pub fn for_canvas(canvas: Size) -> Self {
        Self::new(0.0, 0.0, canvas.width, 1.0)
    }

    /// View units per canvas pixel.
    pub fn pixel_scale(&self, canvas: Size) -> f64 {
        (self.width / canvas.width).max(self.height / canvas.height)
    }

    /// Convert a canvas-local pixel position to view coordinates.
    pub fn screen_to_view(&self, screen_point: Point, canvas: Size) -> Point {
        let scale = self.pixel_scale(canvas);
        Point::new(self.x + screen_point.x * scale, self.y + screen_point.y * scale)
    }

    /// Convert a view position back to canvas-local pixels.
    pub fn view_to_screen(&self, view_point: Point, canvas: Size) -> Point {
        let scale = self.pixel_scale(canvas);
        Point::new(
            (view_point.x - self.x) / scale,
            (view_point.y - self.y) / scale,
        )
    }

    /// Resize to `new_width` keeping the view point under `screen_point` fixed.
    pub fn resized_about(&self, screen_point: Point, canvas: Size, new_width: f64) -> Self {
        let anchor = self.screen_to_view(screen_point, canvas);
        let resized = Self { width: new_width, ..*self };
        let scale = resized.pixel_scale(canvas);
        Self {
            x: anchor.x - screen_point.x * scale,
            y: anchor.y - screen_point.y * scale,
            ..resized
        }
    }

    /// Format as an SVG `viewBox` attribute value.
    pub fn to_attribute(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }

    /// Parse an SVG `viewBox` attribute value.
    pub fn parse(value: &str) -> ZoomPanResult<Self> {
        let numbers = parse_numbers(value)
            .ok_or_else(|| ZoomPanError::InvalidViewBox(value.to_string()))?;
        match numbers.as_slice() {
            &[x, y, width, height] if width >= 0.0 && height >= 0.0 => {
                Ok(Self::new(x, y, width, height))
            }
            _ => Err(ZoomPanError::InvalidViewBox(value.to_string())),
        }
    }
}

/// The active view representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewState {
    /// Transform on the viewport group (drawing space to canvas pixels).
    Transform(Affine),
    /// View box on the root canvas.
    ViewBox(ViewBox),
}

impl ViewState {
    /// Convert a canvas-local pixel position to view coordinates.
    pub fn screen_to_view(&self, screen_point: Point, canvas: Size) -> Point {
        match self {
            ViewState::Transform(transform) => transform.inverse() * screen_point,
            ViewState::ViewBox(view_box) => view_box.screen_to_view(screen_point, canvas),
        }
    }

    /// Convert a view position to canvas-local pixels.
    pub fn view_to_screen(&self, view_point: Point, canvas: Size) -> Point {
        match self {
            ViewState::Transform(transform) => *transform * view_point,
            ViewState::ViewBox(view_box) => view_box.view_to_screen(view_point, canvas),
        }
    }
}

/// Format a transform as an SVG `matrix(a,b,c,d,e,f)` attribute value.
pub fn format_matrix(transform: Affine) -> String {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    format!("matrix({a},{b},{c},{d},{e},{f})")
}

/// Parse an SVG `matrix(a,b,c,d,e,f)` attribute value.
pub fn parse_matrix(value: &str) -> ZoomPanResult<Affine> {
    let inner = value
        .trim()
        .strip_prefix("matrix(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ZoomPanError::InvalidMatrix(value.to_string()))?;
    let numbers =
        parse_numbers(inner).ok_or_else(|| ZoomPanError::InvalidMatrix(value.to_string()))?;
    let coeffs: [f64; 6] = numbers
        .try_into()
        .map_err(|_| ZoomPanError::InvalidMatrix(value.to_string()))?;
    Ok(Affine::new(coeffs))
}

/// Multi-line dump of a transform in row-major 3x3 form, for trace logs.
pub fn describe_matrix(transform: Affine) -> String {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    format!("[ {a}, {c}, {e}\n  {b}, {d}, {f}\n  0, 0, 1 ]")
}

/// Split on commas and whitespace, as SVG number lists allow either.
fn parse_numbers(value: &str) -> Option<Vec<f64>> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().ok())
        .collect()
}
