//! Attribute names and string helpers shared by the DOM binding.

/// SVG namespace for created elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Id of the group wrapping the drawing in transform mode.
pub const VIEWPORT_ID: &str = "viewport";

/// Marks an `<svg>` element that has pan/zoom attached.
pub const READY_ATTRIBUTE: &str = "data-zoompan";

/// Alignment matching the view box model: scale to fit, pinned to the top-left.
pub const VIEW_BOX_ALIGNMENT: &str = "xMinYMin meet";

/// Selector for every element carrying an explicit stroke width.
pub const STROKED_SELECTOR: &str = "[stroke-width]";

/// Whether a pointer target with this tag name is the canvas background.
pub fn is_canvas_tag(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("svg")
}

/// Multiply a `stroke-width` attribute value by `factor`.
///
/// Accepts bare numbers and `px` lengths. Other units and percentages are
/// left alone.
pub fn scale_stroke_width(value: &str, factor: f64) -> Option<String> {
    let value = value.trim();
    let (number, unit) = match value.strip_suffix("px") {
        Some(number) => (number.trim_end(), "px"),
        None => (value, ""),
    };
    let width: f64 = number.parse().ok()?;
    Some(format!("{}{unit}", width * factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_canvas_tag() {
        assert!(is_canvas_tag("svg"));
        assert!(is_canvas_tag("SVG"));
        assert!(!is_canvas_tag("path"));
        assert!(!is_canvas_tag("g"));
    }

    #[test]
    fn test_scale_stroke_width() {
        assert_eq!(scale_stroke_width("2", 0.5).as_deref(), Some("1"));
        assert_eq!(scale_stroke_width(" 3px", 2.0).as_deref(), Some("6px"));
        assert_eq!(scale_stroke_width("1.5", 1.0).as_deref(), Some("1.5"));
    }

    #[test]
    fn test_scale_stroke_width_rejects_other_units() {
        assert_eq!(scale_stroke_width("10%", 2.0), None);
        assert_eq!(scale_stroke_width("1em", 2.0), None);
        assert_eq!(scale_stroke_width("", 2.0), None);
    }
}
