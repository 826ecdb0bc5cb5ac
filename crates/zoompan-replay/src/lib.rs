//! Zoompan Replay
//!
//! Replays a recorded input trace through a `ViewController` over a
//! `MemorySurface` and reports the resulting view attributes.
//!
//! ## Trace format
//!
//! ```json
//! {
//!   "canvas": { "width": 400, "height": 300, "viewBox": "0 0 400 1" },
//!   "options": { "mode": "viewBox", "mouseWheelSensitivity": 2 },
//!   "elements": [ { "strokeWidth": 2 }, {} ],
//!   "events": [
//!     { "type": "down", "position": { "x": 10, "y": 10 } },
//!     { "type": "move", "position": { "x": 30, "y": 25 } },
//!     { "type": "up", "position": { "x": 30, "y": 25 } },
//!     { "position": { "x": 200, "y": 150 }, "wheelDelta": 120 }
//!   ]
//! }
//! ```

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use zoompan_core::{
    InputEvent, MemorySurface, ViewBox, ViewController, ZoomPanError, ZoomPanOptions,
};

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Usage: {0}")]
    Usage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Trace error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] ZoomPanError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Canvas geometry recorded with a trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceCanvas {
    pub width: f64,
    pub height: f64,
    /// Initial `viewBox` attribute, if the canvas had one.
    #[serde(default)]
    pub view_box: Option<String>,
}

/// A drawn element present before replay starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceElement {
    #[serde(default)]
    pub stroke_width: Option<f64>,
}

/// A recorded session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub canvas: TraceCanvas,
    #[serde(default)]
    pub options: ZoomPanOptions,
    #[serde(default)]
    pub elements: Vec<TraceElement>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// View attributes after a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_box: Option<String>,
    /// Stroke widths in element order.
    pub stroke_widths: Vec<Option<f64>>,
    /// Still mid-pan when the trace ended.
    pub panning: bool,
    /// Events whose default action was suppressed.
    pub handled: usize,
    /// Events that moved the view.
    pub changed: usize,
}

impl Trace {
    /// Parse a trace from JSON text.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a trace from a file.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the canvas described by the trace.
    fn surface(&self) -> ReplayResult<MemorySurface> {
        let mut surface = MemorySurface::new(Size::new(self.canvas.width, self.canvas.height));
        if let Some(view_box) = &self.canvas.view_box {
            surface = surface.with_view_box(ViewBox::parse(view_box)?);
        }
        for element in &self.elements {
            surface.add_element(element.stroke_width);
        }
        Ok(surface)
    }

    /// Run every event through a fresh controller.
    pub fn replay(&self) -> ReplayResult<ReplayReport> {
        let mut controller = ViewController::initialize(self.surface()?, self.options.clone())?;

        let mut handled = 0;
        let mut changed = 0;
        for event in &self.events {
            let response = controller.handle_event(*event);
            handled += usize::from(response.prevent_default);
            changed += usize::from(response.changed);
        }
        log::info!(
            "Replayed {} events ({} handled, {} changed the view)",
            self.events.len(),
            handled,
            changed
        );

        let surface = controller.surface();
        Ok(ReplayReport {
            transform: surface.transform_attribute(),
            view_box: surface.view_box_attribute(),
            stroke_widths: surface
                .elements_ordered()
                .map(|(_, element)| element.stroke_width)
                .collect(),
            panning: controller.is_panning(),
            handled,
            changed,
        })
    }
}

/// Replay the trace named by the first argument and render the report as JSON.
pub fn run<I>(mut args: I) -> ReplayResult<String>
where
    I: Iterator<Item = String>,
{
    let program = args.next().unwrap_or_else(|| "zoompan-replay".to_string());
    let path = args
        .next()
        .ok_or_else(|| ReplayError::Usage(format!("{program} <trace.json>")))?;
    let report = Trace::load(Path::new(&path))?.replay()?;
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zoompan_core::parse_matrix;

    fn assert_transform(attribute: Option<&str>, expected: [f64; 6]) {
        let coeffs = parse_matrix(attribute.unwrap()).unwrap().as_coeffs();
        for (got, want) in coeffs.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{coeffs:?} != {expected:?}");
        }
    }

    const PAN_AND_ZOOM: &str = r#"{
        "canvas": { "width": 400, "height": 300 },
        "elements": [ { "strokeWidth": 2 }, {} ],
        "events": [
            { "type": "down", "position": { "x": 10, "y": 10 } },
            { "type": "move", "position": { "x": 30, "y": 25 } },
            { "type": "up", "position": { "x": 30, "y": 25 } },
            { "position": { "x": 0, "y": 0 }, "wheelDelta": 360 }
        ]
    }"#;

    #[test]
    fn test_replay_transform_trace() {
        let report = Trace::from_json(PAN_AND_ZOOM).unwrap().replay().unwrap();

        // Pan by (20, 15), then zoom 1.1 keeping the canvas origin fixed.
        assert_transform(report.transform.as_deref(), [1.1, 0.0, 0.0, 1.1, 22.0, 16.5]);
        assert_eq!(report.view_box, None);
        assert!(!report.panning);
        assert_eq!(report.handled, 4);
        assert_eq!(report.changed, 3);

        let widths = &report.stroke_widths;
        assert_eq!(widths.len(), 2);
        assert!((widths[0].unwrap() - 2.0 / 1.1).abs() < 1e-9);
        assert_eq!(widths[1], None);
    }

    #[test]
    fn test_replay_view_box_trace() {
        let trace = Trace::from_json(
            r#"{
                "canvas": { "width": 400, "height": 300 },
                "options": { "mode": "viewBox", "scaleStrokeWidth": false },
                "events": [
                    { "type": "down", "position": { "x": 100, "y": 100 } },
                    { "type": "move", "position": { "x": 140, "y": 70 } }
                ]
            }"#,
        )
        .unwrap();
        let report = trace.replay().unwrap();

        assert_eq!(report.view_box.as_deref(), Some("-40 30 400 1"));
        assert_eq!(report.transform, None);
        assert!(report.panning);
    }

    #[test]
    fn test_replay_keeps_existing_view_box() {
        let trace = Trace::from_json(
            r#"{
                "canvas": { "width": 200, "height": 100, "viewBox": "0 0 50 25" },
                "options": { "mode": "viewBox" }
            }"#,
        )
        .unwrap();
        assert_eq!(trace.replay().unwrap().view_box.as_deref(), Some("0 0 50 25"));
    }

    #[test]
    fn test_replay_rejects_bad_view_box() {
        let trace = Trace::from_json(
            r#"{ "canvas": { "width": 200, "height": 100, "viewBox": "nope" } }"#,
        )
        .unwrap();
        assert!(matches!(trace.replay(), Err(ReplayError::Core(ZoomPanError::InvalidViewBox(_)))));
    }

    #[test]
    fn test_replay_rejects_empty_canvas() {
        let trace = Trace::from_json(r#"{ "canvas": { "width": 0, "height": 100 } }"#).unwrap();
        assert!(matches!(trace.replay(), Err(ReplayError::Core(ZoomPanError::MissingGeometry(_)))));
    }

    #[test]
    fn test_run_reads_trace_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAN_AND_ZOOM.as_bytes()).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let output = run(["zoompan-replay".to_string(), path].into_iter()).unwrap();
        let report: ReplayReport = serde_json::from_str(&output).unwrap();
        assert_transform(report.transform.as_deref(), [1.1, 0.0, 0.0, 1.1, 22.0, 16.5]);
    }

    #[test]
    fn test_run_without_path_is_usage_error() {
        let result = run(["zoompan-replay".to_string()].into_iter());
        assert!(matches!(result, Err(ReplayError::Usage(_))));
    }

    #[test]
    fn test_run_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json").to_string_lossy().to_string();
        let result = run(["zoompan-replay".to_string(), path].into_iter());
        assert!(matches!(result, Err(ReplayError::Io(_))));
    }
}
