//! Browser binding errors.

use thiserror::Error;
use zoompan_core::ZoomPanError;

/// Errors raised while attaching to or detaching from an SVG element.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("No browser window available")]
    NoWindow,
    #[error("DOM error: {0}")]
    Dom(String),
    #[error("Invalid options: {0}")]
    Options(String),
    #[error(transparent)]
    Core(#[from] ZoomPanError),
}

/// Result type for browser binding operations.
pub type WebResult<T> = Result<T, WebError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        WebError::Dom(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WebError> for wasm_bindgen::JsValue {
    fn from(err: WebError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err = WebError::from(ZoomPanError::MissingGeometry("canvas size 0x0".to_string()));
        assert_eq!(err.to_string(), "Canvas has no usable geometry: canvas size 0x0");
    }
}
