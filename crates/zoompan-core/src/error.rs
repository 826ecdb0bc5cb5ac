//! Error types for view control.

use thiserror::Error;

/// Errors raised while setting up or describing a view.
#[derive(Debug, Error)]
pub enum ZoomPanError {
    #[error("Canvas has no usable geometry: {0}")]
    MissingGeometry(String),
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    #[error("Invalid view box: {0}")]
    InvalidViewBox(String),
    #[error("Invalid transform matrix: {0}")]
    InvalidMatrix(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for view control operations.
pub type ZoomPanResult<T> = Result<T, ZoomPanError>;

impl From<serde_json::Error> for ZoomPanError {
    fn from(err: serde_json::Error) -> Self {
        ZoomPanError::InvalidOptions(err.to_string())
    }
}
