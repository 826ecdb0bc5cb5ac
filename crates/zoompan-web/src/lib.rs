//! Zoompan Web
//!
//! Attaches pan/zoom to live `<svg>` elements in the browser. The DOM
//! binding is only built for `wasm32`.

pub mod attrs;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
mod js;
#[cfg(target_arch = "wasm32")]
mod svg_surface;

pub use error::{WebError, WebResult};

#[cfg(target_arch = "wasm32")]
pub use binding::{ZoomPanHandle, attach};
#[cfg(target_arch = "wasm32")]
pub use js::{ZoomPan, init_logging};
#[cfg(target_arch = "wasm32")]
pub use svg_surface::SvgSurface;
