//! JavaScript-facing API.

use crate::binding::{ZoomPanHandle, attach};
use crate::error::WebError;
use wasm_bindgen::prelude::*;
use web_sys::{Element, SvgsvgElement};
use zoompan_core::ZoomPanOptions;

/// Set up panic reporting and console logging.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Pan/zoom attached to one SVG element.
#[wasm_bindgen]
pub struct ZoomPan {
    handle: Option<ZoomPanHandle>,
}

#[wasm_bindgen]
impl ZoomPan {
    /// Attach to `svg`. `options` is a plain object; omitted keys take defaults.
    ///
    /// On an element that already has pan/zoom attached this does nothing
    /// and the returned object reports `attached == false`.
    #[wasm_bindgen(constructor)]
    pub fn new(svg: SvgsvgElement, options: JsValue) -> Result<ZoomPan, JsValue> {
        let options = if options.is_undefined() || options.is_null() {
            ZoomPanOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|err| WebError::Options(err.to_string()))?
        };
        Ok(ZoomPan { handle: attach(svg, options)? })
    }

    /// Remove all listeners and restore the element. Safe to call twice.
    pub fn detach(&mut self) -> Result<(), JsValue> {
        if let Some(handle) = self.handle.take() {
            handle.detach()?;
        }
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Group to draw into so new content pans and zooms with the rest.
    ///
    /// `undefined` in view box mode or when not attached.
    #[wasm_bindgen(getter)]
    pub fn viewport(&self) -> Option<Element> {
        self.handle.as_ref().and_then(ZoomPanHandle::viewport)
    }

    #[wasm_bindgen(getter, js_name = isPanning)]
    pub fn is_panning(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| handle.with_controller(|controller| controller.is_panning()))
    }
}
