//! Event subscription: wires DOM pointer and wheel events into a controller.

use crate::attrs::{READY_ATTRIBUTE, is_canvas_tag};
use crate::error::{WebError, WebResult};
use crate::svg_surface::SvgSurface;
use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Reflect;
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, MouseEvent, SvgsvgElement, UiEvent, WheelEvent, Window,
};
use zoompan_core::{
    DeltaMode, EventResponse, PointerTarget, RawWheel, ViewController, WheelConvention,
    WheelScope, ZoomPanOptions,
};

type SharedController = Rc<RefCell<ViewController<SvgSurface>>>;

/// Live pan/zoom attachment.
///
/// Dropping the handle unsubscribes every listener and clears the element's
/// attached marker but leaves the view as it is, so a later `attach` picks
/// up the current view. Call `detach` to also restore the element.
pub struct ZoomPanHandle {
    controller: SharedController,
    listeners: Vec<EventListener>,
}

impl ZoomPanHandle {
    /// Unsubscribe all listeners and restore the element to its pre-attach state.
    pub fn detach(self) -> WebResult<SvgsvgElement> {
        let controller = Rc::clone(&self.controller);
        drop(self);
        let controller = Rc::try_unwrap(controller)
            .map_err(|_| WebError::Dom("Controller still in use".to_string()))?
            .into_inner();
        let surface = controller.teardown()?;
        log::info!("Pan/zoom detached");
        Ok(surface.element().clone())
    }

    /// Run `f` with the controller, e.g. to inspect the current view.
    pub fn with_controller<R>(&self, f: impl FnOnce(&ViewController<SvgSurface>) -> R) -> R {
        f(&self.controller.borrow())
    }

    /// The group drawing must go into to follow the view (transform mode only).
    pub fn viewport(&self) -> Option<Element> {
        self.with_controller(|controller| controller.surface().viewport().cloned())
    }
}

impl Drop for ZoomPanHandle {
    fn drop(&mut self) {
        self.listeners.clear();
        let Ok(controller) = self.controller.try_borrow() else {
            return;
        };
        if let Err(err) = controller.surface().element().remove_attribute(READY_ATTRIBUTE) {
            log::warn!("Failed to clear {READY_ATTRIBUTE}: {:?}", err);
        }
    }
}

/// Attach pan/zoom to an `<svg>` element.
///
/// Returns `None` without touching the element when a live handle is
/// already attached to it. An element whose handle was dropped without
/// `detach` is picked up with its current view.
pub fn attach(svg: SvgsvgElement, options: ZoomPanOptions) -> WebResult<Option<ZoomPanHandle>> {
    if svg.has_attribute(READY_ATTRIBUTE) {
        log::warn!("Pan/zoom already attached, ignoring");
        return Ok(None);
    }
    let window = web_sys::window().ok_or(WebError::NoWindow)?;

    let convention = select_convention(&window, options.wheel_convention);
    let options = ZoomPanOptions { wheel_convention: convention, ..options };
    let stop_on_leave = options.stop_pan_on_mouse_out;
    let wheel_scope = options.wheel_scope;

    let controller = ViewController::initialize(SvgSurface::new(svg.clone()), options)?;
    let controller: SharedController = Rc::new(RefCell::new(controller));

    let mut listeners = vec![
        listen(&svg, "mousedown", &controller, |controller, event| {
            match pointer_position(controller, event) {
                Some(position) => controller.on_pointer_down(position, pointer_target(event)),
                None => EventResponse::IGNORED,
            }
        }),
        listen(&svg, "mousemove", &controller, |controller, event| {
            match pointer_position(controller, event) {
                Some(position) => controller.on_pointer_move(position),
                None => EventResponse::IGNORED,
            }
        }),
        listen(&svg, "mouseup", &controller, |controller, event| {
            match pointer_position(controller, event) {
                Some(position) => controller.on_pointer_up(position),
                None => EventResponse::IGNORED,
            }
        }),
    ];
    if stop_on_leave {
        listeners.push(listen(&svg, "mouseleave", &controller, |controller, event| {
            match pointer_position(controller, event) {
                Some(position) => controller.on_pointer_leave(position),
                None => EventResponse::IGNORED,
            }
        }));
    }

    let wheel_target: &EventTarget = match wheel_scope {
        WheelScope::Canvas => &svg,
        WheelScope::Document => &window,
    };
    listeners.push(listen(
        wheel_target,
        convention.event_name(),
        &controller,
        |controller, event| match pointer_position(controller, event) {
            Some(position) => controller.on_wheel(position, &raw_wheel(event)),
            None => EventResponse::IGNORED,
        },
    ));

    log::info!(
        "Pan/zoom attached ({} listeners, wheel via {})",
        listeners.len(),
        convention.event_name()
    );
    Ok(Some(ZoomPanHandle { controller, listeners }))
}

/// Resolve `Auto` to a concrete convention for this browser.
fn select_convention(window: &Window, requested: WheelConvention) -> WheelConvention {
    if requested != WheelConvention::Auto {
        return requested;
    }
    if Reflect::has(window, &JsValue::from_str("onwheel")).unwrap_or(false) {
        return WheelConvention::Standard;
    }
    window
        .navigator()
        .user_agent()
        .map(|user_agent| WheelConvention::for_user_agent(&user_agent))
        .unwrap_or(WheelConvention::Detail)
}

fn listen<F>(
    target: &EventTarget,
    event_type: &'static str,
    controller: &SharedController,
    handler: F,
) -> EventListener
where
    F: Fn(&mut ViewController<SvgSurface>, &Event) -> EventResponse + 'static,
{
    let controller = Rc::clone(controller);
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Ok(mut controller) = controller.try_borrow_mut() else {
                return;
            };
            if handler(&mut controller, event).prevent_default {
                event.prevent_default();
            }
        },
    )
}

fn pointer_position(controller: &ViewController<SvgSurface>, event: &Event) -> Option<Point> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(
        controller
            .surface()
            .to_local(f64::from(event.client_x()), f64::from(event.client_y())),
    )
}

fn pointer_target(event: &Event) -> PointerTarget {
    match event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
        Some(element) if is_canvas_tag(&element.tag_name()) => PointerTarget::Canvas,
        _ => PointerTarget::Element,
    }
}

/// Read every wheel field the event carries.
fn raw_wheel(event: &Event) -> RawWheel {
    let wheel_delta = Reflect::get(event, &JsValue::from_str("wheelDelta"))
        .ok()
        .and_then(|value| value.as_f64())
        .filter(|value| *value != 0.0);
    let detail = if event.type_() == "DOMMouseScroll" {
        event.dyn_ref::<UiEvent>().map(|event| f64::from(event.detail()))
    } else {
        None
    };
    let (delta_y, delta_mode) = match event.dyn_ref::<WheelEvent>() {
        Some(wheel) => (Some(wheel.delta_y()), DeltaMode::from_dom(wheel.delta_mode())),
        None => (None, DeltaMode::Pixel),
    };
    RawWheel { wheel_delta, detail, delta_y, delta_mode }
}
