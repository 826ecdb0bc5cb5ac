#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, SvgsvgElement, WheelEvent, WheelEventInit};
use zoompan_core::{ViewMode, ZoomPanOptions};
use zoompan_web::attach;
use zoompan_web::attrs::{READY_ATTRIBUTE, SVG_NS, VIEWPORT_ID};

wasm_bindgen_test_configure!(run_in_browser);

fn make_svg() -> SvgsvgElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let svg: SvgsvgElement = document
        .create_element_ns(Some(SVG_NS), "svg")
        .unwrap()
        .dyn_into()
        .unwrap();
    svg.set_attribute("width", "400").unwrap();
    svg.set_attribute("height", "300").unwrap();
    svg.set_attribute("style", "position: absolute; left: 0; top: 0").unwrap();
    let rect = document.create_element_ns(Some(SVG_NS), "rect").unwrap();
    rect.set_attribute("width", "50").unwrap();
    rect.set_attribute("height", "50").unwrap();
    svg.append_child(&rect).unwrap();
    document.body().unwrap().append_child(&svg).unwrap();
    svg
}

fn viewport_groups(svg: &SvgsvgElement) -> u32 {
    svg.query_selector_all(&format!("g#{VIEWPORT_ID}")).unwrap().length()
}

fn view_box_options() -> ZoomPanOptions {
    ZoomPanOptions::default().with_mode(ViewMode::ViewBox)
}

/// Where the browser draws the view point under client `(x, y)`.
fn rendered_view_point(svg: &SvgsvgElement, x: f64, y: f64) -> (f64, f64) {
    let ctm = svg.get_screen_ctm().unwrap();
    let scale_x = f64::from(ctm.a());
    let scale_y = f64::from(ctm.d());
    ((x - f64::from(ctm.e())) / scale_x, (y - f64::from(ctm.f())) / scale_y)
}

fn wheel(svg: &SvgsvgElement, client_x: i32, client_y: i32, delta_y: f64) {
    let init = WheelEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(client_x);
    init.set_client_y(client_y);
    init.set_delta_y(delta_y);
    let event = WheelEvent::new_with_event_init_dict("wheel", &init).unwrap();
    svg.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn view_box_mode_pins_alignment_and_restores_it() {
    let svg = make_svg();
    let handle = attach(svg.clone(), view_box_options()).unwrap().unwrap();
    assert_eq!(svg.get_attribute("viewBox").as_deref(), Some("0 0 400 1"));
    assert_eq!(svg.get_attribute("preserveAspectRatio").as_deref(), Some("xMinYMin meet"));

    handle.detach().unwrap();
    assert_eq!(svg.get_attribute("viewBox"), None);
    assert_eq!(svg.get_attribute("preserveAspectRatio"), None);
    svg.remove();
}

#[wasm_bindgen_test]
fn view_box_zoom_stays_under_pointer_as_rendered() {
    let svg = make_svg();
    let options = ZoomPanOptions { mouse_wheel_sensitivity: 30.0, ..view_box_options() };
    let handle = attach(svg.clone(), options).unwrap().unwrap();

    let before = rendered_view_point(&svg, 200.0, 20.0);
    wheel(&svg, 200, 20, -100.0);
    assert_ne!(svg.get_attribute("viewBox").as_deref(), Some("0 0 400 1"));
    let after = rendered_view_point(&svg, 200.0, 20.0);

    assert!((before.0 - after.0).abs() < 1e-3, "{before:?} vs {after:?}");
    assert!((before.1 - after.1).abs() < 1e-3, "{before:?} vs {after:?}");
    handle.detach().unwrap();
    svg.remove();
}

#[wasm_bindgen_test]
fn second_attach_is_noop() {
    let svg = make_svg();
    let first = attach(svg.clone(), ZoomPanOptions::default()).unwrap();
    assert!(first.is_some());
    assert!(attach(svg.clone(), ZoomPanOptions::default()).unwrap().is_none());
    assert_eq!(viewport_groups(&svg), 1);
    svg.remove();
}

#[wasm_bindgen_test]
fn dropped_handle_allows_reattach() {
    let svg = make_svg();
    drop(attach(svg.clone(), ZoomPanOptions::default()).unwrap());
    assert!(!svg.has_attribute(READY_ATTRIBUTE));

    let handle = attach(svg.clone(), ZoomPanOptions::default()).unwrap();
    assert!(handle.is_some());
    assert!(svg.has_attribute(READY_ATTRIBUTE));
    assert_eq!(viewport_groups(&svg), 1);
    svg.remove();
}

#[wasm_bindgen_test]
fn viewport_receives_later_drawing() {
    let svg = make_svg();
    let handle = attach(svg.clone(), ZoomPanOptions::default()).unwrap().unwrap();
    let viewport: Element = handle.viewport().unwrap();
    assert_eq!(viewport.id(), VIEWPORT_ID);
    assert_eq!(viewport.child_element_count(), 1);

    let document = web_sys::window().unwrap().document().unwrap();
    let circle = document.create_element_ns(Some(SVG_NS), "circle").unwrap();
    viewport.append_child(&circle).unwrap();
    wheel(&svg, 10, 10, -100.0);
    assert!(circle.parent_element().unwrap().get_attribute("transform").is_some());

    handle.detach().unwrap();
    assert_eq!(circle.parent_element().map(|parent| parent.tag_name()), Some("svg".to_string()));
    svg.remove();
}

#[wasm_bindgen_test]
fn view_box_mode_has_no_viewport() {
    let svg = make_svg();
    let handle = attach(svg.clone(), view_box_options()).unwrap().unwrap();
    assert!(handle.viewport().is_none());
    handle.detach().unwrap();
    svg.remove();
}
