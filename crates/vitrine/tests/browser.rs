//! Browser tests - run with `wasm-pack test --headless --chrome crates/vitrine`

#![cfg(target_arch = "wasm32")]

use vitrine::App;
use wasm_bindgen_test::*;
use web_sys::{window, Document, Element, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    window().and_then(|w| w.document()).expect("browser document")
}

fn mount(tag: &str, id: &str) -> Element {
    let document = document();
    let element = document.create_element(tag).expect("create element");
    element.set_id(id);
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

fn space() -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_code("Space");
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("keyboard event")
}

#[wasm_bindgen_test]
fn test_space_outside_canvas_is_ignored() {
    let canvas = mount("canvas", "showcase-canvas");
    let input = mount("input", "search");
    let app = App::new(None).expect("app attaches");
    assert_eq!(canvas.get_attribute("tabindex").as_deref(), Some("0"));

    let typed = space();
    input.dispatch_event(&typed).expect("dispatch");
    window().expect("window").dispatch_event(&space()).expect("dispatch");
    assert_eq!(app.active_effects(), 0);
    assert!(!typed.default_prevented());

    let pressed = space();
    canvas.dispatch_event(&pressed).expect("dispatch");
    assert_eq!(app.active_effects(), 1);
    assert!(pressed.default_prevented());

    drop(app);
    canvas.remove();
    input.remove();
}
