#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use js_sys::{Function, Object, Reflect};
use poptip_web::{WebTooltip, install};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("document")
}

fn button(label: &str) -> HtmlElement {
    let document = document();
    let button = document
        .create_element("button")
        .expect("create button")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    button.set_inner_text(label);
    document
        .body()
        .expect("body")
        .append_child(&button)
        .expect("append button");
    button
}

fn options(pairs: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in pairs {
        Reflect::set(&object, &JsValue::from_str(key), value).expect("set option");
    }
    object.into()
}

fn error_message(err: JsValue) -> String {
    err.dyn_into::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_default()
}

#[wasm_bindgen_test]
fn show_mounts_node_with_classes() {
    let trigger = button("Save");
    let tooltip = WebTooltip::new(options(&[
        ("trigger", trigger.clone().into()),
        ("content", JsValue::from_str("Saved")),
        ("position", JsValue::from_str("bottom")),
    ]))
    .expect("construct");

    assert!(!tooltip.state());
    tooltip.show();
    assert!(tooltip.state());

    let node = tooltip.node().expect("node while visible");
    let classes = node.class_list();
    assert!(classes.contains("tooltip"));
    assert!(classes.contains("tooltip-bottom"));
    assert_eq!(node.inner_html(), "Saved");

    tooltip.hide();
    assert!(!tooltip.state());
    assert!(tooltip.node().is_none());
    trigger.remove();
}

#[wasm_bindgen_test]
fn trigger_click_shows_and_body_click_hides() {
    let trigger = button("Info");
    let tooltip = WebTooltip::new(options(&[
        ("trigger", trigger.clone().into()),
        ("content", JsValue::from_str("More")),
    ]))
    .expect("construct");

    trigger.click();
    assert!(tooltip.state());
    let node = tooltip.node().expect("node");

    // Clicking the trigger again keeps the same node.
    trigger.click();
    assert!(tooltip.state());
    assert!(tooltip.node().is_some_and(|again| again.is_same_node(Some(&node))));

    node.dyn_ref::<HtmlElement>().expect("html element").click();
    assert!(tooltip.state());

    document().body().expect("body").click();
    assert!(!tooltip.state());
    trigger.remove();
}

#[wasm_bindgen_test]
fn trigger_back_reference_shares_state() {
    let trigger = button("Back-ref");
    let tooltip = WebTooltip::new(options(&[
        ("trigger", trigger.clone().into()),
        ("content", JsValue::from_str("Linked")),
    ]))
    .expect("construct");

    let handle = Reflect::get(&trigger, &JsValue::from_str("tooltip")).expect("property");
    assert!(handle.is_object());
    let state = || {
        Reflect::get(&handle, &JsValue::from_str("state"))
            .expect("state getter")
            .as_bool()
            .expect("boolean state")
    };
    assert!(!state());

    tooltip.show();
    assert!(state());

    let hide = Reflect::get(&handle, &JsValue::from_str("hide"))
        .expect("hide method")
        .dyn_into::<Function>()
        .expect("function");
    hide.call0(&handle).expect("hide through the back-reference");
    assert!(!tooltip.state());
    trigger.remove();
}

#[wasm_bindgen_test]
fn close_button_hides() {
    let trigger = button("Closable");
    let tooltip = WebTooltip::new(options(&[
        ("trigger", trigger.clone().into()),
        ("content", JsValue::from_str("Dismiss me")),
        ("close", JsValue::TRUE),
    ]))
    .expect("construct");

    tooltip.show();
    let node = tooltip.node().expect("node");
    let close = node
        .query_selector(".tooltip-close")
        .expect("query")
        .expect("close button")
        .dyn_into::<HtmlElement>()
        .expect("html element");
    close.click();
    assert!(!tooltip.state());
    trigger.remove();
}

#[wasm_bindgen_test]
fn missing_content_is_rejected() {
    let trigger = button("Empty");
    let err = WebTooltip::new(options(&[("trigger", trigger.clone().into())]))
        .err()
        .expect("construction should fail");
    assert_eq!(error_message(err), "tooltip content must be non-empty");
    trigger.remove();
}

#[wasm_bindgen_test]
fn non_element_trigger_is_rejected() {
    let err = WebTooltip::new(options(&[
        ("trigger", JsValue::from_str("#save")),
        ("content", JsValue::from_str("Saved")),
    ]))
    .err()
    .expect("construction should fail");
    assert_eq!(error_message(err), "tooltip trigger must be an element");
}

fn global_key() -> JsValue {
    JsValue::from_str("Tooltip")
}

#[wasm_bindgen_test]
fn install_refuses_a_taken_global() {
    let global = js_sys::global();
    let existing: JsValue = Object::new().into();
    Reflect::set(&global, &global_key(), &existing).expect("seed global");

    let err = install(Function::new_no_args("").into()).expect_err("global is taken");
    assert_eq!(error_message(err), "Tooltip is already defined or occupied");
    let after = Reflect::get(&global, &global_key()).expect("read global");
    assert!(Object::is(&after, &existing));

    Reflect::delete_property(&global, &global_key()).expect("clear global");
}

#[wasm_bindgen_test]
fn install_claims_the_global_once() {
    let global = js_sys::global();
    Reflect::delete_property(&global, &global_key()).expect("clear global");

    let constructor: JsValue = Function::new_no_args("").into();
    install(constructor.clone()).expect("first install");
    let published = Reflect::get(&global, &global_key()).expect("read global");
    assert!(Object::is(&published, &constructor));

    let err = install(constructor.clone()).expect_err("second install");
    assert_eq!(error_message(err), "Tooltip is already defined or occupied");

    // Clearing the global does not reopen the slot.
    Reflect::delete_property(&global, &global_key()).expect("clear global");
    let err = install(constructor).expect_err("slot stays claimed");
    assert_eq!(error_message(err), "Tooltip is already defined or occupied");
}
