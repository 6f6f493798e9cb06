#![forbid(unsafe_code)]

//! `wasm-bindgen` exports.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use gloo_events::EventListener;
use js_sys::Reflect;
use poptip::{GlobalSlot, Tooltip, TooltipConfig, TooltipError};
use tracing::{debug, error};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{DomHost, SharedTooltip, with_tooltip};
use crate::options::{OptionValue, resolve_options};

/// Global property the constructor is published under.
const GLOBAL_NAME: &str = "Tooltip";

static INSTALLED: GlobalSlot<&'static str> = GlobalSlot::new(GLOBAL_NAME);

fn console_error(msg: &str) {
    let global = js_sys::global();
    let console = Reflect::get(&global, &JsValue::from_str("console")).ok();
    let error = console
        .as_ref()
        .and_then(|console| Reflect::get(console, &JsValue::from_str("error")).ok())
        .and_then(|error| error.dyn_into::<js_sys::Function>().ok());
    if let (Some(console), Some(error)) = (console, error) {
        let _ = error.call1(&console, &JsValue::from_str(msg));
    }
}

/// Send panics to `console.error` and to the `tracing` subscriber, if any.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let payload = info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
                .unwrap_or("<non-string payload>");
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_default();
            error!(message = "tooltip.panic", payload, location = %location);
            console_error(&format!("poptip panicked at {location}: {payload}"));
        }));
    });
}

fn js_error(err: TooltipError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn read_option(options: &JsValue, key: &str) -> OptionValue {
    let Ok(value) = Reflect::get(options, &JsValue::from_str(key)) else {
        return OptionValue::Absent;
    };
    if value.is_undefined() {
        OptionValue::Absent
    } else if value.is_null() {
        OptionValue::Null
    } else if let Some(text) = value.as_string() {
        OptionValue::Text(text)
    } else if let Some(flag) = value.as_bool() {
        OptionValue::Flag(flag)
    } else if let Some(n) = value.as_f64() {
        OptionValue::Number(n)
    } else {
        OptionValue::Other
    }
}

fn read_element(options: &JsValue, key: &str) -> Option<Element> {
    Reflect::get(options, &JsValue::from_str(key))
        .ok()?
        .dyn_into::<Element>()
        .ok()
}

/// JS-facing tooltip.
///
/// ```js
/// const tip = new Tooltip({ trigger: button, content: "Copied", position: "bottom" });
/// tip.show();
/// ```
#[wasm_bindgen(js_name = Tooltip)]
#[derive(Clone)]
pub struct WebTooltip {
    inner: SharedTooltip,
    // Routes the configured event from the body; lives as long as any handle.
    _activation: Rc<EventListener>,
}

#[wasm_bindgen(js_class = Tooltip)]
impl WebTooltip {
    /// Build a tooltip from an options object with `trigger`, `content` and
    /// optionally `event`, `position`, `parent`, `close` and `name`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WebTooltip, JsValue> {
        install_panic_hook();

        let trigger = read_element(&options, "trigger")
            .ok_or_else(|| js_error(TooltipError::InvalidTrigger))?;
        let resolved = resolve_options(|key| read_option(&options, key)).map_err(js_error)?;
        let mut config =
            TooltipConfig::from_options(trigger.clone(), resolved).map_err(js_error)?;
        if let Some(parent) = read_element(&options, "parent") {
            config = config.parent(parent);
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no document body"))?;
        let event = config.event.clone();

        let tooltip = Tooltip::new(config, DomHost::new(window, document)).map_err(js_error)?;
        let inner: SharedTooltip = Rc::new(RefCell::new(tooltip));
        inner.borrow_mut().host_mut().bind(Rc::downgrade(&inner));

        let owner = Rc::downgrade(&inner);
        let activation = EventListener::new(&body, event.clone(), move |event| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok());
            with_tooltip(&owner, |tooltip| {
                tooltip.handle_event(target.as_ref());
            });
        });

        let handle = WebTooltip {
            inner,
            _activation: Rc::new(activation),
        };
        // `trigger.tooltip` is a second JS wrapper around the same shared
        // state, not the object `new Tooltip(...)` returned.
        let _ = Reflect::set(
            &trigger,
            &JsValue::from_str("tooltip"),
            &JsValue::from(handle.clone()),
        );
        debug!(message = "tooltip.created", event = %event);
        Ok(handle)
    }

    pub fn show(&self) {
        self.with(Tooltip::show);
    }

    pub fn hide(&self) {
        self.with(Tooltip::hide);
    }

    pub fn calc(&self) {
        self.with(Tooltip::calc);
    }

    /// True while the floating node is in the document.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> bool {
        self.inner
            .try_borrow()
            .is_ok_and(|tooltip| tooltip.is_visible())
    }

    /// The floating node, while visible.
    #[wasm_bindgen(getter)]
    pub fn node(&self) -> Option<Element> {
        self.inner
            .try_borrow()
            .ok()
            .and_then(|tooltip| tooltip.node().cloned())
    }

    #[wasm_bindgen(getter)]
    pub fn trigger(&self) -> Option<Element> {
        self.inner
            .try_borrow()
            .ok()
            .map(|tooltip| tooltip.config().trigger.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn position(&self) -> Option<String> {
        self.inner
            .try_borrow()
            .ok()
            .map(|tooltip| tooltip.config().position.to_string())
    }

    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_owned()
    }

    fn with(&self, f: impl FnOnce(&mut Tooltip<DomHost>)) {
        with_tooltip(&Rc::downgrade(&self.inner), f);
    }
}

/// Publish `constructor` as `globalThis.Tooltip`.
///
/// Fails if that global is already taken or this module has installed
/// itself before.
#[wasm_bindgen]
pub fn install(constructor: JsValue) -> Result<(), JsValue> {
    install_panic_hook();

    let global = js_sys::global();
    let key = JsValue::from_str(GLOBAL_NAME);
    let existing = Reflect::get(&global, &key).unwrap_or(JsValue::UNDEFINED);
    if existing.is_truthy() {
        return Err(js_error(INSTALLED.occupied()));
    }
    let version = INSTALLED
        .install(env!("CARGO_PKG_VERSION"))
        .map_err(js_error)?;
    Reflect::set(&global, &key, &constructor)?;
    debug!(message = "tooltip.installed", version = *version);
    Ok(())
}
