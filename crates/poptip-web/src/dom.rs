#![forbid(unsafe_code)]

//! [`Host`] over the browser DOM.
//!
//! Subscriptions are `gloo-events` listeners: dropping one removes the DOM
//! listener, so [`Host::release`] is just a drop. Listener callbacks reach
//! their tooltip through a `Weak`, and skip the event if the tooltip is
//! already borrowed further up the stack.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use poptip::{Host, Tooltip, parse_css_px};
use poptip_layout::{Rect, Size, Viewport};
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Window};

pub(crate) type SharedTooltip = Rc<RefCell<Tooltip<DomHost>>>;
type WeakTooltip = Weak<RefCell<Tooltip<DomHost>>>;

/// Run `f` against the tooltip behind `owner`, if it is still alive and
/// not already borrowed.
pub(crate) fn with_tooltip(owner: &WeakTooltip, f: impl FnOnce(&mut Tooltip<DomHost>)) {
    let Some(shared) = owner.upgrade() else {
        return;
    };
    let Ok(mut tooltip) = shared.try_borrow_mut() else {
        trace!(message = "tooltip.reentrant_event");
        return;
    };
    f(&mut tooltip);
}

/// Browser document host.
pub struct DomHost {
    window: Window,
    document: Document,
    owner: WeakTooltip,
}

impl DomHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            owner: Weak::new(),
        }
    }

    /// Point listener callbacks at the tooltip that owns this host.
    pub(crate) fn bind(&mut self, owner: WeakTooltip) {
        self.owner = owner;
    }

    fn margins(&self, node: &Element) -> (f64, f64) {
        let style: Option<CssStyleDeclaration> = self.window.get_computed_style(node).ok().flatten();
        let Some(style) = style else {
            return (0.0, 0.0);
        };
        let read = |property: &str| {
            style
                .get_property_value(property)
                .map(|value| parse_css_px(&value))
                .unwrap_or(0.0)
        };
        (
            read("margin-left") + read("margin-right"),
            read("margin-top") + read("margin-bottom"),
        )
    }
}

impl Host for DomHost {
    type Node = Element;
    type Subscription = Vec<EventListener>;

    fn is_element(&self, node: &Element) -> bool {
        node.is_instance_of::<Element>()
    }

    fn same_node(&self, a: &Element, b: &Element) -> bool {
        let b: &web_sys::Node = b;
        a.is_same_node(Some(b))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_node(&mut self) -> Option<Element> {
        match self.document.create_element("div") {
            Ok(node) => Some(node),
            Err(err) => {
                warn!(message = "tooltip.create_failed", error = ?err);
                None
            }
        }
    }

    fn set_content(&mut self, node: &Element, markup: &str) {
        node.set_inner_html(markup);
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!(message = "tooltip.class_failed", class, error = ?err);
        }
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            warn!(message = "tooltip.class_failed", class, error = ?err);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = element.style().set_property(property, value) {
            warn!(message = "tooltip.style_failed", property, error = ?err);
        }
    }

    fn append(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            warn!(message = "tooltip.append_failed", error = ?err);
        }
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::from_edges(rect.left(), rect.top(), rect.right(), rect.bottom())
    }

    fn outer_size(&self, node: &Element) -> Size {
        let (width, height) = node.dyn_ref::<HtmlElement>().map_or((0.0, 0.0), |element| {
            (
                f64::from(element.offset_width()),
                f64::from(element.offset_height()),
            )
        });
        let (margin_x, margin_y) = self.margins(node);
        Size::new(width + margin_x, height + margin_y)
    }

    fn viewport(&self) -> Viewport {
        let scroll_x = self.window.scroll_x().unwrap_or(0.0);
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let (width, height) = self
            .document
            .document_element()
            .map_or((0.0, 0.0), |root| {
                (f64::from(root.client_width()), f64::from(root.client_height()))
            });
        Viewport::new(width, height).scrolled(scroll_x, scroll_y)
    }

    fn watch_viewport(&mut self) -> Vec<EventListener> {
        let on_resize = self.owner.clone();
        let on_scroll = self.owner.clone();
        vec![
            EventListener::new(&self.window, "resize", move |_| {
                with_tooltip(&on_resize, |tooltip| tooltip.on_viewport_change());
            }),
            EventListener::new(&self.document, "scroll", move |_| {
                with_tooltip(&on_scroll, |tooltip| tooltip.on_viewport_change());
            }),
        ]
    }

    fn watch_close(&mut self, button: &Element) -> Vec<EventListener> {
        let owner = self.owner.clone();
        vec![EventListener::new(button, "click", move |_| {
            with_tooltip(&owner, |tooltip| tooltip.on_close());
        })]
    }

    fn release(&mut self, subscription: Vec<EventListener>) {
        drop(subscription);
    }
}
