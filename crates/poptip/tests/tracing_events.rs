#![cfg(feature = "tracing")]

//! Lifecycle transitions are visible through tracing.

use std::sync::{Arc, Mutex};

use poptip::{HeadlessDocument, Rect, Tooltip, TooltipConfig, Viewport};
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Clone, Default)]
struct MessageCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MessageCapture {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("capture lock").clone()
    }
}

struct MessageVisitor(Option<String>);

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" && self.0.is_none() {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: Subscriber> Layer<S> for MessageCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.messages.lock().expect("capture lock").push(message);
        }
    }
}

#[test]
fn lifecycle_emits_named_events() {
    let capture = MessageCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let doc = HeadlessDocument::new(Viewport::new(800.0, 600.0));
        let trigger = doc.create_element("button");
        doc.set_rect(trigger, Rect::new(0.0, 10.0, 20.0, 20.0));
        let mut tooltip =
            Tooltip::new(TooltipConfig::new(trigger, "Hi").unwrap(), doc.clone()).unwrap();

        tooltip.show();
        doc.set_rect(trigger, Rect::new(0.0, -50.0, 20.0, 20.0));
        tooltip.calc();
    });

    let messages = capture.messages();
    for expected in [
        "tooltip.show",
        "tooltip.calc",
        "tooltip.unfit",
        "tooltip.auto_hide",
        "tooltip.hide",
    ] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected} in {messages:?}"
        );
    }
}
