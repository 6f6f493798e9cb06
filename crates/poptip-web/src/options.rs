#![forbid(unsafe_code)]

//! Reading a JS options object into typed options.
//!
//! The JS side hands over an arbitrary object. Only the scalar keys below
//! are read; `trigger` and `parent` are element references and are taken
//! separately. Values are lifted into a JSON layer and deep-merged over the
//! defaults, so type errors surface as [`TooltipError::InvalidOptions`].

use poptip::{TooltipError, TooltipOptions};
use serde_json::{Map, Number, Value};

/// Scalar option keys read from the JS object.
pub const OPTION_KEYS: [&str; 5] = ["content", "event", "position", "close", "name"];

/// A JS property value reduced to what an option can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// `undefined` or missing: keep the default.
    Absent,
    Null,
    Text(String),
    Flag(bool),
    Number(f64),
    /// Objects, functions and anything else.
    Other,
}

impl OptionValue {
    /// The JSON value to merge, or `None` to keep the default.
    pub fn into_json(self) -> Option<Value> {
        match self {
            OptionValue::Absent => None,
            OptionValue::Null => Some(Value::Null),
            OptionValue::Text(text) => Some(Value::String(text)),
            OptionValue::Flag(flag) => Some(Value::Bool(flag)),
            OptionValue::Number(n) => Some(Number::from_f64(n).map_or(Value::Null, Value::Number)),
            OptionValue::Other => Some(Value::Object(Map::new())),
        }
    }
}

/// Build the override layer by reading each known key.
pub fn collect_overrides<F>(mut read: F) -> Value
where
    F: FnMut(&str) -> OptionValue,
{
    let mut layer = Map::new();
    for key in OPTION_KEYS {
        if let Some(value) = read(key).into_json() {
            layer.insert(key.to_owned(), value);
        }
    }
    Value::Object(layer)
}

/// Read, merge over defaults and parse.
pub fn resolve_options<F>(read: F) -> Result<TooltipOptions, TooltipError>
where
    F: FnMut(&str) -> OptionValue,
{
    TooltipOptions::resolve(&collect_overrides(read))
}
