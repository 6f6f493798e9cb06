#![forbid(unsafe_code)]

//! Tooltip configuration.
//!
//! [`TooltipConfig`] is the validated, fully-defaulted form a [`Tooltip`]
//! is built from. [`TooltipOptions`] is the partial, deserialisable form:
//! every field optional, merged field by field or resolved from JSON
//! layers through [`merge_layers`].
//!
//! [`Tooltip`]: crate::Tooltip

use poptip_layout::Position;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::TooltipError;
use crate::merge::merge_layers;

/// Event that opens the tooltip unless configured otherwise.
pub const DEFAULT_EVENT: &str = "click";
/// Class-name prefix unless configured otherwise.
pub const DEFAULT_NAME: &str = "tooltip";

/// Partial tooltip options.
///
/// Unknown keys are ignored when deserialising, so a host can pass its
/// whole options object through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TooltipOptions {
    /// The built-in defaults, every field set.
    pub fn defaults() -> Self {
        Self {
            content: None,
            event: Some(DEFAULT_EVENT.to_owned()),
            position: Some(Position::default()),
            close: Some(false),
            name: Some(DEFAULT_NAME.to_owned()),
        }
    }

    /// The built-in defaults as a JSON layer.
    pub fn defaults_json() -> Value {
        json!({
            "event": DEFAULT_EVENT,
            "position": Position::default().as_str(),
            "close": false,
            "name": DEFAULT_NAME,
        })
    }

    /// Deep-merge `overrides` over the defaults and parse the result.
    pub fn resolve(overrides: &Value) -> Result<Self, TooltipError> {
        Self::from_value(merge_layers([Self::defaults_json(), overrides.clone()]))
    }

    /// Parse a JSON options document without applying defaults.
    pub fn from_value(value: Value) -> Result<Self, TooltipError> {
        serde_json::from_value(value).map_err(|err| TooltipError::InvalidOptions(err.to_string()))
    }

    /// Parse a JSON options string without applying defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TooltipError> {
        serde_json::from_str(json).map_err(|err| TooltipError::InvalidOptions(err.to_string()))
    }

    /// Field-by-field merge: any field set in `other` wins.
    #[must_use]
    pub fn merge(self, other: TooltipOptions) -> Self {
        Self {
            content: other.content.or(self.content),
            event: other.event.or(self.event),
            position: other.position.or(self.position),
            close: other.close.or(self.close),
            name: other.name.or(self.name),
        }
    }
}

/// Validated tooltip configuration.
///
/// `N` is the host's node handle; `parent` of `None` means the host's
/// document body.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipConfig<N> {
    pub trigger: N,
    pub content: String,
    pub event: String,
    pub position: Position,
    pub parent: Option<N>,
    pub close: bool,
    pub name: String,
}

impl<N> TooltipConfig<N> {
    /// Create a configuration with default event, position and name.
    pub fn new(trigger: N, content: impl Into<String>) -> Result<Self, TooltipError> {
        let content = content.into();
        if content.is_empty() {
            return Err(TooltipError::EmptyContent);
        }
        Ok(Self {
            trigger,
            content,
            event: DEFAULT_EVENT.to_owned(),
            position: Position::default(),
            parent: None,
            close: false,
            name: DEFAULT_NAME.to_owned(),
        })
    }

    /// Set the document-level event that opens the tooltip.
    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Set which side of the trigger the tooltip appears on.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Append the floating node to `parent` instead of the body.
    #[must_use]
    pub fn parent(mut self, parent: N) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Render a close button inside the tooltip.
    #[must_use]
    pub fn closable(mut self, close: bool) -> Self {
        self.close = close;
        self
    }

    /// Set the class-name prefix.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Apply every field set in `options`.
    pub fn with_options(mut self, options: TooltipOptions) -> Result<Self, TooltipError> {
        if let Some(content) = options.content {
            if content.is_empty() {
                return Err(TooltipError::EmptyContent);
            }
            self.content = content;
        }
        if let Some(event) = options.event {
            self.event = event;
        }
        if let Some(position) = options.position {
            self.position = position;
        }
        if let Some(close) = options.close {
            self.close = close;
        }
        if let Some(name) = options.name {
            self.name = name;
        }
        Ok(self)
    }

    /// Build a configuration from resolved options; content is required.
    pub fn from_options(trigger: N, options: TooltipOptions) -> Result<Self, TooltipError> {
        let content = options.content.clone().unwrap_or_default();
        Self::new(trigger, content)?.with_options(options)
    }
}
