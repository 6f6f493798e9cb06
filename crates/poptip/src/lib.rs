#![forbid(unsafe_code)]

//! Anchored tooltips.
//!
//! A [`Tooltip`] binds content to a trigger element. The configured
//! activation event on the trigger shows it; the same event anywhere else
//! hides it. While visible it keeps its floating node positioned next to
//! the trigger through window resizes and document scrolls, marking the
//! node `{name}-unfit` whenever it had to be pushed back into the
//! viewport.
//!
//! The component is host-agnostic. It talks to its document through the
//! [`Host`] trait: `poptip-web` implements it over `web-sys`, and
//! [`HeadlessDocument`] implements it in memory for native use and tests.
//! Geometry lives in `poptip-layout`.

pub mod classes;
pub mod config;
pub mod error;
pub mod headless;
pub mod host;
pub mod merge;
pub mod slot;
pub mod tooltip;

pub use classes::ClassNames;
pub use config::{DEFAULT_EVENT, DEFAULT_NAME, TooltipConfig, TooltipOptions};
pub use error::TooltipError;
pub use headless::{HeadlessDocument, ListenerKind, Margins, NodeId};
pub use host::{Host, parse_css_px};
pub use merge::{deep_merge, merge_layers};
pub use slot::GlobalSlot;
pub use tooltip::{Dispatch, Tooltip};

pub use poptip_layout::{Placement, Position, Rect, Size, Viewport};
