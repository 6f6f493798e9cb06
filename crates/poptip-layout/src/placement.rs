#![forbid(unsafe_code)]

//! Anchored placement with viewport clamping.
//!
//! [`place`] puts a box of known size on one side of a trigger rectangle,
//! centred on the trigger's cross axis, then clamps each axis into the
//! visible viewport independently. A clamp on either axis makes the result
//! "unfit"; hosts surface that as a class so the stylesheet can drop the
//! arrow or change the look.
//!
//! # Example
//!
//! ```
//! use poptip_layout::{Position, Rect, Size, Viewport, place};
//!
//! let trigger = Rect::new(100.0, 200.0, 40.0, 20.0);
//! let viewport = Viewport::new(800.0, 600.0);
//! let placement = place(Position::Top, trigger, viewport, Size::new(60.0, 30.0));
//!
//! assert_eq!(placement.top, 170.0);
//! assert_eq!(placement.left, 90.0);
//! assert!(placement.fit());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size, Viewport};

/// Which side of the trigger the box goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Above the trigger, horizontally centred.
    #[default]
    Top,
    /// Below the trigger, horizontally centred.
    Bottom,
    /// Left of the trigger, vertically centred.
    Left,
    /// Right of the trigger, vertically centred.
    Right,
}

impl Position {
    pub const ALL: [Position; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Lowercase name, used for the `{name}-{position}` class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether the box sits above or below the trigger.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown position name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError(pub String);

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown position `{}` (expected top, bottom, left or right)",
            self.0
        )
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParsePositionError(other.to_owned())),
        }
    }
}

/// Result of [`place`]: document-relative coordinates plus clamp flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Document-relative top edge of the box.
    pub top: f64,
    /// Document-relative left edge of the box.
    pub left: f64,
    /// The vertical coordinate was snapped into the viewport.
    pub clamped_vertical: bool,
    /// The horizontal coordinate was snapped into the viewport.
    pub clamped_horizontal: bool,
}

impl Placement {
    /// True when the box sits at its ideal coordinates on both axes.
    #[inline]
    pub const fn fit(&self) -> bool {
        !self.clamped_vertical && !self.clamped_horizontal
    }

    /// The placed box in document coordinates.
    pub fn rect(&self, size: Size) -> Rect {
        Rect::new(self.left, self.top, size.width, size.height)
    }
}

/// Place a box of `size` next to `trigger` inside `viewport`.
///
/// `trigger` is viewport-relative; the returned coordinates are
/// document-relative (scroll offsets added).
pub fn place(position: Position, trigger: Rect, viewport: Viewport, size: Size) -> Placement {
    let anchor = viewport.to_document(trigger);
    let bounds = viewport.bounds();

    let (top, left) = if position.is_vertical() {
        let left = anchor.center_x() - size.width / 2.0;
        match position {
            Position::Top => (anchor.top() - size.height, left),
            _ => (anchor.bottom(), left),
        }
    } else {
        let top = anchor.center_y() - size.height / 2.0;
        match position {
            Position::Left => (top, anchor.left() - size.width),
            _ => (top, anchor.right()),
        }
    };

    let (top, clamped_vertical) = clamp_axis(top, size.height, bounds.top(), bounds.bottom());
    let (left, clamped_horizontal) = clamp_axis(left, size.width, bounds.left(), bounds.right());

    Placement {
        top,
        left,
        clamped_vertical,
        clamped_horizontal,
    }
}

/// Snap `start` so `[start, start + extent]` stays inside `[min, max]`.
///
/// The near boundary wins: a box larger than the range is checked against
/// `min` first and only then against `max`.
fn clamp_axis(start: f64, extent: f64, min: f64, max: f64) -> (f64, bool) {
    if start < min {
        (min, true)
    } else if start + extent > max {
        (max - extent, true)
    } else {
        (start, false)
    }
}

/// True when the viewport-relative `trigger` has left the visible area
/// entirely on any side.
pub fn trigger_out_of_view(trigger: Rect, viewport: Viewport) -> bool {
    trigger.top() > viewport.height
        || trigger.bottom() < 0.0
        || trigger.left() > viewport.width
        || trigger.right() < 0.0
}
