#![forbid(unsafe_code)]

//! Placement geometry for floating boxes anchored to a trigger.
//!
//! Everything here is pure arithmetic on CSS pixels. The document model is
//! kept out on purpose: callers measure the trigger, the viewport and the
//! floating box, hand the numbers to [`place`], and apply the returned
//! [`Placement`] however their host allows.

pub mod geometry;
pub mod placement;

pub use geometry::{Rect, Size, Viewport};
pub use placement::{ParsePositionError, Placement, Position, place, trigger_out_of_view};
