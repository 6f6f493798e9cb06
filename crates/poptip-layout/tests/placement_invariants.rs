//! Property checks for anchored placement.
//!
//! Inputs are whole pixels so every intermediate value is exactly
//! representable and edge comparisons stay exact.

use poptip_layout::{Position, Rect, Size, Viewport, place, trigger_out_of_view};
use proptest::prelude::*;

fn position() -> impl Strategy<Value = Position> {
    prop::sample::select(Position::ALL.to_vec())
}

fn viewport() -> impl Strategy<Value = Viewport> {
    (0i32..5_000, 0i32..5_000, 200i32..2_000, 200i32..2_000).prop_map(|(sx, sy, w, h)| {
        Viewport::new(f64::from(w), f64::from(h)).scrolled(f64::from(sx), f64::from(sy))
    })
}

fn trigger() -> impl Strategy<Value = Rect> {
    (-3_000i32..3_000, -3_000i32..3_000, 0i32..400, 0i32..400).prop_map(|(x, y, w, h)| {
        Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    })
}

fn small_size() -> impl Strategy<Value = Size> {
    (1i32..200, 1i32..200).prop_map(|(w, h)| Size::new(f64::from(w), f64::from(h)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn box_smaller_than_viewport_always_lands_inside(
        position in position(),
        trigger in trigger(),
        viewport in viewport(),
        size in small_size(),
    ) {
        let placement = place(position, trigger, viewport, size);
        prop_assert!(
            viewport.bounds().contains_rect(&placement.rect(size)),
            "placement {placement:?} escaped {:?}",
            viewport.bounds()
        );
    }

    #[test]
    fn unclamped_axes_keep_the_ideal_coordinate(
        position in position(),
        trigger in trigger(),
        viewport in viewport(),
        size in small_size(),
    ) {
        let placement = place(position, trigger, viewport, size);
        let unbounded = Viewport::new(1.0e9, 1.0e9).scrolled(-5.0e8, -5.0e8);
        let ideal = place(position, trigger, unbounded, size);
        prop_assert!(ideal.fit());

        let shift_x = viewport.scroll_x - unbounded.scroll_x;
        let shift_y = viewport.scroll_y - unbounded.scroll_y;
        if !placement.clamped_vertical {
            prop_assert_eq!(placement.top, ideal.top + shift_y);
        }
        if !placement.clamped_horizontal {
            prop_assert_eq!(placement.left, ideal.left + shift_x);
        }
    }

    #[test]
    fn trigger_fully_inside_viewport_is_never_out_of_view(
        viewport in viewport(),
        x in 0i32..200,
        y in 0i32..200,
        w in 0i32..100,
        h in 0i32..100,
    ) {
        let trigger = Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
        prop_assert!(!trigger_out_of_view(trigger, viewport));
    }

    #[test]
    fn trigger_above_viewport_is_out_of_view(
        viewport in viewport(),
        x in 0i32..200,
        bottom in -2_000i32..-1,
        h in 0i32..100,
    ) {
        let bottom = f64::from(bottom);
        let trigger = Rect::from_edges(f64::from(x), bottom - f64::from(h), f64::from(x) + 10.0, bottom);
        prop_assert!(trigger_out_of_view(trigger, viewport));
    }
}
