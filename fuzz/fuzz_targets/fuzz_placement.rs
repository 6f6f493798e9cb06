#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use poptip_layout::{Position, Rect, Size, Viewport, place, trigger_out_of_view};

#[derive(Debug, Arbitrary)]
struct Input {
    side: u8,
    trigger: [i16; 4],
    scroll: [u16; 2],
    viewport: [u16; 2],
    size: [u16; 2],
}

fuzz_target!(|input: Input| {
    let position = Position::ALL[usize::from(input.side % 4)];
    let [x, y, w, h] = input.trigger.map(f64::from);
    let trigger = Rect::new(x, y, w.abs(), h.abs());
    let viewport = Viewport::new(
        f64::from(input.viewport[0].max(1)),
        f64::from(input.viewport[1].max(1)),
    )
    .scrolled(f64::from(input.scroll[0]), f64::from(input.scroll[1]));
    let size = Size::new(f64::from(input.size[0]), f64::from(input.size[1]));

    let placement = place(position, trigger, viewport, size);
    assert!(placement.top.is_finite() && placement.left.is_finite());

    // A box that fits the viewport always lands inside it.
    if size.width <= viewport.width && size.height <= viewport.height {
        assert!(
            viewport.bounds().contains_rect(&placement.rect(size)),
            "{placement:?}"
        );
    }

    let inside = trigger.left() >= 0.0
        && trigger.top() >= 0.0
        && trigger.right() <= viewport.width
        && trigger.bottom() <= viewport.height;
    if inside {
        assert!(!trigger_out_of_view(trigger, viewport));
    }
});
