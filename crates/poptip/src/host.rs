#![forbid(unsafe_code)]

//! The document seam.
//!
//! A [`Tooltip`](crate::Tooltip) never touches a DOM directly. It asks a
//! [`Host`] to create and decorate nodes, to measure geometry and to watch
//! for viewport changes. The browser binding implements this over
//! `web-sys`; [`HeadlessDocument`](crate::HeadlessDocument) implements it
//! in memory.

use poptip_layout::{Rect, Size, Viewport};

/// Operations a tooltip needs from its document.
///
/// Mutating calls are best effort: a host that cannot perform one should
/// log and carry on, since none of the tooltip operations can fail.
pub trait Host {
    /// Handle to a node in the host document.
    type Node: Clone + core::fmt::Debug;
    /// Live listener registration. Passing it to [`Host::release`] (or
    /// dropping it, for hosts with RAII listeners) unregisters it.
    type Subscription;

    /// Whether `node` is a genuine element of this document.
    fn is_element(&self, node: &Self::Node) -> bool;

    /// Identity comparison.
    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool;

    /// The document body, the default parent for floating nodes.
    fn body(&self) -> Option<Self::Node>;

    /// Create a detached block element.
    fn create_node(&mut self) -> Option<Self::Node>;

    /// Replace the node's markup.
    fn set_content(&mut self, node: &Self::Node, markup: &str);

    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Set an inline style property.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    fn append(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detach the node from the document and discard it with its
    /// children. The handle is not used again afterwards.
    fn remove(&mut self, node: &Self::Node);

    /// Viewport-relative bounding rectangle.
    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Rendered size with margins added.
    fn outer_size(&self, node: &Self::Node) -> Size;

    /// Current scroll offsets and client dimensions.
    fn viewport(&self) -> Viewport;

    /// Watch window resize and document scroll; each change must end up in
    /// [`Tooltip::on_viewport_change`](crate::Tooltip::on_viewport_change).
    fn watch_viewport(&mut self) -> Self::Subscription;

    /// Watch activation of a close button; each activation must end up in
    /// [`Tooltip::on_close`](crate::Tooltip::on_close).
    fn watch_close(&mut self, button: &Self::Node) -> Self::Subscription;

    /// Unregister a subscription.
    fn release(&mut self, subscription: Self::Subscription);
}

/// Read the leading integer of a CSS length the way `parseInt` does.
///
/// `"12px"` is 12, `"4.7px"` is 4, `"-3px"` is -3, and anything without
/// leading digits (`"auto"`, `""`) is 0.
pub fn parse_css_px(value: &str) -> f64 {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1.0, &value[1..]),
        Some(b'+') => (1.0, &value[1..]),
        _ => (1.0, value),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<f64>()
        .map(|n| sign * n)
        .unwrap_or(0.0)
}

/// Format a pixel length for an inline style.
pub(crate) fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_css_px_truncates_like_parse_int() {
        assert_eq!(parse_css_px("12px"), 12.0);
        assert_eq!(parse_css_px("4.7px"), 4.0);
        assert_eq!(parse_css_px("-3px"), -3.0);
        assert_eq!(parse_css_px("  8px"), 8.0);
        assert_eq!(parse_css_px("0"), 0.0);
    }

    #[test]
    fn parse_css_px_without_digits_is_zero() {
        assert_eq!(parse_css_px("auto"), 0.0);
        assert_eq!(parse_css_px(""), 0.0);
        assert_eq!(parse_css_px("-"), 0.0);
        assert_eq!(parse_css_px("px"), 0.0);
    }

    #[test]
    fn px_formats_whole_and_fractional_values() {
        assert_eq!(px(12.0), "12px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-40.0), "-40px");
    }
}
