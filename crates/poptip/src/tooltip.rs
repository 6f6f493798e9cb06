#![forbid(unsafe_code)]

//! The tooltip component.
//!
//! A [`Tooltip`] owns one trigger/content pair and, while visible, exactly
//! one floating node plus the listener registrations that keep it placed.
//! Everything that exists only while visible lives in a single
//! `Option<Mounted>`, so visibility, node and subscriptions cannot drift
//! apart.
//!
//! # Event routing
//!
//! The host forwards the configured document-level event to
//! [`Tooltip::handle_event`]:
//!
//! - target is the trigger: show,
//! - target is the floating node: ignore,
//! - anything else (including non-element targets): hide.
//!
//! # Example
//!
//! ```
//! use poptip::{Dispatch, HeadlessDocument, Tooltip, TooltipConfig};
//! use poptip_layout::{Rect, Viewport};
//!
//! let doc = HeadlessDocument::new(Viewport::new(800.0, 600.0));
//! let button = doc.create_element("button");
//! doc.set_rect(button, Rect::new(100.0, 100.0, 80.0, 24.0));
//!
//! let config = TooltipConfig::new(button, "Saved!").unwrap();
//! let mut tooltip = Tooltip::new(config, doc.clone()).unwrap();
//!
//! assert_eq!(tooltip.handle_event(Some(&button)), Dispatch::Show);
//! assert!(tooltip.is_visible());
//! assert_eq!(tooltip.handle_event(Some(&doc.body_id())), Dispatch::Hide);
//! assert!(!tooltip.is_visible());
//! ```

use poptip_layout::{place, trigger_out_of_view};

use crate::classes::ClassNames;
use crate::config::TooltipConfig;
use crate::error::TooltipError;
use crate::host::{Host, px};

/// What [`Tooltip::handle_event`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The trigger was hit; the tooltip is now visible.
    Show,
    /// Something outside was hit; the tooltip is now hidden.
    Hide,
    /// The floating node itself was hit; nothing changed.
    Ignored,
}

struct CloseButton<H: Host> {
    node: H::Node,
    subscription: H::Subscription,
}

struct Mounted<H: Host> {
    node: H::Node,
    viewport: H::Subscription,
    close: Option<CloseButton<H>>,
}

/// An anchored tooltip bound to one trigger.
pub struct Tooltip<H: Host> {
    config: TooltipConfig<H::Node>,
    classes: ClassNames,
    host: H,
    mounted: Option<Mounted<H>>,
}

impl<H: Host> core::fmt::Debug for Tooltip<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tooltip")
            .field("config", &self.config)
            .field("visible", &self.is_visible())
            .field("node", &self.node())
            .finish()
    }
}

impl<H: Host> Tooltip<H> {
    /// Bind a tooltip to its trigger.
    ///
    /// Fails if the host does not recognise the trigger as an element or the
    /// content is empty. The tooltip starts hidden.
    pub fn new(config: TooltipConfig<H::Node>, host: H) -> Result<Self, TooltipError> {
        if !host.is_element(&config.trigger) {
            return Err(TooltipError::InvalidTrigger);
        }
        if config.content.is_empty() {
            return Err(TooltipError::EmptyContent);
        }
        let classes = ClassNames::new(&config.name);
        Ok(Self {
            config,
            classes,
            host,
            mounted: None,
        })
    }

    /// Whether the floating node currently exists.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.mounted.is_some()
    }

    /// The floating node, while visible.
    pub fn node(&self) -> Option<&H::Node> {
        self.mounted.as_ref().map(|mounted| &mounted.node)
    }

    /// The close button, while visible and closable.
    pub fn close_button(&self) -> Option<&H::Node> {
        self.mounted
            .as_ref()
            .and_then(|mounted| mounted.close.as_ref())
            .map(|close| &close.node)
    }

    pub fn config(&self) -> &TooltipConfig<H::Node> {
        &self.config
    }

    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Create, place and start tracking the floating node. No-op when
    /// already visible.
    pub fn show(&mut self) {
        if self.mounted.is_some() {
            return;
        }
        let Some(parent) = self.config.parent.clone().or_else(|| self.host.body()) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(message = "tooltip.no_parent", name = %self.config.name);
            return;
        };
        let Some(node) = self.host.create_node() else {
            return;
        };

        self.host.set_content(&node, &self.config.content);
        self.host.add_class(&node, self.classes.base());
        self.host
            .add_class(&node, self.classes.position(self.config.position));
        self.host.set_style(&node, "position", "absolute");
        self.host.append(&parent, &node);

        // Not visible yet, so an off-screen trigger does not hide here.
        let _ = self.apply_placement(&node);

        let viewport = self.host.watch_viewport();
        self.host.add_class(&node, self.classes.animated());

        let close = if self.config.close {
            self.mount_close_button(&node)
        } else {
            None
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "tooltip.show",
            name = %self.config.name,
            position = %self.config.position,
            closable = close.is_some()
        );

        self.mounted = Some(Mounted {
            node,
            viewport,
            close,
        });
    }

    fn mount_close_button(&mut self, node: &H::Node) -> Option<CloseButton<H>> {
        let button = self.host.create_node()?;
        self.host.add_class(&button, self.classes.close());
        self.host.add_class(node, self.classes.closable());
        self.host.append(node, &button);
        let subscription = self.host.watch_close(&button);
        Some(CloseButton {
            node: button,
            subscription,
        })
    }

    /// Remove the floating node and release every subscription made by
    /// [`show`](Self::show). No-op when hidden.
    pub fn hide(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        self.host.remove(&mounted.node);
        self.host.release(mounted.viewport);
        if let Some(close) = mounted.close {
            self.host.release(close.subscription);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tooltip.hide", name = %self.config.name);
    }

    /// Recompute placement; hides the tooltip if the trigger has scrolled
    /// fully out of view. No-op when hidden.
    pub fn calc(&mut self) {
        let Some(node) = self.node().cloned() else {
            return;
        };
        if self.apply_placement(&node) {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "tooltip.auto_hide", name = %self.config.name);
            self.hide();
        }
    }

    /// Write coordinates and the unfit class onto `node`. Returns whether
    /// the trigger is out of view.
    fn apply_placement(&mut self, node: &H::Node) -> bool {
        let trigger = self.host.bounding_rect(&self.config.trigger);
        let viewport = self.host.viewport();
        let size = self.host.outer_size(node);
        let placement = place(self.config.position, trigger, viewport, size);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "tooltip.calc",
            top = placement.top,
            left = placement.left,
            fit = placement.fit()
        );

        let unfit = self.classes.unfit();
        if !placement.fit() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "tooltip.unfit",
                vertical = placement.clamped_vertical,
                horizontal = placement.clamped_horizontal
            );
            self.host.add_class(node, unfit);
        } else if self.host.has_class(node, unfit) {
            self.host.remove_class(node, unfit);
        }

        self.host.set_style(node, "top", &px(placement.top));
        self.host.set_style(node, "left", &px(placement.left));

        trigger_out_of_view(trigger, viewport)
    }

    /// Route the configured activation event by its target.
    pub fn handle_event(&mut self, target: Option<&H::Node>) -> Dispatch {
        match target {
            Some(target) if self.host.same_node(target, &self.config.trigger) => {
                self.show();
                Dispatch::Show
            }
            Some(target) if self.node().is_some_and(|node| self.host.same_node(target, node)) => {
                Dispatch::Ignored
            }
            _ => {
                self.hide();
                Dispatch::Hide
            }
        }
    }

    /// Window resized or document scrolled.
    pub fn on_viewport_change(&mut self) {
        self.calc();
    }

    /// The close button was activated.
    pub fn on_close(&mut self) {
        self.hide();
    }
}

impl<H: Host> Drop for Tooltip<H> {
    fn drop(&mut self) {
        self.hide();
    }
}
