#![forbid(unsafe_code)]

//! In-memory document implementing [`Host`].
//!
//! [`HeadlessDocument`] is a cheap, cloneable handle to a shared node tree.
//! Several tooltips can share one document the same way several tooltips
//! share a page, and the caller keeps a handle to set geometry and inspect
//! the result. Listener bookkeeping is explicit: every registration and
//! release is counted per [`ListenerKind`].
//!
//! Nodes live in a slot table with a free list. [`Host::remove`] frees the
//! node and everything below it; the slot is reused by the next node with
//! a bumped generation, so a stale [`NodeId`] never aliases a live node.
//! Queries on a stale id return empty values and mutations are ignored.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use poptip_layout::{Rect, Size, Viewport};

use crate::host::Host;

/// Handle to a node in a [`HeadlessDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Which DOM listener a subscription stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// `resize` on the window.
    Resize,
    /// `scroll` on the document.
    Scroll,
    /// `click` on a close button.
    CloseClick,
}

/// Listener registrations held by a tooltip. Not `Clone`: each one is
/// released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    ids: Vec<u64>,
}

/// Margins around a node's border box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    element: bool,
    content: String,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    size: Size,
    margins: Margins,
}

impl NodeData {
    fn new(tag: &str, element: bool, size: Size) -> Self {
        Self {
            tag: tag.to_owned(),
            element,
            content: String::new(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
            size,
            margins: Margins::default(),
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

#[derive(Debug)]
struct DocumentState {
    slots: Vec<Slot>,
    /// Vacant slot indices, reused last-in first-out.
    free_list: Vec<u32>,
    body: NodeId,
    viewport: Viewport,
    default_size: Size,
    listeners: BTreeMap<u64, (ListenerKind, Option<NodeId>)>,
    next_listener: u64,
    added: HashMap<ListenerKind, usize>,
    removed: HashMap<ListenerKind, usize>,
}

impl DocumentState {
    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_mut())
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.data = Some(data);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                data: Some(data),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.node_mut(id).and_then(|data| data.parent.take());
        if let Some(parent) = parent.and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|&child| child != id);
        }
    }

    /// Detach `id` and release it with its whole subtree.
    fn free(&mut self, id: NodeId) {
        self.detach(id);
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index as usize)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            let Some(data) = slot.data.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(current.index);
            pending.extend(data.children);
        }
    }

    fn live_nodes(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    fn listen(&mut self, kind: ListenerKind, target: Option<NodeId>) -> u64 {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.insert(id, (kind, target));
        *self.added.entry(kind).or_default() += 1;
        id
    }

    fn unlisten(&mut self, id: u64) {
        if let Some((kind, _)) = self.listeners.remove(&id) {
            *self.removed.entry(kind).or_default() += 1;
        }
    }
}

/// Shared in-memory document.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl HeadlessDocument {
    /// Default rendered size for nodes created without an explicit size.
    pub const DEFAULT_BOX: Size = Size::new(120.0, 40.0);

    /// Create a document with an empty body and the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        let mut state = DocumentState {
            slots: Vec::new(),
            free_list: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
            viewport,
            default_size: Self::DEFAULT_BOX,
            listeners: BTreeMap::new(),
            next_listener: 0,
            added: HashMap::new(),
            removed: HashMap::new(),
        };
        state.body = state.push(NodeData::new("body", true, Size::default()));
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn body_id(&self) -> NodeId {
        self.state.borrow().body
    }

    /// Create an element attached to the body.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut state = self.state.borrow_mut();
        let size = state.default_size;
        let body = state.body;
        let mut data = NodeData::new(tag, true, size);
        data.parent = Some(body);
        let id = state.push(data);
        if let Some(body) = state.node_mut(body) {
            body.children.push(id);
        }
        id
    }

    /// Create a text node; it is not an element.
    pub fn create_text(&self, text: &str) -> NodeId {
        let mut state = self.state.borrow_mut();
        let mut data = NodeData::new("#text", false, Size::default());
        data.content = text.to_owned();
        state.push(data)
    }

    fn update(&self, id: NodeId, f: impl FnOnce(&mut NodeData)) {
        if let Some(data) = self.state.borrow_mut().node_mut(id) {
            f(data);
        }
    }

    fn read<T: Default>(&self, id: NodeId, f: impl FnOnce(&NodeData) -> T) -> T {
        self.state.borrow().node(id).map(f).unwrap_or_default()
    }

    /// Set the viewport-relative bounding rectangle of a node.
    pub fn set_rect(&self, id: NodeId, rect: Rect) {
        self.update(id, |data| data.rect = rect);
    }

    /// Set the border-box size of a node.
    pub fn set_box_size(&self, id: NodeId, size: Size) {
        self.update(id, |data| data.size = size);
    }

    pub fn set_margins(&self, id: NodeId, margins: Margins) {
        self.update(id, |data| data.margins = margins);
    }

    /// Size given to nodes created from now on.
    pub fn set_default_box_size(&self, size: Size) {
        self.state.borrow_mut().default_size = size;
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.borrow_mut().viewport = viewport;
    }

    /// Scroll to the given page offsets. Bounding rectangles are not
    /// adjusted; move triggers with [`set_rect`](Self::set_rect).
    pub fn scroll_to(&self, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        state.viewport.scroll_x = x;
        state.viewport.scroll_y = y;
    }

    pub fn resize(&self, width: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        state.viewport.width = width;
        state.viewport.height = height;
    }

    /// Whether `id` still names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.state.borrow().node(id).is_some()
    }

    /// Live nodes, attached or not, body included.
    pub fn node_count(&self) -> usize {
        self.state.borrow().live_nodes()
    }

    pub fn tag(&self, id: NodeId) -> String {
        self.read(id, |data| data.tag.clone())
    }

    pub fn content(&self, id: NodeId) -> String {
        self.read(id, |data| data.content.clone())
    }

    pub fn classes(&self, id: NodeId) -> Vec<String> {
        self.read(id, |data| data.classes.clone())
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.read(id, |data| data.styles.get(property).cloned())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.read(id, |data| data.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.read(id, |data| data.children.clone())
    }

    /// Whether the node is reachable from the body.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let state = self.state.borrow();
        let mut current = id;
        loop {
            if current == state.body {
                return true;
            }
            match state.node(current).and_then(|data| data.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Attached nodes carrying `class`, in slot order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        let ids: Vec<NodeId> = {
            let state = self.state.borrow();
            state
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| {
                    slot.data
                        .as_ref()
                        .is_some_and(|data| data.classes.iter().any(|c| c == class))
                })
                .map(|(index, slot)| NodeId {
                    index: index as u32,
                    generation: slot.generation,
                })
                .collect()
        };
        ids.into_iter().filter(|&id| self.is_attached(id)).collect()
    }

    /// Live listeners of one kind.
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    /// Live listeners of every kind.
    pub fn total_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Registrations of one kind since the document was created.
    pub fn added(&self, kind: ListenerKind) -> usize {
        self.state.borrow().added.get(&kind).copied().unwrap_or(0)
    }

    /// Releases of one kind since the document was created.
    pub fn removed(&self, kind: ListenerKind) -> usize {
        self.state.borrow().removed.get(&kind).copied().unwrap_or(0)
    }
}

impl Host for HeadlessDocument {
    type Node = NodeId;
    type Subscription = Subscription;

    fn is_element(&self, node: &NodeId) -> bool {
        self.read(*node, |data| data.element)
    }

    fn same_node(&self, a: &NodeId, b: &NodeId) -> bool {
        a == b
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body_id())
    }

    fn create_node(&mut self) -> Option<NodeId> {
        let mut state = self.state.borrow_mut();
        let size = state.default_size;
        Some(state.push(NodeData::new("div", true, size)))
    }

    fn set_content(&mut self, node: &NodeId, markup: &str) {
        self.update(*node, |data| data.content = markup.to_owned());
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        self.update(*node, |data| {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.update(*node, |data| data.classes.retain(|c| c != class));
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.read(*node, |data| data.classes.iter().any(|c| c == class))
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        self.update(*node, |data| {
            data.styles.insert(property.to_owned(), value.to_owned());
        });
    }

    fn append(&mut self, parent: &NodeId, child: &NodeId) {
        let mut state = self.state.borrow_mut();
        if state.node(*parent).is_none() || state.node(*child).is_none() {
            return;
        }
        state.detach(*child);
        if let Some(data) = state.node_mut(*child) {
            data.parent = Some(*parent);
        }
        if let Some(data) = state.node_mut(*parent) {
            data.children.push(*child);
        }
    }

    /// Detach and free `node` with its subtree. The body is never freed.
    fn remove(&mut self, node: &NodeId) {
        let mut state = self.state.borrow_mut();
        if *node != state.body {
            state.free(*node);
        }
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        self.read(*node, |data| data.rect)
    }

    fn outer_size(&self, node: &NodeId) -> Size {
        self.read(*node, |data| {
            Size::new(
                data.size.width + data.margins.left + data.margins.right,
                data.size.height + data.margins.top + data.margins.bottom,
            )
        })
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn watch_viewport(&mut self) -> Subscription {
        let mut state = self.state.borrow_mut();
        let resize = state.listen(ListenerKind::Resize, None);
        let scroll = state.listen(ListenerKind::Scroll, None);
        Subscription {
            ids: vec![resize, scroll],
        }
    }

    fn watch_close(&mut self, button: &NodeId) -> Subscription {
        let id = self
            .state
            .borrow_mut()
            .listen(ListenerKind::CloseClick, Some(*button));
        Subscription { ids: vec![id] }
    }

    fn release(&mut self, subscription: Subscription) {
        let mut state = self.state.borrow_mut();
        for id in subscription.ids {
            state.unlisten(id);
        }
    }
}
