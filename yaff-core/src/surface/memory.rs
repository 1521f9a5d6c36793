//! In-memory Surface
//!
//! An arena-backed document model. Nodes are never freed: a handle handed
//! out once stays valid, and nodes that fall out of the tree simply become
//! detached. Markup is parsed with `scraper` (html5ever) using fragment
//! parsing rules, the same way `innerHTML` assignment behaves in a browser.
//!
//! Besides the [`Surface`] contract, the memory surface plays the part of
//! the host event loop ([`MemorySurface::dispatch`]) and keeps a journal of
//! every patch it applied, which tests use to prove that an update touched
//! exactly the nodes it was bound to.

use std::collections::{HashMap, VecDeque};
use std::fmt::Write;

use indexmap::IndexMap;
use parking_lot::Mutex;
use scraper::Html;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::trace;

use super::{push_escaped_attribute, push_escaped_text, Listener, ListenerId, NodeId, Surface};
use crate::component::ElementId;
use crate::error::SurfaceError;

/// Mutations kept by [`MemorySurface::new`]; older entries are dropped first.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1024;

/// Elements serialised without children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is serialised without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A change applied to the document by a patch or by unmounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    Text {
        node: NodeId,
        text: String,
    },
    Attribute {
        node: NodeId,
        name: String,
        value: String,
    },
    Replace {
        node: NodeId,
        replacement: NodeId,
    },
}

impl Mutation {
    /// The node the mutation was applied to.
    pub fn node(&self) -> NodeId {
        match self {
            Mutation::Text { node, .. }
            | Mutation::Attribute { node, .. }
            | Mutation::Replace { node, .. } => *node,
        }
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attrs: IndexMap<String, String>,
    },
    Text(String),
}

struct ListenerEntry {
    id: ListenerId,
    event: String,
    listener: Listener,
}

struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: SmallVec<[ListenerEntry; 1]>,
}

impl NodeData {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            listeners: SmallVec::new(),
        }
    }

    fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }
}

struct Arena {
    nodes: Vec<NodeData>,
    root: NodeId,
    journal: VecDeque<Mutation>,
    journal_capacity: usize,
}

impl Arena {
    fn new(journal_capacity: usize) -> Self {
        let body = NodeData::new(
            NodeKind::Element {
                tag: "body".to_string(),
                attrs: IndexMap::new(),
            },
            None,
        );
        Self {
            nodes: vec![body],
            root: NodeId::from(0),
            journal: VecDeque::new(),
            journal_capacity,
        }
    }

    fn record(&mut self, mutation: Mutation) {
        if self.journal_capacity == 0 {
            return;
        }
        if self.journal.len() == self.journal_capacity {
            self.journal.pop_front();
        }
        self.journal.push_back(mutation);
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.raw() as usize)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.raw() as usize)
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::from(self.nodes.len() as u64);
        self.nodes.push(NodeData::new(kind, parent));
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.get_mut(id).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn parse(&mut self, markup: &str) -> Vec<NodeId> {
        let html = Html::parse_fragment(markup);
        let fragment = *html.root_element();
        let fragment_id = fragment.id();

        let mut imported = HashMap::new();
        let mut top_level = Vec::new();

        for node in fragment.descendants().skip(1) {
            let Some(source_parent) = node.parent() else {
                continue;
            };
            let is_top_level = source_parent.id() == fragment_id;
            let parent = imported.get(&source_parent.id()).copied();
            if parent.is_none() && !is_top_level {
                continue;
            }

            let kind = match node.value() {
                scraper::Node::Element(element) => NodeKind::Element {
                    tag: element.name().to_string(),
                    attrs: element
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect(),
                },
                scraper::Node::Text(text) if !is_top_level => NodeKind::Text(text.to_string()),
                _ => continue,
            };

            let id = self.alloc(kind, parent);
            imported.insert(node.id(), id);
            if is_top_level {
                top_level.push(id);
            }
        }

        top_level
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let node = self.get(current)?;
            if let NodeKind::Element { attrs, .. } = &node.kind {
                if attrs.get("id").map(String::as_str) == Some(id) {
                    return Some(current);
                }
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    fn is_attached(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, id)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.get(node_id).and_then(|n| n.parent);
        }
        false
    }

    /// The text node to rewrite in place when patching the text of `node`.
    fn text_slot(&self, node: NodeId) -> Option<NodeId> {
        let data = self.get(node)?;
        match (&data.kind, data.children.as_slice()) {
            (NodeKind::Text(_), _) => Some(node),
            (NodeKind::Element { .. }, [only]) => match self.get(*only)?.kind {
                NodeKind::Text(_) => Some(*only),
                NodeKind::Element { .. } => None,
            },
            _ => None,
        }
    }

    fn clone_subtree(&mut self, id: NodeId, parent: Option<NodeId>) -> Option<NodeId> {
        let (kind, children) = {
            let source = self.get(id)?;
            (source.kind.clone(), source.children.clone())
        };
        let copy = self.alloc(kind, parent);
        for child in children {
            self.clone_subtree(child, Some(copy));
        }
        Some(copy)
    }

    fn text_content(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &node.children {
                    self.text_content(*child, out);
                }
            }
        }
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => {
                let raw = node
                    .parent
                    .and_then(|p| self.get(p))
                    .and_then(NodeData::tag)
                    .is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag));
                if raw {
                    out.push_str(text);
                } else {
                    push_escaped_text(text, out);
                }
            }
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"");
                    push_escaped_attribute(value, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &node.children {
                    self.write_markup(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

/// An in-memory rendering surface.
///
/// # Example
///
/// ```rust
/// use yaff_core::surface::{MemorySurface, Surface};
///
/// let surface = MemorySurface::new();
/// let nodes = surface.create_fragment(r#"<p id="greeting">Hello</p>"#).unwrap();
/// surface.append_child(surface.root(), nodes[0]).unwrap();
///
/// surface.set_text(nodes[0], "Bye");
/// assert_eq!(surface.outer_markup(nodes[0]), r#"<p id="greeting">Bye</p>"#);
/// ```
pub struct MemorySurface {
    arena: Mutex<Arena>,
}

impl MemorySurface {
    /// Create an empty document with a `body` root.
    pub fn new() -> Self {
        Self::with_journal_capacity(DEFAULT_JOURNAL_CAPACITY)
    }

    /// Create an empty document that keeps at most `capacity` mutations.
    ///
    /// A capacity of 0 disables the journal.
    pub fn with_journal_capacity(capacity: usize) -> Self {
        Self {
            arena: Mutex::new(Arena::new(capacity)),
        }
    }

    /// Fire `event` on `node`, as the host event loop would.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, node: NodeId, event: &str) -> usize {
        let listeners: Vec<Listener> = {
            let arena = self.arena.lock();
            match arena.get(node) {
                Some(data) => data
                    .listeners
                    .iter()
                    .filter(|entry| entry.event == event)
                    .map(|entry| entry.listener.clone())
                    .collect(),
                None => Vec::new(),
            }
        };
        trace!(node = node.raw(), event, listeners = listeners.len(), "dispatching event");
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    /// Fire `event` on the attached node with identifier `id`.
    ///
    /// Returns 0 if no such node is attached.
    pub fn dispatch_by_id(&self, id: &ElementId, event: &str) -> usize {
        match self.find_by_id(id) {
            Some(node) => self.dispatch(node, event),
            None => 0,
        }
    }

    /// The concatenated text of `node` and its descendants.
    pub fn text(&self, node: NodeId) -> Option<String> {
        let arena = self.arena.lock();
        arena.get(node)?;
        let mut out = String::new();
        arena.text_content(node, &mut out);
        Some(out)
    }

    /// The value of attribute `name` on element `node`.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let arena = self.arena.lock();
        match &arena.get(node)?.kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    /// Number of listeners registered on `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.arena
            .lock()
            .get(node)
            .map_or(0, |data| data.listeners.len())
    }

    /// Every mutation applied since creation or the last [`clear_mutations`](Self::clear_mutations).
    ///
    /// Only the most recent mutations are kept, up to the journal capacity.
    pub fn mutations(&self) -> Vec<Mutation> {
        self.arena.lock().journal.iter().cloned().collect()
    }

    pub fn clear_mutations(&self) {
        self.arena.lock().journal.clear();
    }

    /// Total number of nodes ever allocated, attached or not.
    pub fn node_count(&self) -> usize {
        self.arena.lock().nodes.len()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn root(&self) -> NodeId {
        self.arena.lock().root
    }

    fn create_fragment(&self, markup: &str) -> Result<Vec<NodeId>, SurfaceError> {
        Ok(self.arena.lock().parse(markup))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError> {
        let mut arena = self.arena.lock();
        match arena.get(parent).map(|p| p.tag().is_some()) {
            Some(true) => {}
            _ => return Err(SurfaceError::UnknownNode(parent)),
        }
        if arena.get(child).is_none() {
            return Err(SurfaceError::UnknownNode(child));
        }
        if arena.is_inclusive_ancestor(child, parent) {
            return Err(SurfaceError::Hierarchy { parent, child });
        }
        arena.detach(child);
        if let Some(data) = arena.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = arena.get_mut(parent) {
            data.children.push(child);
        }
        Ok(())
    }

    fn find_by_id(&self, id: &ElementId) -> Option<NodeId> {
        self.arena.lock().find_by_id(id.as_str())
    }

    fn set_text(&self, node: NodeId, text: &str) {
        let mut arena = self.arena.lock();
        if arena.get(node).is_none() {
            return;
        }
        match arena.text_slot(node) {
            Some(slot) => {
                if let Some(NodeData {
                    kind: NodeKind::Text(current),
                    ..
                }) = arena.get_mut(slot)
                {
                    current.clear();
                    current.push_str(text);
                }
            }
            None => {
                let children = arena
                    .get_mut(node)
                    .map(|data| std::mem::take(&mut data.children))
                    .unwrap_or_default();
                for child in children {
                    if let Some(data) = arena.get_mut(child) {
                        data.parent = None;
                    }
                }
                arena.alloc(NodeKind::Text(text.to_string()), Some(node));
            }
        }
        arena.record(Mutation::Text {
            node,
            text: text.to_string(),
        });
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        let mut arena = self.arena.lock();
        let Some(NodeData {
            kind: NodeKind::Element { attrs, .. },
            ..
        }) = arena.get_mut(node)
        else {
            return;
        };
        attrs.insert(name.to_string(), value.to_string());
        arena.record(Mutation::Attribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn add_listener(&self, node: NodeId, event: &str, listener: Listener) -> Option<ListenerId> {
        let mut arena = self.arena.lock();
        let data = arena.get_mut(node)?;
        data.tag()?;
        let id = ListenerId::new();
        data.listeners.push(ListenerEntry {
            id,
            event: event.to_string(),
            listener,
        });
        Some(id)
    }

    fn remove_listener(&self, node: NodeId, listener: ListenerId) -> bool {
        let mut arena = self.arena.lock();
        let Some(data) = arena.get_mut(node) else {
            return false;
        };
        let before = data.listeners.len();
        data.listeners.retain(|entry| entry.id != listener);
        data.listeners.len() != before
    }

    fn deep_clone(&self, node: NodeId) -> Result<NodeId, SurfaceError> {
        self.arena
            .lock()
            .clone_subtree(node, None)
            .ok_or(SurfaceError::UnknownNode(node))
    }

    fn replace_with(&self, node: NodeId, replacement: NodeId) -> bool {
        let mut arena = self.arena.lock();
        if node == replacement || arena.get(replacement).is_none() {
            return false;
        }
        let Some(parent) = arena.get(node).and_then(|n| n.parent) else {
            return false;
        };
        if arena.is_inclusive_ancestor(replacement, parent) {
            return false;
        }
        arena.detach(replacement);

        let Some(parent_data) = arena.get_mut(parent) else {
            return false;
        };
        let Some(slot) = parent_data.children.iter().position(|c| *c == node) else {
            return false;
        };
        parent_data.children[slot] = replacement;

        if let Some(data) = arena.get_mut(replacement) {
            data.parent = Some(parent);
        }
        if let Some(data) = arena.get_mut(node) {
            data.parent = None;
        }
        arena.record(Mutation::Replace { node, replacement });
        true
    }

    fn outer_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.arena.lock().write_markup(node, &mut out);
        out
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.arena.lock().is_attached(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    fn attach(surface: &MemorySurface, markup: &str) -> Vec<NodeId> {
        let nodes = surface.create_fragment(markup).unwrap();
        for node in &nodes {
            surface.append_child(surface.root(), *node).unwrap();
        }
        nodes
    }

    fn element_id(id: &str) -> ElementId {
        ElementId::from(id)
    }

    #[test]
    fn fragment_keeps_only_top_level_elements() {
        let surface = MemorySurface::new();
        let nodes = surface
            .create_fragment("\n  <p>one</p>\n  loose text\n  <br/>\n  <div><b>two</b></div>\n")
            .unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(surface.outer_markup(nodes[0]), "<p>one</p>");
        assert_eq!(surface.outer_markup(nodes[1]), "<br>");
        assert_eq!(surface.outer_markup(nodes[2]), "<div><b>two</b></div>");
    }

    #[test]
    fn empty_markup_yields_no_nodes() {
        let surface = MemorySurface::new();
        assert!(surface.create_fragment("").unwrap().is_empty());
        assert!(surface.create_fragment("   ").unwrap().is_empty());
    }

    #[test]
    fn serialises_escapes_and_raw_text() {
        let surface = MemorySurface::new();
        let nodes = surface
            .create_fragment(r#"<style>a > b { color: red; }</style><p title="a &quot;b&quot;">1 &lt; 2 &amp; 3</p>"#)
            .unwrap();

        assert_eq!(surface.outer_markup(nodes[0]), "<style>a > b { color: red; }</style>");
        assert_eq!(
            surface.outer_markup(nodes[1]),
            r#"<p title="a &quot;b&quot;">1 &lt; 2 &amp; 3</p>"#
        );
    }

    #[test]
    fn find_by_id_only_sees_attached_nodes() {
        let surface = MemorySurface::new();
        let detached = surface.create_fragment(r#"<p id="x">detached</p>"#).unwrap();
        assert_eq!(surface.find_by_id(&element_id("x")), None);

        surface.append_child(surface.root(), detached[0]).unwrap();
        assert_eq!(surface.find_by_id(&element_id("x")), Some(detached[0]));
        assert!(surface.is_attached(detached[0]));
    }

    #[test]
    fn find_by_id_descends_into_nested_elements() {
        let surface = MemorySurface::new();
        attach(&surface, r#"<div><div><font id="a.b.c">deep</font></div></div>"#);

        let node = surface.find_by_id(&element_id("a.b.c")).unwrap();
        assert_eq!(surface.text(node).as_deref(), Some("deep"));
    }

    #[test]
    fn set_text_replaces_children_and_is_journaled() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, r#"<p id="p">Hello, <b>World</b>!</p>"#);

        surface.set_text(nodes[0], "Hello, Alice!");
        assert_eq!(surface.outer_markup(nodes[0]), r#"<p id="p">Hello, Alice!</p>"#);
        assert_eq!(
            surface.mutations(),
            vec![Mutation::Text {
                node: nodes[0],
                text: "Hello, Alice!".to_string()
            }]
        );
    }

    #[test]
    fn repeated_set_text_reuses_the_text_node() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, r#"<p id="p">Hello, <b>World</b>!</p>"#);
        surface.set_text(nodes[0], "first");
        let count = surface.node_count();

        for i in 0..100 {
            surface.set_text(nodes[0], &format!("Hello, {i}!"));
        }

        assert_eq!(surface.node_count(), count);
        assert_eq!(surface.outer_markup(nodes[0]), r#"<p id="p">Hello, 99!</p>"#);
    }

    #[test]
    fn journal_keeps_only_the_most_recent_mutations() {
        let surface = MemorySurface::with_journal_capacity(3);
        let nodes = attach(&surface, "<p>a</p>");

        for text in ["1", "2", "3", "4", "5"] {
            surface.set_text(nodes[0], text);
        }

        let kept: Vec<String> = surface
            .mutations()
            .into_iter()
            .filter_map(|m| match m {
                Mutation::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(kept, ["3", "4", "5"]);

        let silent = MemorySurface::with_journal_capacity(0);
        let nodes = attach(&silent, "<p>a</p>");
        silent.set_text(nodes[0], "b");
        assert!(silent.mutations().is_empty());
        assert_eq!(silent.text(nodes[0]).as_deref(), Some("b"));
    }

    #[test]
    fn parsed_attributes_keep_source_order() {
        let surface = MemorySurface::new();
        let nodes = surface
            .create_fragment(r#"<p title="t" class="c" id="x">a</p>"#)
            .unwrap();

        assert_eq!(
            surface.outer_markup(nodes[0]),
            r#"<p title="t" class="c" id="x">a</p>"#
        );
    }

    #[test]
    fn set_attribute_overwrites_value() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, r#"<input id="i" value="old">"#);

        surface.set_attribute(nodes[0], "value", "new");
        assert_eq!(surface.attribute(nodes[0], "value").as_deref(), Some("new"));
        assert_eq!(surface.mutations().len(), 1);
    }

    #[test]
    fn listeners_fire_and_can_be_removed() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, "<button>go</button>");
        let clicks = Arc::new(AtomicI32::new(0));

        let clicks_clone = clicks.clone();
        let id = surface
            .add_listener(
                nodes[0],
                "click",
                Arc::new(move || {
                    clicks_clone.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        assert_eq!(surface.dispatch(nodes[0], "click"), 1);
        assert_eq!(surface.dispatch(nodes[0], "keydown"), 0);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        assert!(surface.remove_listener(nodes[0], id));
        assert!(!surface.remove_listener(nodes[0], id));
        assert_eq!(surface.dispatch(nodes[0], "click"), 0);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_patch_the_surface_it_runs_on() {
        let surface = Arc::new(MemorySurface::new());
        let nodes = attach(&surface, r#"<button id="b">0</button>"#);

        let target = nodes[0];
        let weak = Arc::downgrade(&surface);
        surface.add_listener(
            target,
            "click",
            Arc::new(move || {
                if let Some(surface) = weak.upgrade() {
                    surface.set_text(target, "1");
                }
            }),
        );

        surface.dispatch(target, "click");
        assert_eq!(surface.text(target).as_deref(), Some("1"));
    }

    #[test]
    fn deep_clone_copies_structure_without_listeners() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, r#"<div id="d"><button id="b">x</button></div>"#);
        surface.add_listener(nodes[0], "click", Arc::new(|| {}));

        let copy = surface.deep_clone(nodes[0]).unwrap();
        assert_ne!(copy, nodes[0]);
        assert_eq!(surface.outer_markup(copy), surface.outer_markup(nodes[0]));
        assert_eq!(surface.listener_count(copy), 0);
        assert!(!surface.is_attached(copy));
    }

    #[test]
    fn replace_with_swaps_in_place() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, r#"<p id="first">1</p><p id="second">2</p>"#);

        let copy = surface.deep_clone(nodes[0]).unwrap();
        assert!(surface.replace_with(nodes[0], copy));

        assert!(!surface.is_attached(nodes[0]));
        assert!(surface.is_attached(copy));
        assert_eq!(surface.find_by_id(&element_id("first")), Some(copy));
        assert_eq!(
            surface.outer_markup(surface.root()),
            r#"<body><p id="first">1</p><p id="second">2</p></body>"#
        );
    }

    #[test]
    fn replace_with_ignores_detached_nodes() {
        let surface = MemorySurface::new();
        let nodes = surface.create_fragment("<p>1</p>").unwrap();
        let copy = surface.deep_clone(nodes[0]).unwrap();

        assert!(!surface.replace_with(nodes[0], copy));
        assert!(surface.mutations().is_empty());
    }

    #[test]
    fn append_child_rejects_unknown_nodes() {
        let surface = MemorySurface::new();
        let err = surface
            .append_child(surface.root(), NodeId::from(999))
            .unwrap_err();
        assert!(matches!(err, SurfaceError::UnknownNode(_)));
    }

    #[test]
    fn append_child_rejects_cycles() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, "<div><p>x</p></div>");
        let div = nodes[0];
        let span = surface.create_fragment("<span></span>").unwrap()[0];
        surface.append_child(div, span).unwrap();

        let err = surface.append_child(span, div).unwrap_err();
        assert!(matches!(err, SurfaceError::Hierarchy { parent, child } if parent == span && child == div));
        let err = surface.append_child(div, div).unwrap_err();
        assert!(matches!(err, SurfaceError::Hierarchy { .. }));

        assert!(surface.is_attached(div));
        assert!(surface.is_attached(span));
        assert_eq!(
            surface.outer_markup(surface.root()),
            "<body><div><p>x</p><span></span></div></body>"
        );
    }

    #[test]
    fn replace_with_rejects_an_ancestor_as_replacement() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, "<div><p>x</p></div>");
        let div = nodes[0];
        let span = surface.create_fragment("<span></span>").unwrap()[0];
        surface.append_child(div, span).unwrap();

        assert!(!surface.replace_with(span, div));
        assert!(surface.is_attached(div));
        assert!(surface.mutations().is_empty());
    }

    #[test]
    fn mutations_serialise_to_json() {
        let surface = MemorySurface::new();
        let nodes = attach(&surface, "<p>a</p>");
        surface.set_text(nodes[0], "b");

        let json = serde_json::to_string(&surface.mutations()).unwrap();
        assert!(json.contains(r#""kind":"text""#));
        assert!(json.contains(r#""text":"b""#));
    }
}
