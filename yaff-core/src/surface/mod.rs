//! Rendering Surface
//!
//! The surface is the document model compiled components patch. The runtime
//! never diffs: it looks nodes up by their stable identifier and writes text
//! or attributes directly. This module defines the contract the runtime
//! expects from a surface, plus [`MemorySurface`], an arena-backed
//! implementation for hosts without a browser DOM and for tests.
//!
//! # Contract
//!
//! - Markup is parsed into detached top-level element nodes.
//! - Lookup by identifier only sees the attached tree and reports absence
//!   with `None`.
//! - Listeners are removed either explicitly or by replacing a node with a
//!   deep clone of itself, since clones never carry listeners.
//! - Listener callbacks are invoked with no internal lock held, so a
//!   callback may patch the same surface.

mod memory;
mod node;

pub use memory::{MemorySurface, Mutation, DEFAULT_JOURNAL_CAPACITY};
pub use node::{ListenerId, NodeId};

use std::sync::Arc;

use crate::component::ElementId;
use crate::error::SurfaceError;

/// Escape `text` for interpolation into element content.
///
/// Generated components call this when rendering state values into their
/// initial markup, so the markup and later text patches agree.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped_text(text, &mut out);
    out
}

/// Escape `value` for interpolation into a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    push_escaped_attribute(value, &mut out);
    out
}

pub(crate) fn push_escaped_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

pub(crate) fn push_escaped_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// An event callback.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Operations a rendering surface provides to compiled components.
pub trait Surface: Send + Sync {
    /// The node under which root components are attached.
    fn root(&self) -> NodeId;

    /// Parse `markup` into detached nodes and return the top-level elements
    /// in document order. Top-level text is dropped.
    fn create_fragment(&self, markup: &str) -> Result<Vec<NodeId>, SurfaceError>;

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Fails with [`SurfaceError::Hierarchy`] if `child` is `parent` or one
    /// of its ancestors.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError>;

    /// Find the attached node whose `id` attribute equals `id`.
    fn find_by_id(&self, id: &ElementId) -> Option<NodeId>;

    /// Make a single text node the only child of `node`.
    fn set_text(&self, node: NodeId, text: &str);

    /// Set or overwrite an attribute on an element.
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);

    /// Register `listener` for `event` on `node`.
    ///
    /// Returns `None` if `node` is not an element of this surface.
    fn add_listener(&self, node: NodeId, event: &str, listener: Listener) -> Option<ListenerId>;

    /// Remove a listener. Returns `false` if it was not registered on `node`.
    fn remove_listener(&self, node: NodeId, listener: ListenerId) -> bool;

    /// Copy `node` and its subtree into new detached nodes, without listeners.
    fn deep_clone(&self, node: NodeId) -> Result<NodeId, SurfaceError>;

    /// Put `replacement` where `node` is in the tree.
    ///
    /// Returns `false` and changes nothing if `node` has no parent or if
    /// `replacement` is an ancestor of `node`.
    fn replace_with(&self, node: NodeId, replacement: NodeId) -> bool;

    /// Serialise `node` and its subtree.
    fn outer_markup(&self, node: NodeId) -> String;

    /// Check whether `node` is reachable from [`Surface::root`].
    fn is_attached(&self, node: NodeId) -> bool;
}
