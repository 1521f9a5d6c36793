//! Surface Handles
//!
//! Opaque handles for nodes and listeners owned by a rendering surface.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Handle to a node on a rendering surface.
///
/// A handle stays valid for the lifetime of the surface. Whether the node is
/// still part of the live tree is a separate question, see
/// [`Surface::is_attached`](super::Surface::is_attached).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Handle to an event listener registered on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Generate a new unique listener ID.
    ///
    /// Uses an atomic counter so IDs never repeat across surfaces.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}
