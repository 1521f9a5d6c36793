//! Listener bookkeeping.
//!
//! A component records every listener it registers while mounting so it can
//! remove them again before re-wiring or when unmounting.

use crate::surface::{ListenerId, NodeId, Surface};

/// Listeners registered by one component.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    entries: Vec<(NodeId, ListenerId)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, node: NodeId, listener: ListenerId) {
        self.entries.push((node, listener));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every recorded listener from `surface`.
    ///
    /// Returns how many were still registered. Listeners on nodes that were
    /// already replaced by a clone are gone from the live tree either way.
    pub fn clear(&mut self, surface: &dyn Surface) -> usize {
        self.entries
            .drain(..)
            .filter(|(node, listener)| surface.remove_listener(*node, *listener))
            .count()
    }
}
