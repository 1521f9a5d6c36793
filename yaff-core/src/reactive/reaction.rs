//! Reaction chains.
//!
//! A reaction is the notification procedure a [`ReactiveValue`] runs after
//! its value changes. Every holder of a value keeps its own chain: composing
//! appends to a copy of the chain, so earlier registrants keep running and
//! sibling holders never observe each other's additions.
//!
//! [`ReactiveValue`]: super::ReactiveValue

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

/// A single notification procedure.
pub type Reaction<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// An ordered list of reactions, invoked in registration order.
///
/// An empty chain is the no-op reaction.
pub struct ReactionChain<T> {
    reactions: SmallVec<[Reaction<T>; 2]>,
}

impl<T> ReactionChain<T> {
    /// The no-op chain.
    pub fn noop() -> Self {
        Self {
            reactions: SmallVec::new(),
        }
    }

    /// A chain holding exactly one reaction.
    pub fn single(reaction: Reaction<T>) -> Self {
        let mut reactions = SmallVec::new();
        reactions.push(reaction);
        Self { reactions }
    }

    /// A new chain that runs `self` first and then `extra`.
    pub fn then(&self, extra: Reaction<T>) -> Self {
        let mut reactions = self.reactions.clone();
        reactions.push(extra);
        Self { reactions }
    }

    /// Run every reaction with `value`.
    pub fn invoke(&self, value: &T) {
        for reaction in &self.reactions {
            reaction(value);
        }
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}

impl<T> Clone for ReactionChain<T> {
    fn clone(&self) -> Self {
        Self {
            reactions: self.reactions.clone(),
        }
    }
}

impl<T> Default for ReactionChain<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T> fmt::Debug for ReactionChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionChain")
            .field("len", &self.reactions.len())
            .finish()
    }
}
