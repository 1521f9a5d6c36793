//! Reactive Values
//!
//! This module implements the state primitive used by compiled components.
//!
//! # Concepts
//!
//! ## ReactiveValue
//!
//! A [`ReactiveValue`] holds a current value and a chain of reactions. An
//! update stores the new value and then runs every reaction in the chain,
//! synchronously and in registration order. There is no dependency tracking
//! and no equality check: the reactions registered by generated code are
//! identifier-scoped patches that are idempotent on their own.
//!
//! ## Composition
//!
//! A value that is rendered in more than one place, possibly across
//! component boundaries, is threaded through each site with
//! [`ReactiveValue::compose`]. The result shares the underlying value and
//! either chains the new reaction after the existing ones or replaces them.
//!
//! # Implementation Notes
//!
//! The value cell is shared (`Arc` + `RwLock`); reaction chains are owned
//! per handle. Locks are released before any reaction runs, so a reaction
//! may read the value or update other values freely.

mod reaction;
mod value;

pub use reaction::{Reaction, ReactionChain};
pub use value::ReactiveValue;

#[cfg(feature = "python")]
pub use value::PyReactiveValue;
