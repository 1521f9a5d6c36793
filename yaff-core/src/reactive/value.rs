//! ReactiveValue Implementation
//!
//! A ReactiveValue is the state primitive of a compiled component. It holds
//! a value and a chain of reactions that run on every update.
//!
//! # How ReactiveValues Work
//!
//! 1. A component creates its states before rendering any markup, each with
//!    a reaction that patches the elements depending on it.
//!
//! 2. A parent passes a state to a child as a prop. The child composes it
//!    with its own reaction; the parent's reaction keeps running first.
//!
//! 3. An interaction handler calls [`ReactiveValue::update`] (or
//!    [`ReactiveValue::update_with`]), which stores the value and runs the
//!    chain of the handle it was called on.
//!
//! # Sharing
//!
//! All handles derived from one value (through `Clone` or `compose`) point
//! at the same cell. An update through any of them is visible to all of
//! them; only the reactions that run differ per handle.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::reaction::{Reaction, ReactionChain};

/// Counter for generating unique value IDs.
static VALUE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique value ID.
fn next_value_id() -> u64 {
    VALUE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A value with a chainable change notification.
///
/// # Type Parameters
///
/// - `T`: The type of value stored. Must be Clone + Send + Sync.
///
/// # Example
///
/// ```rust
/// use yaff_core::reactive::ReactiveValue;
///
/// let name = ReactiveValue::new("World".to_string(), |v: &String| {
///     println!("parent sees {v}");
/// });
/// let child_view = name.chain(|v: &String| println!("child sees {v}"));
///
/// // Runs the parent reaction, then the child reaction.
/// child_view.update("Alice".to_string());
/// assert_eq!(name.get().as_deref(), Some("Alice"));
/// ```
pub struct ReactiveValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Unique identifier of the underlying cell, shared by composed handles.
    id: u64,

    /// The current value. `None` for a placeholder that was never assigned.
    value: Arc<RwLock<Option<T>>>,

    /// Reactions run by this handle, in registration order.
    reaction: ReactionChain<T>,
}

impl<T> ReactiveValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new value with the given reaction.
    pub fn new<F>(value: T, reaction: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self::from_parts(Some(value), ReactionChain::single(Arc::new(reaction)))
    }

    /// Create a new value whose reaction does nothing.
    pub fn with_value(value: T) -> Self {
        Self::from_parts(Some(value), ReactionChain::noop())
    }

    /// Create an absent value with a no-op reaction.
    ///
    /// Used in place of an optional prop the parent did not supply.
    pub fn placeholder() -> Self {
        Self::from_parts(None, ReactionChain::noop())
    }

    fn from_parts(value: Option<T>, reaction: ReactionChain<T>) -> Self {
        Self {
            id: next_value_id(),
            value: Arc::new(RwLock::new(value)),
            reaction,
        }
    }

    /// Get the value's unique ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the current value, or `None` if it was never assigned.
    pub fn get(&self) -> Option<T> {
        self.value.read().clone()
    }

    /// Check whether the value is absent.
    pub fn is_absent(&self) -> bool {
        self.value.read().is_none()
    }

    /// Set a new value and run the reaction chain.
    ///
    /// Every reaction runs even if the value did not change.
    pub fn update(&self, value: T) {
        *self.value.write() = Some(value.clone());
        trace!(
            value_id = self.id,
            reactions = self.reaction.len(),
            "reactive value updated"
        );
        self.reaction.invoke(&value);
    }

    /// Read the current value, derive the next one, and update.
    ///
    /// Returns `false` without running any reaction if the value is absent.
    pub fn update_with<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        // `f` runs without the lock held.
        let Some(current) = self.value.read().clone() else {
            trace!(value_id = self.id, "update skipped, value is absent");
            return false;
        };
        self.update(f(&current));
        true
    }

    /// Derive a handle that shares this value and carries an extra reaction.
    ///
    /// With `replace == false` the new handle runs this handle's reactions
    /// first and `extra` after them. With `replace == true` it runs only
    /// `extra`.
    pub fn compose<F>(&self, extra: F, replace: bool) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let extra: Reaction<T> = Arc::new(extra);
        let reaction = if replace {
            ReactionChain::single(extra)
        } else {
            self.reaction.then(extra)
        };
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
            reaction,
        }
    }

    /// Shorthand for `compose(extra, false)`.
    pub fn chain<F>(&self, extra: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.compose(extra, false)
    }

    /// Shorthand for `compose(extra, true)`.
    pub fn replace<F>(&self, extra: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.compose(extra, true)
    }

    /// Number of reactions this handle runs on update.
    pub fn reaction_count(&self) -> usize {
        self.reaction.len()
    }

    /// Check whether two handles refer to the same underlying value.
    pub fn shares_value_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<T> Clone for ReactiveValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
            reaction: self.reaction.clone(),
        }
    }
}

impl<T> Debug for ReactiveValue<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveValue")
            .field("id", &self.id)
            .field("value", &self.get())
            .field("reaction_count", &self.reaction_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Python Bindings
// ----------------------------------------------------------------------------

#[cfg(feature = "python")]
pub use python::PyReactiveValue;

#[cfg(feature = "python")]
mod python {
    use std::sync::Arc;

    use parking_lot::RwLock;
    use pyo3::prelude::*;

    use super::next_value_id;

    /// Python-exposed ReactiveValue type.
    ///
    /// Values and reactions are Python objects. The value cell is shared
    /// between composed handles exactly like the Rust type.
    #[pyclass(name = "ReactiveValue")]
    pub struct PyReactiveValue {
        id: u64,
        value: Arc<RwLock<Py<PyAny>>>,
        reactions: Vec<Py<PyAny>>,
    }

    #[pymethods]
    impl PyReactiveValue {
        #[new]
        #[pyo3(signature = (value, change=None))]
        fn new(value: PyObject, change: Option<PyObject>) -> Self {
            Self {
                id: next_value_id(),
                value: Arc::new(RwLock::new(value)),
                reactions: change.into_iter().collect(),
            }
        }

        /// An absent value (`None`) with no reaction.
        #[staticmethod]
        fn default(py: Python<'_>) -> Self {
            Self::new(py.None(), None)
        }

        #[getter]
        fn value(&self, py: Python<'_>) -> PyObject {
            self.value.read().clone_ref(py)
        }

        #[getter]
        fn id(&self) -> u64 {
            self.id
        }

        /// Store the value and call every reaction with it, in order.
        fn update(&self, py: Python<'_>, value: PyObject) -> PyResult<()> {
            *self.value.write() = value.clone_ref(py);
            for reaction in &self.reactions {
                reaction.call1(py, (value.clone_ref(py),))?;
            }
            Ok(())
        }

        #[pyo3(signature = (change, replace=false))]
        fn compose(&self, py: Python<'_>, change: PyObject, replace: bool) -> Self {
            let mut reactions: Vec<Py<PyAny>> = if replace {
                Vec::new()
            } else {
                self.reactions.iter().map(|r| r.clone_ref(py)).collect()
            };
            reactions.push(change);
            Self {
                id: self.id,
                value: Arc::clone(&self.value),
                reactions,
            }
        }

        fn reaction_count(&self) -> usize {
            self.reactions.len()
        }

        fn __repr__(&self, py: Python<'_>) -> String {
            let value = self.value.read();
            let repr = value
                .bind(py)
                .repr()
                .map(|r| r.to_string())
                .unwrap_or_else(|_| "?".to_string());
            format!(
                "ReactiveValue(id={}, value={}, reactions={})",
                self.id,
                repr,
                self.reactions.len()
            )
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
