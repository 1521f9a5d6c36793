//! Components
//!
//! The contract every compiled component implements, and the shared
//! machinery behind it.
//!
//! # How Components Work
//!
//! A component is built in one pass by [`Component::construct`]:
//!
//! 1. Its identifiers are derived from its [`IdScope`].
//! 2. Its states are created, each with a reaction that patches the
//!    elements bound to it. Props received from the parent are composed with
//!    the component's own reactions.
//! 3. Child components are constructed and registered with
//!    [`ComponentCore::add_child`].
//! 4. Its markup is rendered once into detached elements.
//!
//! Nothing is attached yet. The host places the elements into the live
//! document (see [`mount_root`]) and then calls [`Component::on_mount`],
//! which wires event listeners onto the live elements and recurses into
//! every child. [`Component::on_unmount`] strips those listeners again by
//! swapping each live element for a listener-free deep copy.
//!
//! ```text
//!   construct ──► Constructed ──on_mount──► Mounted ──on_unmount──► Unmounted
//!                                 ▲   │
//!                                 └───┘ remount re-wires listeners
//! ```
//!
//! Updates never re-render: a state change runs its reaction chain, and
//! each reaction overwrites only the elements whose identifiers it names.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

mod context;
mod id;
mod lifecycle;
mod listeners;
pub mod patch;
mod props;

pub use self::context::Context;
pub use self::id::{ElementId, IdScope};
pub use self::lifecycle::ComponentCore;
pub use self::listeners::ListenerRegistry;
pub use self::patch::{Binding, PatchKind};
pub use self::props::Props;

use crate::error::{ComponentError, SurfaceError};
use crate::surface::NodeId;

static COMPONENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Generate a new unique component ID.
    pub fn new() -> Self {
        Self(COMPONENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a component is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built and rendered, not yet wired.
    Constructed,
    /// Listeners are wired onto live elements.
    Mounted,
    /// Listeners were stripped. Terminal.
    Unmounted,
}

/// A compiled component.
///
/// Implementors provide [`construct`](Component::construct), access to their
/// [`ComponentCore`], and optionally [`wire`](Component::wire) to attach
/// event listeners. Everything else is provided.
pub trait Component: Send {
    /// Build the component, its states, its children and its elements.
    fn construct(cx: &Context, props: Props) -> Result<Self, ComponentError>
    where
        Self: Sized;

    fn core(&self) -> &ComponentCore;

    fn core_mut(&mut self) -> &mut ComponentCore;

    /// Attach event listeners to live elements.
    ///
    /// Called on every mount after listeners from a previous mount were
    /// removed. Use [`ComponentCore::listen`] so they can be removed again.
    fn wire(&mut self) {}

    fn id(&self) -> ComponentId {
        self.core().id()
    }

    fn name(&self) -> &'static str {
        self.core().name()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.core().lifecycle()
    }

    /// The component's current markup. Does not modify anything.
    fn markup(&self) -> String {
        self.core().markup()
    }

    /// Register a child for lifecycle propagation. Returns `false` if it
    /// was already registered.
    fn add_child(&mut self, child: Box<dyn Component>) -> bool {
        self.core_mut().add_child(child)
    }

    /// Wire listeners, then mount every child in registration order.
    ///
    /// Mounting again re-wires without duplicating listeners. Mounting an
    /// unmounted component does nothing.
    fn on_mount(&mut self) {
        if !self.core_mut().begin_mount() {
            return;
        }
        self.wire();
        self.core_mut().mount_children();
    }

    /// Strip listeners from every live element, then unmount every child.
    fn on_unmount(&mut self) {
        self.core_mut().unmount();
    }
}

/// Attach a root component's elements under `parent` and mount it.
pub fn mount_root(component: &mut dyn Component, parent: NodeId) -> Result<(), SurfaceError> {
    let surface = std::sync::Arc::clone(component.core().surface());
    for element in component.core().elements() {
        surface.append_child(parent, *element)?;
    }
    debug!(component = component.name(), parent = parent.raw(), "root attached");
    component.on_mount();
    Ok(())
}
