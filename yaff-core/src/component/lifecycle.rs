//! Component Lifecycle
//!
//! The state every compiled component shares: its rendered elements, its
//! children, its registered listeners and its lifecycle. Generated
//! components embed a [`ComponentCore`] and add their own states and
//! identifiers next to it.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use super::context::Context;
use super::id::ElementId;
use super::listeners::ListenerRegistry;
use super::props::Props;
use super::{Component, ComponentId, Lifecycle};
use crate::error::ComponentError;
use crate::surface::{NodeId, Surface};

/// Shared lifecycle state of a component.
pub struct ComponentCore {
    id: ComponentId,
    name: &'static str,
    cx: Context,
    props: Props,

    /// Top-level rendered nodes, populated once by [`ComponentCore::render`].
    elements: Vec<NodeId>,
    rendered: bool,

    /// Mounted and unmounted together with this component, in insertion order.
    children: IndexMap<ComponentId, Box<dyn Component>>,

    listeners: ListenerRegistry,
    lifecycle: Lifecycle,
}

impl ComponentCore {
    pub fn new(name: &'static str, cx: &Context, props: Props) -> Self {
        Self {
            id: ComponentId::new(),
            name,
            cx: cx.clone(),
            props,
            elements: Vec::new(),
            rendered: false,
            children: IndexMap::new(),
            listeners: ListenerRegistry::new(),
            lifecycle: Lifecycle::Constructed,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn surface(&self) -> &Arc<dyn Surface> {
        self.cx.surface()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Number of listeners currently registered by this component.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn Component> {
        self.children.values().map(|child| &**child as &dyn Component)
    }

    pub fn child(&self, id: ComponentId) -> Option<&dyn Component> {
        self.children.get(&id).map(|child| &**child as &dyn Component)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Parse `markup` and take its top-level elements as this component's elements.
    ///
    /// Must be called exactly once, after every state is wired.
    pub fn render(&mut self, markup: &str) -> Result<(), ComponentError> {
        if self.rendered {
            return Err(ComponentError::AlreadyRendered(self.name));
        }
        self.elements = self.cx.surface().create_fragment(markup)?;
        self.rendered = true;
        debug!(
            component = self.name,
            elements = self.elements.len(),
            "component rendered"
        );
        Ok(())
    }

    /// Serialised markup of every element, in order.
    pub fn markup(&self) -> String {
        let surface = self.cx.surface();
        self.elements
            .iter()
            .map(|element| surface.outer_markup(*element))
            .collect()
    }

    /// Register `child` for lifecycle propagation.
    ///
    /// Returns `false` if a component with the same id is already a child.
    pub fn add_child(&mut self, child: Box<dyn Component>) -> bool {
        let id = child.id();
        if self.children.contains_key(&id) {
            return false;
        }
        trace!(component = self.name, child = child.name(), "child added");
        self.children.insert(id, child);
        true
    }

    /// Attach `handler` to the live element identified by `target`.
    ///
    /// A missing element is skipped. Returns whether a listener was attached.
    pub fn listen<F>(&mut self, target: &ElementId, event: &str, handler: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        let surface = self.cx.surface();
        let Some(node) = surface.find_by_id(target) else {
            self.cx.missing_target(target, "listen");
            return false;
        };
        match surface.add_listener(node, event, Arc::new(handler)) {
            Some(listener) => {
                self.listeners.record(node, listener);
                trace!(component = self.name, target_id = %target, event, "listener attached");
                true
            }
            None => {
                self.cx.missing_target(target, "listen");
                false
            }
        }
    }

    /// Enter `Mounted`, dropping listeners from a previous mount.
    ///
    /// Returns `false` if the component was already unmounted.
    pub(crate) fn begin_mount(&mut self) -> bool {
        match self.lifecycle {
            Lifecycle::Unmounted => {
                warn!(component = self.name, "mount after unmount ignored");
                return false;
            }
            Lifecycle::Mounted => {
                let removed = self.listeners.clear(self.cx.surface().as_ref());
                debug!(component = self.name, removed, "remounting component");
            }
            Lifecycle::Constructed => {
                debug!(component = self.name, "mounting component");
            }
        }
        self.lifecycle = Lifecycle::Mounted;
        true
    }

    pub(crate) fn mount_children(&mut self) {
        for child in self.children.values_mut() {
            child.on_mount();
        }
    }

    /// Strip listeners by swapping each attached element for a deep clone,
    /// then unmount every child.
    pub(crate) fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            trace!(component = self.name, "already unmounted");
            return;
        }
        let surface = Arc::clone(self.cx.surface());

        for element in &mut self.elements {
            if !surface.is_attached(*element) {
                continue;
            }
            match surface.deep_clone(*element) {
                Ok(copy) => {
                    if surface.replace_with(*element, copy) {
                        *element = copy;
                    }
                }
                Err(err) => warn!(component = self.name, error = %err, "could not clone element"),
            }
        }
        let removed = self.listeners.clear(surface.as_ref());

        for child in self.children.values_mut() {
            child.on_unmount();
        }
        self.lifecycle = Lifecycle::Unmounted;
        debug!(component = self.name, removed, "component unmounted");
    }
}

impl std::fmt::Debug for ComponentCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentCore")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("elements", &self.elements)
            .field("children", &self.children.len())
            .field("listeners", &self.listeners.len())
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::surface::MemorySurface;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Leaf {
        core: ComponentCore,
        mounts: Arc<AtomicUsize>,
    }

    impl Component for Leaf {
        fn construct(cx: &Context, _props: Props) -> Result<Self, ComponentError> {
            let mut core = ComponentCore::new("Leaf", cx, Props::new());
            core.render(r#"<button id="leaf">x</button>"#)?;
            Ok(Self {
                core,
                mounts: Arc::new(AtomicUsize::new(0)),
            })
        }

        fn core(&self) -> &ComponentCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ComponentCore {
            &mut self.core
        }

        fn wire(&mut self) {
            self.mounts.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// A component that reports a fixed identity, standing in for a second
    /// registration of the same instance.
    struct Alias {
        core: ComponentCore,
        id: ComponentId,
    }

    impl Component for Alias {
        fn construct(cx: &Context, _props: Props) -> Result<Self, ComponentError> {
            Ok(Self {
                core: ComponentCore::new("Alias", cx, Props::new()),
                id: ComponentId::new(),
            })
        }

        fn core(&self) -> &ComponentCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ComponentCore {
            &mut self.core
        }

        fn id(&self) -> ComponentId {
            self.id
        }
    }

    fn context() -> (Arc<MemorySurface>, Context) {
        let surface = Arc::new(MemorySurface::new());
        let cx = Context::new(surface.clone(), RuntimeConfig::default()).unwrap();
        (surface, cx)
    }

    #[test]
    fn render_happens_once() {
        let (_surface, cx) = context();
        let mut core = ComponentCore::new("Once", &cx, Props::new());
        core.render("<p>a</p>").unwrap();

        let err = core.render("<p>b</p>").unwrap_err();
        assert!(matches!(err, ComponentError::AlreadyRendered("Once")));
        assert_eq!(core.markup(), "<p>a</p>");
    }

    #[test]
    fn markup_concatenates_elements_in_order() {
        let (_surface, cx) = context();
        let mut core = ComponentCore::new("Pair", &cx, Props::new());
        core.render("<p>a</p>\n<p>b</p>").unwrap();
        assert_eq!(core.elements().len(), 2);
        assert_eq!(core.markup(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn add_child_has_set_semantics() {
        let (_surface, cx) = context();
        let mut core = ComponentCore::new("Parent", &cx, Props::new());
        let leaf = Leaf::construct(&cx, Props::new()).unwrap();
        let leaf_id = leaf.id();

        assert!(core.add_child(Box::new(leaf)));
        assert_eq!(core.child_count(), 1);
        assert_eq!(core.child(leaf_id).map(|c| c.name()), Some("Leaf"));
    }

    #[test]
    fn add_child_ignores_a_repeated_identity() {
        let (_surface, cx) = context();
        let mut core = ComponentCore::new("Parent", &cx, Props::new());
        let first = Alias::construct(&cx, Props::new()).unwrap();
        let shared = first.id();
        let mut second = Alias::construct(&cx, Props::new()).unwrap();
        second.id = shared;

        assert!(core.add_child(Box::new(first)));
        assert!(!core.add_child(Box::new(second)));
        assert_eq!(core.child_count(), 1);
        assert!(core.child(shared).is_some());
    }

    #[test]
    fn listen_skips_missing_target() {
        let (_surface, cx) = context();
        let mut core = ComponentCore::new("Lonely", &cx, Props::new());
        core.render(r#"<button id="here">x</button>"#).unwrap();

        // Rendered but never attached: nothing can be found yet.
        assert!(!core.listen(&ElementId::from("here"), "click", || {}));
        assert_eq!(core.listener_count(), 0);
    }

    #[test]
    fn lifecycle_transitions() {
        let (surface, cx) = context();
        let mut leaf = Leaf::construct(&cx, Props::new()).unwrap();
        assert_eq!(leaf.lifecycle(), Lifecycle::Constructed);

        super::super::mount_root(&mut leaf, surface.root()).unwrap();
        assert_eq!(leaf.lifecycle(), Lifecycle::Mounted);

        leaf.on_unmount();
        assert_eq!(leaf.lifecycle(), Lifecycle::Unmounted);

        leaf.on_mount();
        assert_eq!(leaf.lifecycle(), Lifecycle::Unmounted);
        assert_eq!(leaf.mounts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unmount_replaces_attached_elements_with_clones() {
        let (surface, cx) = context();
        let mut leaf = Leaf::construct(&cx, Props::new()).unwrap();
        super::super::mount_root(&mut leaf, surface.root()).unwrap();
        let original = leaf.core().elements()[0];

        leaf.on_unmount();

        let replacement = leaf.core().elements()[0];
        assert_ne!(original, replacement);
        assert!(!surface.is_attached(original));
        assert!(surface.is_attached(replacement));
        assert_eq!(surface.find_by_id(&ElementId::from("leaf")), Some(replacement));
    }

    #[test]
    fn unmount_leaves_detached_elements_alone() {
        let (surface, cx) = context();
        let mut leaf = Leaf::construct(&cx, Props::new()).unwrap();
        let original = leaf.core().elements()[0];

        leaf.on_unmount();

        assert_eq!(leaf.core().elements()[0], original);
        assert!(surface.mutations().is_empty());
    }
}
