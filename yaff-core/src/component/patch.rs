//! Identifier-scoped Patches
//!
//! A state's reaction is a fixed list of bindings, each naming one element
//! by identifier and how to patch it. On every update the reaction looks the
//! element up on the live surface and overwrites its text or one attribute.
//! A binding whose element cannot be found is skipped; it starts working
//! again once an element with that identifier is attached.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use yaff_core::component::{patch, Binding, Context, ElementId};
//! use yaff_core::config::RuntimeConfig;
//! use yaff_core::reactive::ReactiveValue;
//! use yaff_core::surface::{MemorySurface, Surface};
//!
//! let surface = Arc::new(MemorySurface::new());
//! let cx = Context::new(surface.clone(), RuntimeConfig::default()).unwrap();
//!
//! let target = ElementId::from("Counter.font1");
//! let count = ReactiveValue::new(
//!     0,
//!     patch::reaction(&cx, vec![Binding::text(target.clone(), |n: &i32| format!("Count: {n}"))]),
//! );
//!
//! let nodes = surface.create_fragment(r#"<font id="Counter.font1">Count: 0</font>"#).unwrap();
//! surface.append_child(surface.root(), nodes[0]).unwrap();
//!
//! count.update(3);
//! assert_eq!(surface.text(nodes[0]).as_deref(), Some("Count: 3"));
//! ```

use std::sync::Arc;

use tracing::trace;

use super::context::{report_missing_target, Context};
use super::id::ElementId;
use crate::surface::Surface;

/// What a binding overwrites on its target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchKind {
    /// The element's text content.
    Text,
    /// The named attribute.
    Attribute(String),
}

/// One dependent element of a state.
pub struct Binding<T> {
    target: ElementId,
    kind: PatchKind,
    render: Arc<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> Binding<T> {
    /// Patch the text content of `target` with `render(value)`.
    pub fn text<F>(target: ElementId, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            target,
            kind: PatchKind::Text,
            render: Arc::new(render),
        }
    }

    /// Patch attribute `name` of `target` with `render(value)`.
    pub fn attribute<F>(target: ElementId, name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            target,
            kind: PatchKind::Attribute(name.into()),
            render: Arc::new(render),
        }
    }

    pub fn target(&self) -> &ElementId {
        &self.target
    }

    pub fn kind(&self) -> &PatchKind {
        &self.kind
    }

    /// Apply the patch for `value`. Returns `false` if the target is missing.
    pub fn apply(&self, surface: &dyn Surface, value: &T) -> bool {
        let Some(node) = surface.find_by_id(&self.target) else {
            return false;
        };
        let content = (self.render)(value);
        match &self.kind {
            PatchKind::Text => surface.set_text(node, &content),
            PatchKind::Attribute(name) => surface.set_attribute(node, name, &content),
        }
        trace!(target_id = %self.target, kind = ?self.kind, "patched element");
        true
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            kind: self.kind.clone(),
            render: Arc::clone(&self.render),
        }
    }
}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("target", &self.target)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Build the reaction that applies `bindings`, in order, on every update.
///
/// The surface is held weakly, so a reaction that outlives its surface
/// does nothing.
pub fn reaction<T>(cx: &Context, bindings: Vec<Binding<T>>) -> impl Fn(&T) + Send + Sync + 'static
where
    T: 'static,
{
    let surface = Arc::downgrade(cx.surface());
    let loud = cx.config().report_missing_targets;
    move |value: &T| {
        let Some(surface) = surface.upgrade() else {
            trace!("surface dropped, skipping patches");
            return;
        };
        for binding in &bindings {
            if !binding.apply(surface.as_ref(), value) {
                report_missing_target(loud, binding.target(), "patch");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::reactive::ReactiveValue;
    use crate::surface::{MemorySurface, Mutation};

    fn setup(markup: &str) -> (Arc<MemorySurface>, Context) {
        let surface = Arc::new(MemorySurface::new());
        for node in surface.create_fragment(markup).unwrap() {
            surface.append_child(surface.root(), node).unwrap();
        }
        let cx = Context::new(surface.clone(), RuntimeConfig::default()).unwrap();
        (surface, cx)
    }

    #[test]
    fn text_binding_patches_only_its_target() {
        let (surface, cx) = setup(r#"<font id="a">Hello, World!</font><font id="b">untouched</font>"#);
        let a = surface.find_by_id(&ElementId::from("a")).unwrap();

        let name = ReactiveValue::new(
            "World".to_string(),
            reaction(&cx, vec![Binding::text(ElementId::from("a"), |n: &String| format!("Hello, {n}!"))]),
        );
        name.update("Alice".to_string());

        assert_eq!(surface.text(a).as_deref(), Some("Hello, Alice!"));
        assert_eq!(
            surface.mutations(),
            vec![Mutation::Text {
                node: a,
                text: "Hello, Alice!".to_string()
            }]
        );
    }

    #[test]
    fn attribute_binding_sets_attribute() {
        let (surface, cx) = setup(r#"<progress id="bar" value="0"></progress>"#);
        let bar = surface.find_by_id(&ElementId::from("bar")).unwrap();

        let progress = ReactiveValue::new(
            0_u32,
            reaction(&cx, vec![Binding::attribute(ElementId::from("bar"), "value", |p: &u32| p.to_string())]),
        );
        progress.update(40);

        assert_eq!(surface.attribute(bar, "value").as_deref(), Some("40"));
    }

    #[test]
    fn missing_target_is_skipped_without_affecting_others() {
        let (surface, cx) = setup(r#"<font id="present">0</font>"#);
        let present = surface.find_by_id(&ElementId::from("present")).unwrap();

        let count = ReactiveValue::new(
            0,
            reaction(
                &cx,
                vec![
                    Binding::text(ElementId::from("absent"), |n: &i32| n.to_string()),
                    Binding::text(ElementId::from("present"), |n: &i32| n.to_string()),
                ],
            ),
        );
        count.update(5);

        assert_eq!(surface.text(present).as_deref(), Some("5"));
        assert_eq!(surface.mutations().len(), 1);
    }

    #[test]
    fn reaction_is_inert_after_surface_is_dropped() {
        let (surface, cx) = setup(r#"<font id="a">0</font>"#);
        let count = ReactiveValue::new(
            0,
            reaction(&cx, vec![Binding::text(ElementId::from("a"), |n: &i32| n.to_string())]),
        );
        drop(cx);
        drop(surface);

        count.update(1);
        assert_eq!(count.get(), Some(1));
    }
}
