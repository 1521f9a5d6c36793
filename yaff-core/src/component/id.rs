//! Element Identifiers
//!
//! Every element a component patches or listens on carries a stable `id`
//! attribute built from the component's scope and the element's role, e.g.
//! `GreetingPanel.div1.div2.font1`. Identifiers are built once at
//! construction and handed to reactions and handlers as typed values.

use std::fmt;
use std::sync::Arc;

/// A stable element identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(Arc<str>);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// A prefix under which identifiers are generated.
///
/// A root component's scope is its own name. A parent that embeds a child
/// hands the child the scope of the embedding site, so two embedded
/// instances of the same component never share identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdScope {
    path: String,
    separator: Arc<str>,
}

impl IdScope {
    pub fn new(root: &str, separator: &str) -> Self {
        Self {
            path: root.to_string(),
            separator: Arc::from(separator),
        }
    }

    /// A nested scope, e.g. `Parent` -> `Parent.div1`.
    pub fn child(&self, segment: &str) -> IdScope {
        Self {
            path: self.join(segment),
            separator: Arc::clone(&self.separator),
        }
    }

    /// The identifier of an element directly inside this scope.
    pub fn id(&self, segment: &str) -> ElementId {
        ElementId::from(self.join(segment))
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    fn join(&self, segment: &str) -> String {
        let mut path = String::with_capacity(self.path.len() + self.separator.len() + segment.len());
        path.push_str(&self.path);
        path.push_str(&self.separator);
        path.push_str(segment);
        path
    }
}

impl fmt::Display for IdScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
