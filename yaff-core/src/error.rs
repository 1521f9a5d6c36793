//! Error Types
//!
//! Only construction-time contract violations are reported as errors.
//! A missing patch target or an absent state value is an expected condition
//! in a partially mounted tree and is handled silently where it happens.

use thiserror::Error;

use crate::surface::NodeId;

/// Failures reported by a rendering surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Inserting `child` under `parent` would make a node its own ancestor.
    #[error("appending {child:?} under {parent:?} would create a cycle")]
    Hierarchy { parent: NodeId, child: NodeId },

    /// The node handle does not belong to this surface.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}

/// Failures raised while constructing a component.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// A required prop was not supplied by the parent.
    #[error("component `{component}` requires prop `{prop}`")]
    MissingProp {
        component: &'static str,
        prop: String,
    },

    /// A prop was supplied with a different value type than the component expects.
    #[error("prop `{prop}` of component `{component}` is not a ReactiveValue<{expected}>")]
    PropType {
        component: &'static str,
        prop: String,
        expected: &'static str,
    },

    /// `render` was called on a component that already owns its elements.
    #[error("component `{0}` has already been rendered")]
    AlreadyRendered(&'static str),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Failures while loading a [`RuntimeConfig`](crate::config::RuntimeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
