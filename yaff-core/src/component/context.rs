//! Construction Context
//!
//! A [`Context`] is handed to every component constructor. It carries the
//! rendering surface, the runtime configuration and, for an embedded child,
//! the identifier scope chosen by its parent. Nothing is ambient: reactions
//! and handlers capture exactly what they need from the context at
//! construction time.

use std::sync::Arc;

use tracing::{trace, warn};

use super::id::{ElementId, IdScope};
use crate::config::RuntimeConfig;
use crate::error::ConfigError;
use crate::surface::Surface;

/// Everything a component needs from its environment.
#[derive(Clone)]
pub struct Context {
    surface: Arc<dyn Surface>,
    config: Arc<RuntimeConfig>,
    scope: Option<IdScope>,
}

impl Context {
    /// A root context. Fails if `config` does not validate.
    pub fn new(surface: Arc<dyn Surface>, config: RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            surface,
            config: Arc::new(config),
            scope: None,
        })
    }

    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// A context for a child embedded at `scope`.
    pub fn embedded(&self, scope: IdScope) -> Context {
        Self {
            surface: Arc::clone(&self.surface),
            config: Arc::clone(&self.config),
            scope: Some(scope),
        }
    }

    /// The scope a component named `name` generates its identifiers under.
    pub fn scope_for(&self, name: &str) -> IdScope {
        match &self.scope {
            Some(scope) => scope.clone(),
            None => IdScope::new(name, &self.config.id_separator),
        }
    }

    /// Log a patch or listener that was skipped because its target is missing.
    pub(crate) fn missing_target(&self, id: &ElementId, action: &'static str) {
        report_missing_target(self.config.report_missing_targets, id, action);
    }
}

pub(crate) fn report_missing_target(loud: bool, id: &ElementId, action: &'static str) {
    if loud {
        warn!(target_id = %id, action, "target element not found, skipping");
    } else {
        trace!(target_id = %id, action, "target element not found, skipping");
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
