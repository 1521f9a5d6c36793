//! Runtime Configuration
//!
//! Settings shared by every component constructed from the same
//! [`Context`](crate::component::Context). Configuration is plain JSON so a
//! host can ship it next to the generated modules.
//!
//! ```json
//! { "id_separator": ".", "report_missing_targets": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime settings for identifier generation and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Separator placed between the segments of an element identifier.
    pub id_separator: String,

    /// Log skipped patches and skipped listener wiring at `warn` instead of `trace`.
    pub report_missing_targets: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            id_separator: ".".to_string(),
            report_missing_targets: false,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can be used to build identifiers.
    ///
    /// The separator ends up inside a quoted `id` attribute, so it must not
    /// contain whitespace or quotes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id_separator.is_empty() {
            return Err(ConfigError::Invalid {
                field: "id_separator",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(bad) = self
            .id_separator
            .chars()
            .find(|c| c.is_whitespace() || *c == '"' || *c == '\'')
        {
            return Err(ConfigError::Invalid {
                field: "id_separator",
                reason: format!("must not contain {bad:?}"),
            });
        }
        Ok(())
    }
}
