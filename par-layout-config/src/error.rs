//! Typed error variants for the par-layout-config crate.
//!
//! Callers at the crate boundary can match on specific failure modes instead
//! of relying on opaque `anyhow` strings. File helpers still return
//! `anyhow::Result`; these values coerce through `anyhow`'s blanket `From`
//! and can be recovered with `downcast_ref::<ConfigError>()`.

use thiserror::Error;

/// Errors that can occur when reading layout requests or settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a file.
    #[error("I/O error reading layout config: {0}")]
    Io(#[from] std::io::Error),

    /// A layout document contained invalid JSON.
    #[error("JSON parse error in layout config: {0}")]
    Json(#[from] serde_json::Error),

    /// A layout document or settings file contained invalid YAML.
    #[error("YAML parse error in layout config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The marker was found in host output but the payload after it could
    /// not be parsed as a layout request.
    #[error("Malformed layout request payload: {source}")]
    Payload {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
