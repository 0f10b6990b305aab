//! PXE server errors

use thiserror::Error;

/// Errors surfaced by the boot server.
#[derive(Debug, Error)]
pub enum PxeError {
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A deployment update that was rejected as a whole.
///
/// Nothing is published and the registry keeps its previous manifest.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// An entry references a boot configuration that does not exist
    #[error("Host [{mac}] uses unknown config [{config_name}], stopping config update")]
    UnknownBootConfig { mac: String, config_name: String },

    /// Two entries name the same MAC address, compared ignoring case
    #[error("Host [{mac}] is listed more than once, stopping config update")]
    DuplicateMac { mac: String },

    /// The submitted manifest is not valid JSON
    #[error("Unable to parse deployment configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// An artifact for one of the entries could not be rendered
    #[error("Unable to render boot artifacts: {0}")]
    Render(#[from] RenderError),
}

/// A template was given input missing a field it cannot render without.
///
/// Inheritance from the global profile should always supply these, so
/// this points at an incomplete global default rather than a bad host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("{template} template requires [{field}]")]
    MissingField {
        template: &'static str,
        field: &'static str,
    },
}
