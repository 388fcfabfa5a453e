//! Catalog load errors.

/// Message shown in place of the grid when the catalog cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str =
    "Error cargando productos. Revisa la URL del API en ferjo.toml o define FERJO_API_BASE.";

/// Errors that stop the initial catalog load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No endpoint is known.
    #[error("No hay API configurada. Define api.base en ferjo.toml o la variable FERJO_API_BASE.")]
    NotConfigured,

    /// The endpoint answered with a non-success status.
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    /// The endpoint could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The body was not a JSON document.
    #[error("Format error: {0}")]
    Format(String),
}

impl LoadError {
    /// True for the missing-endpoint case.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }

    /// Text for the end user. Both fatal kinds share the same message.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILURE_MESSAGE
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LoadError::Format(e.to_string())
        } else {
            LoadError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Format(e.to_string())
    }
}
