//! Error types for editor operations.

use thiserror::Error;

use crate::platform::PlatformError;

/// Errors surfaced by the editor's fallible entry points.
///
/// Formatting commands and state queries never produce these: the host surface
/// gives no reliable failure signal, so those paths log and carry on. Errors
/// here come from the string/JS boundary and from the CRUD wire contract.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EditorError {
    /// Command id is not one of the supported capabilities.
    #[error("unknown editor command: {0}")]
    UnknownCommand(String),

    /// Host surface operation failed.
    #[error("surface error: {0}")]
    Platform(#[from] PlatformError),

    /// Editor configuration could not be loaded.
    #[error("invalid editor config: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// CRUD endpoint reported `success: false`.
    #[error("api error: {}", .0.as_deref().unwrap_or("request failed"))]
    Api(Option<String>),
}

impl From<serde_json::Error> for EditorError {
    fn from(e: serde_json::Error) -> Self {
        EditorError::Serialization(e.to_string())
    }
}
