//! Error types for the editor

use mailwright_model::ModelError;
use thiserror::Error;

/// Failures of the few genuinely fallible editor operations: loading,
/// saving and store lookups. Gestures and prop edits never fail; they
/// leave the tree unchanged instead.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid tree: {0}")]
    Model(#[from] ModelError),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
