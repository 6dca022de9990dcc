//! Cross-cutting error types for medkb.
//!
//! Search and configuration errors live in their own crates. `CoreError`
//! covers entity validation and lookups that any crate may raise.

use thiserror::Error;

/// Errors that can be raised by any medkb crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (ranges, required fields).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
