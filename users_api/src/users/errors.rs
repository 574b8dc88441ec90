use thiserror::Error;

/// Errors surfaced by Users storage operations
///
/// The constraint variants carry the store's own diagnostic text so the
/// HTTP layer can pass it through unchanged.
#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    /// Unique-constraint violation
    #[error("{0}")]
    DuplicateKey(String),

    /// Not-null-constraint violation
    #[error("{0}")]
    NullConstraint(String),

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Storage error: {0}")]
    Storage(String),
}
