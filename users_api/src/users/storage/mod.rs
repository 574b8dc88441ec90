mod config;
mod postgres;
mod sqlite;
mod store_type;

pub use store_type::UserStore;

use crate::users::errors::UserError;

/// Classify a sqlx error into the Users error taxonomy
///
/// The driver's own constraint classification (`DatabaseError::kind()`) is
/// the dispatch key, so the mapping is the same for SQLite and PostgreSQL.
pub(super) fn map_db_error(err: sqlx::Error) -> UserError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => {
                UserError::DuplicateKey(db_err.message().to_string())
            }
            sqlx::error::ErrorKind::NotNullViolation => {
                UserError::NullConstraint(db_err.message().to_string())
            }
            _ => UserError::Storage(err.to_string()),
        },
        _ => UserError::Storage(err.to_string()),
    }
}
