mod data_store;
mod errors;
mod schema_validation;

pub(crate) use data_store::{DB_TABLE_PREFIX, USERS_DATA_STORE};
pub(crate) use errors::StorageError;

pub(crate) async fn init() -> Result<(), StorageError> {
    let _ = *USERS_DATA_STORE;

    Ok(())
}

// Re-export schema validation functions for internal use
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
