use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::users::{
    errors::UserError,
    types::{NewUser, User, UserUpdate},
};

use super::config::DB_TABLE_USERS;
use super::map_db_error;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    // Create users table
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// Validates that the users table schema matches what we expect
pub(super) async fn validate_users_table_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    // Define expected schema (column name, data type)
    let expected_columns = vec![("id", "INTEGER"), ("email", "TEXT"), ("full_name", "TEXT")];

    validate_sqlite_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn list_users_sqlite(pool: &Pool<Sqlite>) -> Result<Vec<User>, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} ORDER BY id ASC
        "#
    ))
    .fetch_all(pool)
    .await
    .map_err(map_db_error)
}

pub(super) async fn get_user_sqlite(pool: &Pool<Sqlite>, id: i64) -> Result<Option<User>, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = ?
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)
}

pub(super) async fn insert_user_sqlite(
    pool: &Pool<Sqlite>,
    new_user: &NewUser,
) -> Result<i64, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    // Absent fields bind NULL so the NOT NULL constraints are the validator
    sqlx::query_scalar::<_, i64>(&format!(
        r#"
        INSERT INTO {table_name} (email, full_name) VALUES (?, ?) RETURNING id
        "#
    ))
    .bind(new_user.email.as_deref())
    .bind(new_user.full_name.as_deref())
    .fetch_one(pool)
    .await
    .map_err(map_db_error)
}

pub(super) async fn update_user_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
    changes: &UserUpdate,
) -> Result<u64, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    // SET clause built from the supplied fields, in the order encountered
    let mut assignments = Vec::new();
    if changes.email.is_some() {
        assignments.push("email = ?");
    }
    if changes.full_name.is_some() {
        assignments.push("full_name = ?");
    }

    let sql = format!(
        "UPDATE {table_name} SET {} WHERE id = ?",
        assignments.join(", ")
    );

    let mut query = sqlx::query(&sql);
    if let Some(email) = &changes.email {
        query = query.bind(email.as_deref());
    }
    if let Some(full_name) = &changes.full_name {
        query = query.bind(full_name.as_deref());
    }

    let result = query.bind(id).execute(pool).await.map_err(map_db_error)?;

    Ok(result.rows_affected())
}

pub(super) async fn delete_user_sqlite(pool: &Pool<Sqlite>, id: i64) -> Result<u64, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE id = ?
        "#
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected())
}
