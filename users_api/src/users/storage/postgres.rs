use sqlx::{Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::users::{
    errors::UserError,
    types::{NewUser, User, UserUpdate},
};

use super::config::DB_TABLE_USERS;
use super::map_db_error;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    // Create users table
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id BIGSERIAL PRIMARY KEY,
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
pub(super) async fn validate_users_table_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    // Define expected schema (column name, data type)
    let expected_columns = vec![("id", "bigint"), ("email", "text"), ("full_name", "text")];

    validate_postgres_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn list_users_postgres(pool: &Pool<Postgres>) -> Result<Vec<User>, UserError> {
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

pub(super) async fn get_user_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_db_error)
}

pub(super) async fn insert_user_postgres(
    pool: &Pool<Postgres>,
    new_user: &NewUser,
) -> Result<i64, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    // Absent fields bind NULL so the NOT NULL constraints are the validator
    sqlx::query_scalar::<_, i64>(&format!(
        r#"
        INSERT INTO {table_name} (email, full_name) VALUES ($1, $2) RETURNING id
        "#
    ))
    .bind(new_user.email.as_deref())
    .bind(new_user.full_name.as_deref())
    .fetch_one(pool)
    .await
    .map_err(map_db_error)
}

pub(super) async fn update_user_postgres(
    pool: &Pool<Postgres>,
    id: i64,
    changes: &UserUpdate,
) -> Result<u64, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    // SET clause built from the supplied fields, in the order encountered
    let mut assignments = Vec::new();
    let mut placeholder = 0;
    if changes.email.is_some() {
        placeholder += 1;
        assignments.push(format!("email = ${placeholder}"));
    }
    if changes.full_name.is_some() {
        placeholder += 1;
        assignments.push(format!("full_name = ${placeholder}"));
    }

    let sql = format!(
        "UPDATE {table_name} SET {} WHERE id = ${}",
        assignments.join(", "),
        placeholder + 1
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

pub(super) async fn delete_user_postgres(pool: &Pool<Postgres>, id: i64) -> Result<u64, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected())
}
