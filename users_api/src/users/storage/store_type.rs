use crate::storage::USERS_DATA_STORE;
use crate::users::{
    errors::UserError,
    types::{NewUser, User, UserUpdate},
};

use super::postgres::*;
use super::sqlite::*;

/// Users table operations, dispatched to the configured backend
///
/// Each operation acquires the store guard for the duration of its single
/// statement, so at most one statement is in flight at a time.
pub struct UserStore;

impl UserStore {
    /// Initialize the users table
    pub async fn init() -> Result<(), UserError> {
        let store = USERS_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_users_table_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_users_table_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Fetch every row of the users table
    pub async fn list_users() -> Result<Vec<User>, UserError> {
        let store = USERS_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            list_users_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            list_users_postgres(pool).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by id
    #[tracing::instrument(fields(user_id = %id))]
    pub async fn get_user(id: i64) -> Result<Option<User>, UserError> {
        let store = USERS_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            get_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => {
                tracing::debug!(found = true, "User lookup completed");
            }
            Ok(None) => {
                tracing::debug!(found = false, "User lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
            }
        }

        result
    }

    /// Insert a user and return the store-generated id
    #[tracing::instrument(skip(new_user))]
    pub async fn insert_user(new_user: &NewUser) -> Result<i64, UserError> {
        let store = USERS_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            insert_user_sqlite(pool, new_user).await
        } else if let Some(pool) = store.as_postgres() {
            insert_user_postgres(pool, new_user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(id) => {
                tracing::info!(user_id = %id, "User created");
            }
            Err(e) => {
                tracing::error!(error = %e, "User insert failed");
            }
        }

        result
    }

    /// Apply a partial update to a user row, returning the affected-row count
    ///
    /// An empty change set is rejected before any statement is issued.
    #[tracing::instrument(skip(changes), fields(user_id = %id))]
    pub async fn update_user(id: i64, changes: &UserUpdate) -> Result<u64, UserError> {
        if changes.is_empty() {
            return Err(UserError::NoFieldsToUpdate);
        }

        let store = USERS_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            update_user_sqlite(pool, id, changes).await
        } else if let Some(pool) = store.as_postgres() {
            update_user_postgres(pool, id, changes).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(affected) => {
                tracing::info!(affected, "User update completed");
            }
            Err(e) => {
                tracing::error!(error = %e, "User update failed");
            }
        }

        result
    }

    /// Delete a user row by id, returning the affected-row count
    pub async fn delete_user(id: i64) -> Result<u64, UserError> {
        let store = USERS_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use serial_test::serial;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Helper to build a creation payload with a unique email
    fn test_user(suffix: &str) -> NewUser {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        NewUser {
            email: Some(format!("user-{suffix}-{nanos}@example.com")),
            full_name: Some(format!("Test User {suffix}")),
        }
    }

    /// UserStore initialization is idempotent
    #[tokio::test]
    #[serial]
    async fn test_userstore_init() {
        init_test_environment().await;

        let result = UserStore::init().await;
        assert!(result.is_ok(), "UserStore initialization should succeed");

        let result2 = UserStore::init().await;
        assert!(result2.is_ok(), "UserStore re-initialization should succeed");
    }

    /// Create a user and read it back by the generated id
    #[tokio::test]
    #[serial]
    async fn test_userstore_insert_and_get() {
        init_test_environment().await;

        let new_user = test_user("create");

        let id = UserStore::insert_user(&new_user)
            .await
            .expect("Creating user should succeed");
        assert!(id > 0, "Generated id should be positive");

        let fetched = UserStore::get_user(id)
            .await
            .expect("Getting user should succeed")
            .expect("User should be found");

        assert_eq!(fetched.id, id);
        assert_eq!(Some(fetched.email.clone()), new_user.email);
        assert_eq!(Some(fetched.full_name.clone()), new_user.full_name);

        // Clean up
        let _ = UserStore::delete_user(id).await;
    }

    /// Inserting the same email twice classifies as a duplicate key
    #[tokio::test]
    #[serial]
    async fn test_userstore_insert_duplicate_email() {
        init_test_environment().await;

        let new_user = test_user("dup");

        let id = UserStore::insert_user(&new_user)
            .await
            .expect("First insert should succeed");

        let result = UserStore::insert_user(&new_user).await;
        assert!(
            matches!(result, Err(UserError::DuplicateKey(_))),
            "Second insert should classify as DuplicateKey, got {result:?}"
        );

        // Clean up
        let _ = UserStore::delete_user(id).await;
    }

    /// A missing required field classifies as a null-constraint violation
    #[tokio::test]
    #[serial]
    async fn test_userstore_insert_missing_full_name() {
        init_test_environment().await;

        let new_user = NewUser {
            email: test_user("null").email,
            full_name: None,
        };

        let result = UserStore::insert_user(&new_user).await;
        assert!(
            matches!(result, Err(UserError::NullConstraint(_))),
            "Insert without full_name should classify as NullConstraint, got {result:?}"
        );
    }

    /// Updating only full_name leaves email untouched
    #[tokio::test]
    #[serial]
    async fn test_userstore_partial_update() {
        init_test_environment().await;

        let new_user = test_user("update");
        let id = UserStore::insert_user(&new_user)
            .await
            .expect("Insert should succeed");

        let changes = UserUpdate {
            full_name: Some(Some("Updated Name".to_string())),
            ..Default::default()
        };

        let affected = UserStore::update_user(id, &changes)
            .await
            .expect("Update should succeed");
        assert_eq!(affected, 1, "Exactly one row should be updated");

        let fetched = UserStore::get_user(id)
            .await
            .expect("Getting user should succeed")
            .expect("User should exist");

        assert_eq!(fetched.full_name, "Updated Name");
        assert_eq!(Some(fetched.email), new_user.email, "email should be unchanged");

        // Clean up
        let _ = UserStore::delete_user(id).await;
    }

    /// An empty change set is rejected before any statement is issued
    #[tokio::test]
    #[serial]
    async fn test_userstore_update_no_fields() {
        init_test_environment().await;

        let result = UserStore::update_user(1, &UserUpdate::default()).await;
        assert!(matches!(result, Err(UserError::NoFieldsToUpdate)));
    }

    /// Updating a nonexistent id affects zero rows, without error
    #[tokio::test]
    #[serial]
    async fn test_userstore_update_nonexistent() {
        init_test_environment().await;

        let changes = UserUpdate {
            full_name: Some(Some("Nobody".to_string())),
            ..Default::default()
        };

        let affected = UserStore::update_user(i64::MAX, &changes)
            .await
            .expect("Update of missing row should not error");
        assert_eq!(affected, 0);
    }

    /// A present-null field attempts to null the column and is classified
    #[tokio::test]
    #[serial]
    async fn test_userstore_update_null_field() {
        init_test_environment().await;

        let new_user = test_user("nullup");
        let id = UserStore::insert_user(&new_user)
            .await
            .expect("Insert should succeed");

        let changes = UserUpdate {
            full_name: Some(None),
            ..Default::default()
        };

        let result = UserStore::update_user(id, &changes).await;
        assert!(
            matches!(result, Err(UserError::NullConstraint(_))),
            "Nulling full_name should classify as NullConstraint, got {result:?}"
        );

        // Clean up
        let _ = UserStore::delete_user(id).await;
    }

    /// Deletion affects one row, then zero on repeat
    #[tokio::test]
    #[serial]
    async fn test_userstore_delete() {
        init_test_environment().await;

        let new_user = test_user("delete");
        let id = UserStore::insert_user(&new_user)
            .await
            .expect("Insert should succeed");

        let affected = UserStore::delete_user(id).await.expect("Delete should succeed");
        assert_eq!(affected, 1);

        let gone = UserStore::get_user(id)
            .await
            .expect("Getting user should succeed");
        assert!(gone.is_none(), "User should not exist after deletion");

        let affected = UserStore::delete_user(id)
            .await
            .expect("Repeat delete should not error");
        assert_eq!(affected, 0);
    }

    /// Listing returns every created row
    #[tokio::test]
    #[serial]
    async fn test_userstore_list_users() {
        init_test_environment().await;

        let initial = UserStore::list_users().await.unwrap_or_default().len();

        let id1 = UserStore::insert_user(&test_user("list1"))
            .await
            .expect("Insert 1 should succeed");
        let id2 = UserStore::insert_user(&test_user("list2"))
            .await
            .expect("Insert 2 should succeed");

        let all_users = UserStore::list_users().await.expect("List should succeed");
        assert_eq!(all_users.len(), initial + 2, "Should have 2 additional users");

        let ids: Vec<i64> = all_users.iter().map(|u| u.id).collect();
        assert!(ids.contains(&id1), "User 1 should be in results");
        assert!(ids.contains(&id2), "User 2 should be in results");

        // Clean up
        let _ = UserStore::delete_user(id1).await;
        let _ = UserStore::delete_user(id2).await;
    }

    /// Fetching an id with no matching row returns None, not an error
    #[tokio::test]
    #[serial]
    async fn test_userstore_get_nonexistent() {
        init_test_environment().await;

        let result = UserStore::get_user(i64::MAX).await;
        assert!(result.is_ok(), "Query for missing user should succeed");
        assert!(
            result.expect("Query should succeed").is_none(),
            "Missing user should return None"
        );
    }
}
