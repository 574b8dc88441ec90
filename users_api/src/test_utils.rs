//! Test utilities for shared test initialization
//!
//! Centralizes environment configuration and store initialization so every
//! store-backed test runs against the same shared-cache in-memory SQLite
//! database.

use std::sync::Once;

/// Ensure the test data store is configured and the users table exists
///
/// Environment variables already present (e.g. from `.env_test`) win; the
/// defaults select a shared-cache in-memory SQLite database so all pooled
/// connections see the same data.
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if std::env::var("USERS_DB_TYPE").is_err() {
            unsafe {
                std::env::set_var("USERS_DB_TYPE", "sqlite");
            }
        }
        if std::env::var("USERS_DB_URL").is_err() {
            unsafe {
                std::env::set_var(
                    "USERS_DB_URL",
                    "sqlite:file:users_api_test?mode=memory&cache=shared",
                );
            }
        }
    });

    if let Err(e) = crate::users::UserStore::init().await {
        eprintln!("Warning: failed to initialize UserStore: {e}");
    }
}
