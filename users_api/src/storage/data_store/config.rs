//! Data store connection configuration

use std::{env, str::FromStr, sync::LazyLock};
use tokio::sync::Mutex;

use super::types::{DataStore, PostgresStore, SqliteStore};

// Configuration
static USERS_DB_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("USERS_DB_TYPE").expect("USERS_DB_TYPE must be set"));

static USERS_DB_URL: LazyLock<String> =
    LazyLock::new(|| env::var("USERS_DB_URL").expect("USERS_DB_URL must be set"));

pub(crate) static USERS_DATA_STORE: LazyLock<Mutex<Box<dyn DataStore>>> = LazyLock::new(|| {
    let store_type = USERS_DB_TYPE.as_str();
    let store_url = USERS_DB_URL.as_str();

    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store = match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .expect("Failed to parse SQLite connection string")
                .create_if_missing(true);

            Box::new(SqliteStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }) as Box<dyn DataStore>
        }
        "postgres" => Box::new(PostgresStore {
            pool: sqlx::PgPool::connect_lazy(store_url).expect("Failed to create Postgres pool"),
        }) as Box<dyn DataStore>,
        t => panic!(
            "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
            t
        ),
    };

    Mutex::new(store)
});

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "api_".to_string()));

#[cfg(test)]
mod tests {
    use std::env;

    #[test]
    fn test_db_table_prefix_default() {
        // Test the same logic the LazyLock uses without touching the
        // initialized static
        let prefix = env::var("DB_TABLE_PREFIX_UNSET_FOR_TEST").unwrap_or_else(|_| "api_".to_string());
        assert_eq!(prefix, "api_");
    }

    #[test]
    #[should_panic(expected = "Unsupported store type")]
    fn test_unsupported_store_type() {
        // Simplified version of the store initialization match that panics
        // with the expected message
        let store_type = "unsupported";
        match store_type {
            "sqlite" => {}
            "postgres" => {}
            t => panic!(
                "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
                t
            ),
        };
    }
}
