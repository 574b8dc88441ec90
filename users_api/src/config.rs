//! Central configuration for the users-api crate

use std::sync::LazyLock;

/// Route prefix under which the Users resource is mounted
///
/// This is the prefix the HTTP server nests the resource router under.
/// Default: "/api/v1/users"
pub static USERS_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("USERS_ROUTE_PREFIX").unwrap_or_else(|_| "/api/v1/users".to_string())
});
