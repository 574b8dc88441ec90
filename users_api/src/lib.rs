//! users_api - Users resource storage library
//!
//! This crate translates Users operations into parameterized SQL statements
//! against a SQLite or PostgreSQL store and classifies the store's
//! constraint violations into the crate's error taxonomy.

mod config;
mod storage;
mod users;

pub use config::USERS_ROUTE_PREFIX;
pub use users::{NewUser, User, UserError, UserStore, UserUpdate};

#[cfg(test)]
mod test_utils;

/// Initialize the data store connection and the users table
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    users::init().await?;
    Ok(())
}
