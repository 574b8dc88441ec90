use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Represents a row of the users table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

/// Payload for creating a user
///
/// Absent fields bind SQL NULL, so the table's NOT NULL constraints decide
/// what is required rather than the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Partial update for a user row
///
/// Each field is tri-state: absent (column left untouched), present-null
/// (column set to NULL), present-value. The double Option tells absent and
/// present-null apart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default, deserialize_with = "tri_state")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "tri_state")]
    pub full_name: Option<Option<String>>,
}

impl UserUpdate {
    /// True when no field was supplied at all
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.full_name.is_none()
    }
}

fn tri_state<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
