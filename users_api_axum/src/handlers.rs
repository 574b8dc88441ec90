use axum::Json;
use axum::extract::{FromRequest, Path};
use serde_json::{Value, json};

use users_api::{NewUser, User, UserStore, UserUpdate};

use crate::error::ApiError;

/// JSON extractor whose rejection reports through the uniform error body
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub(crate) struct ApiJson<T>(pub(crate) T);

/// Parse the id path segment, rejecting before any store call
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::bad_request("Invalid id"))
}

/// GET collection root: every row, no pagination
pub(crate) async fn list_users() -> Result<Json<Vec<User>>, ApiError> {
    let users = UserStore::list_users().await?;

    Ok(Json(users))
}

/// POST collection root: insert and return the generated id
pub(crate) async fn create_user(
    ApiJson(new_user): ApiJson<NewUser>,
) -> Result<Json<Value>, ApiError> {
    let id = UserStore::insert_user(&new_user).await?;

    Ok(Json(json!({ "id": id })))
}

/// GET item: the single matching row
pub(crate) async fn get_user(Path(raw_id): Path<String>) -> Result<Json<User>, ApiError> {
    let id = parse_id(&raw_id)?;

    match UserStore::get_user(id).await? {
        Some(user) if user.id == id => Ok(Json(user)),
        _ => Err(ApiError::not_found()),
    }
}

/// PUT item: partial update from the supplied field set
pub(crate) async fn update_user(
    Path(raw_id): Path<String>,
    ApiJson(changes): ApiJson<UserUpdate>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id)?;

    match UserStore::update_user(id, &changes).await? {
        0 => Err(ApiError::not_found()),
        _ => Ok(Json(json!({ "id": id }))),
    }
}

/// DELETE item
pub(crate) async fn delete_user(Path(raw_id): Path<String>) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id)?;

    match UserStore::delete_user(id).await? {
        0 => Err(ApiError::not_found()),
        _ => Ok(Json(json!({ "id": id }))),
    }
}

/// Any verb not explicitly routed on a known route
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_parse_id_accepts_integers() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("-3").unwrap(), -3);
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        for raw in ["abc", "12.5", "7seven", "", " 7"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "segment {raw:?}");
            assert_eq!(err.message, "Invalid id");
        }
    }

    #[test]
    fn test_parse_id_rejects_out_of_range() {
        // Larger than the id space is the same bad request as non-numeric
        let err = parse_id("99999999999999999999").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid id");
    }
}
