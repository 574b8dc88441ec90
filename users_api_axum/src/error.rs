use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use users_api::UserError;

/// Terminal error type for the REST surface
///
/// Carries the numeric status and message every error response exposes;
/// rendering always produces the uniform `{"status", "message"}` body, so
/// no transport-level failure reaches the client for a handled request.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": self.status.as_u16(),
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}

/// Map storage errors into the response taxonomy
///
/// Constraint violations pass the store's diagnostic text through; any
/// other storage failure surfaces as 500 with its diagnostic.
impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => Self::not_found(),
            UserError::DuplicateKey(message) => Self::new(StatusCode::CONFLICT, message),
            UserError::NullConstraint(message) => Self::new(StatusCode::BAD_REQUEST, message),
            UserError::NoFieldsToUpdate => Self::bad_request("No fields to update"),
            UserError::Storage(message) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

/// Body-parsing failures keep the uniform error shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}
