//! Route table for the Users resource

use axum::{Router, routing::get};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::ApiError;
use crate::handlers::{
    create_user, delete_user, get_user, list_users, method_not_allowed, update_user,
};

/// Create the Users resource router
///
/// Routes the collection root and item-by-id endpoints; any other verb on
/// either route answers 405. Mount it under the API path prefix with
/// `Router::nest`.
pub fn users_router() -> Router {
    users_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Create the Users resource router without HTTP tracing
///
/// This is the same as `users_router()` but without the tracing middleware.
/// Use this if you want to add your own tracing middleware or if you don't
/// need HTTP request tracing.
pub fn users_router_no_trace() -> Router {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(method_not_allowed),
        )
        .layer(CorsLayer::permissive())
}

/// Terminal handler for paths outside the resource mount point
pub async fn fallback_404() -> ApiError {
    ApiError::not_found()
}
