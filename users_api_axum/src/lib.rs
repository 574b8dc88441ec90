//! Axum integration for the users-api storage library
//!
//! Exposes the Users resource as a REST route table and funnels every
//! failure through a single error-formatting stage, so clients always
//! receive a `{"status": …, "message": …}` JSON body.

mod error;
mod handlers;
mod router;

pub use error::ApiError;
pub use router::{fallback_404, users_router, users_router_no_trace};
