//! API route handlers
//!
//! - `collection`: the bookmark collection (list, get, create, delete)
//!
//! The root greeting and the fallback live here.

pub mod collection;

use axum::http::Uri;

use crate::error::ServerError;

/// Liveness greeting
///
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn hello() -> &'static str {
    "Hello, world!"
}

/// 404 handler for undefined routes behind the bearer gate
pub async fn not_found(uri: Uri) -> ServerError {
    tracing::error!(path = %uri.path(), "No route for path");
    ServerError::NotFound("Not Found")
}
