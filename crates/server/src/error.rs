use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookmarks::BookmarkError;
use serde_json::{json, Value};

use crate::config::Environment;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Unauthorized request")]
    Unauthorized,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Carries the plain-text body to send back.
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Payload too large: max {0}KB allowed")]
    PayloadTooLarge(usize),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Marker left on a 500 response so the outermost middleware can decide how
/// much of the failure to reveal.
#[derive(Debug, Clone)]
pub struct InternalFailure(pub String);

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::InvalidData(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a store error, using `not_found` as the 404 body.
    pub fn from_lookup(err: BookmarkError, not_found: &'static str) -> Self {
        match err {
            BookmarkError::NotFound(_) => ServerError::NotFound(not_found),
            other => other.into(),
        }
    }

    /// Map a rejected create body, keeping the body limit distinct from bad input.
    pub fn from_json_rejection(rejection: JsonRejection, max_body_size_kb: usize) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::error!(max_body_size_kb, "bookmark payload too large");
            return ServerError::PayloadTooLarge(max_body_size_kb);
        }
        rejection.into()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ServerError::Unauthorized => {
                (status, Json(json!({ "error": "Unauthorized request" }))).into_response()
            }
            ServerError::InvalidData(_) => (status, "Invalid data").into_response(),
            ServerError::NotFound(body) => (status, body).into_response(),
            ServerError::PayloadTooLarge(_) => (status, "Payload Too Large").into_response(),
            ServerError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                let mut response =
                    (status, Json(internal_error_body(Environment::Production, &detail)))
                        .into_response();
                response.extensions_mut().insert(InternalFailure(detail));
                response
            }
        }
    }
}

/// Body of a 500 response. Production hides the failure detail.
pub fn internal_error_body(environment: Environment, detail: &str) -> Value {
    if environment.is_production() {
        json!({ "error": { "message": "server error" } })
    } else {
        json!({ "message": detail, "error": { "message": detail } })
    }
}

impl From<BookmarkError> for ServerError {
    fn from(err: BookmarkError) -> Self {
        match err {
            BookmarkError::MissingTitle | BookmarkError::MissingUrl => {
                ServerError::InvalidData(err.to_string())
            }
            BookmarkError::NotFound(_) => ServerError::NotFound("Not Found"),
            BookmarkError::StorePoisoned => ServerError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        let reason = rejection.body_text();
        tracing::error!(error = %reason, "malformed bookmark payload");
        ServerError::InvalidData(reason)
    }
}
