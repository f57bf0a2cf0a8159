use crate::error::{internal_error_body, InternalFailure, ServerError};
use crate::state::ServerState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::any::Any;
use std::sync::Arc;

/// Bearer token gate for every protected route
///
/// The token is the second whitespace-separated segment of the
/// `Authorization` header. A missing header, a header without a second
/// segment or a token that differs from the configured secret ends the
/// request with 401.
pub async fn require_bearer_token(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .is_some_and(|token| state.is_valid_token(token));

    if !authorized {
        tracing::error!(path = %request.uri().path(), "Unauthorized request to path");
        return Err(ServerError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Second whitespace-separated segment of an `Authorization` value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

/// Rewrite 500 responses for the configured runtime mode
///
/// Handlers and the panic catcher tag failures with [`InternalFailure`]; this
/// sits outside every route so the body is decided in one place.
pub async fn render_internal_errors(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<InternalFailure>() {
        Some(InternalFailure(detail)) => {
            let body = internal_error_body(state.config.environment, &detail);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        None => response,
    }
}

/// Turn a handler panic into an internal error response
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = err.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = err.downcast_ref::<&str>() {
        (*msg).to_string()
    } else {
        "handler panicked".to_string()
    };
    ServerError::Internal(detail).into_response()
}

/// Request ID injection middleware
pub async fn request_id(mut request: Request, next: Next) -> Response {
    // Generate or extract request ID
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    // Add to request extensions for handlers to access
    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Request identifier stored in request extensions
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Access log middleware
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status == StatusCode::REQUEST_TIMEOUT {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "request timed out"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_takes_second_segment() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer   abc  "), Some("abc"));
        assert_eq!(bearer_token("Bearer a b"), Some("a"));
    }

    #[test]
    fn bearer_token_without_second_segment_is_none() {
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token(""), None);
        assert_eq!(bearer_token("   "), None);
    }

    #[test]
    fn panic_payloads_become_internal_errors() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let failure = response.extensions().get::<InternalFailure>().unwrap();
        assert_eq!(failure.0, "boom");

        let response = panic_response(Box::new(String::from("owned boom")));
        let failure = response.extensions().get::<InternalFailure>().unwrap();
        assert_eq!(failure.0, "owned boom");

        let response = panic_response(Box::new(17_u8));
        let failure = response.extensions().get::<InternalFailure>().unwrap();
        assert_eq!(failure.0, "handler panicked");
    }
}
