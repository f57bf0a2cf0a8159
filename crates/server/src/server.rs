//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration for the bookmark endpoints
//! - Middleware stack (bearer gate, internal-error rendering, logging, CORS, security headers)
//! - Logging bootstrap
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{
    log_requests, panic_response, render_internal_errors, request_id, require_bearer_token,
};
use crate::routes::{collection, hello, not_found};
use crate::state::ServerState;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{
    REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_DNS_PREFETCH_CONTROL, X_FRAME_OPTIONS,
};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Build the Axum router with all routes and middleware
///
/// Routes are divided into:
/// - Public routes: `GET /` (no auth required)
/// - Protected routes: `/bookmarks`, `/bookmarks/{id}` and the fallback
///   (bearer token required, so unknown paths answer 401 before 404)
///
/// Middleware stack, outermost first:
/// 1. Trace spans
/// 2. Request ID tracking
/// 3. Access log
/// 4. CORS
/// 5. Security headers
/// 6. Timeout
/// 7. Internal-error rendering for the runtime mode
/// 8. Panic catching
/// 9. Body size limit
/// 10. Bearer token gate (protected routes only)
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let public_routes = Router::new().route("/", get(hello));

    let protected_routes = Router::new()
        .route(
            "/bookmarks",
            get(collection::list_bookmarks).post(collection::create_bookmark),
        )
        .route(
            "/bookmarks/{id}",
            get(collection::get_bookmark).delete(collection::delete_bookmark),
        )
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), require_bearer_token));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()));

    with_error_boundary(app, state.clone())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap `router` so handler failures and panics become 500 responses
///
/// The panic catcher sits inside the renderer, so a panic is tagged like any
/// other internal error and its body follows the runtime mode.
pub fn with_error_boundary(
    router: Router<Arc<ServerState>>,
    state: Arc<ServerState>,
) -> Router<Arc<ServerState>> {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(state, render_internal_errors))
}

/// Install the global tracing subscriber
///
/// Production logs are JSON lines; every other mode gets the compact
/// human-readable format.
pub fn init_tracing(config: &ServerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if config.environment.is_production() {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    installed.map_err(|err| anyhow::anyhow!(err))
}

/// Start the bookmarks HTTP server
///
/// Initializes logging, seeds the collection, binds the configured address and
/// serves until SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing(&config)?;

    let addr: SocketAddr = config.socket_addr()?;
    let state = Arc::new(ServerState::new(config.clone()));

    tracing::info!(
        "Starting bookmarks server on {} ({:?} mode, {} seeded bookmarks)",
        addr,
        config.environment,
        state.bookmarks.len()
    );
    tracing::info!(
        "Timeout: {}s, Max body: {}KB, CORS: {}",
        config.timeout_secs,
        config.max_body_size_kb,
        config.enable_cors
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
