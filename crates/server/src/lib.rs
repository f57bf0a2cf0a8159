//! Bookmarks Server - HTTP REST API over the in-memory bookmark collection
//!
//! This crate wraps [`bookmarks::BookmarkStore`] in an axum router guarded by
//! a single shared bearer token.
//!
//! # Features
//!
//! - **Authentication**: `Authorization: Bearer <token>` checked against one configured secret
//! - **Middleware**: CORS, security headers, request ID tracking, access logging, timeouts
//! - **Configuration**: `BOOKMARKS_*` environment variables, `.env` and an optional `bookmarks.*` file
//! - **Error Handling**: 500 bodies are detailed in development and generic in production
//! - **Graceful Shutdown**: SIGTERM and Ctrl+C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - Plain-text greeting
//!
//! ## Protected Endpoints (Bearer Token Required)
//!
//! - `GET /bookmarks` - List bookmarks
//! - `POST /bookmarks` - Create bookmark (`{title, url, rating?}`)
//! - `GET /bookmarks/{id}` - Get bookmark by ID
//! - `DELETE /bookmarks/{id}` - Delete bookmark

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use crate::config::{Environment, ServerConfig};
pub use crate::error::{ServerError, ServerResult};
pub use crate::server::{build_router, start_server, with_error_boundary};
pub use crate::state::ServerState;
