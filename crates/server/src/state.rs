use crate::config::ServerConfig;
use bookmarks::{BookmarkId, BookmarkStore};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// The bookmark collection (shared across requests)
    pub bookmarks: Arc<BookmarkStore>,
}

impl ServerState {
    /// Create new server state, seeding the collection when configured to
    pub fn new(config: ServerConfig) -> Self {
        let store = if config.seed_bookmarks {
            BookmarkStore::seeded()
        } else {
            BookmarkStore::new()
        };
        Self::with_store(config, store)
    }

    /// Create server state around an existing collection
    pub fn with_store(config: ServerConfig, store: BookmarkStore) -> Self {
        Self {
            config: Arc::new(config),
            bookmarks: Arc::new(store),
        }
    }

    /// Check a presented bearer token against the configured secret.
    ///
    /// Without a configured secret nothing is accepted.
    pub fn is_valid_token(&self, token: &str) -> bool {
        match self.config.api_token() {
            Some(secret) => token.as_bytes().ct_eq(secret.as_bytes()).into(),
            None => false,
        }
    }

    /// `Location` value for a stored bookmark
    pub fn location_for(&self, id: &BookmarkId) -> String {
        let base = self
            .config
            .public_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or("");
        format!("{base}/bookmarks/{id}")
    }
}
