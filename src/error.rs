//! Error types produced by the bookmark collection.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`MissingTitle`](BookmarkError::MissingTitle) | Validation | Create request without a non-empty title |
//! | [`MissingUrl`](BookmarkError::MissingUrl) | Validation | Create request without a non-empty url |
//! | [`NotFound`](BookmarkError::NotFound) | Lookup | No record matches the requested id |
//! | [`StorePoisoned`](BookmarkError::StorePoisoned) | Internal | A writer panicked while holding the collection lock |
//!
//! Validation errors are reported one at a time: the title is checked before
//! the url, so a request missing both yields only [`BookmarkError::MissingTitle`].

use thiserror::Error;

/// Errors that can occur while operating on a [`BookmarkStore`](crate::BookmarkStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookmarkError {
    #[error("Title is required")]
    MissingTitle,

    #[error("URL is required")]
    MissingUrl,

    #[error("bookmark with id {0} not found")]
    NotFound(String),

    #[error("bookmark collection lock poisoned")]
    StorePoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        assert_eq!(BookmarkError::MissingTitle.to_string(), "Title is required");
        assert_eq!(BookmarkError::MissingUrl.to_string(), "URL is required");
    }
}
