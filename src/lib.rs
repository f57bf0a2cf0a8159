//! In-memory bookmark collection.
//!
//! This crate holds the domain side of the bookmarks service: the
//! [`Bookmark`] record, create-request validation, identifier assignment and
//! the [`BookmarkStore`] that owns the collection. It knows nothing about HTTP;
//! the `bookmarks-server` crate maps these operations and errors onto routes.
//!
//! ## Operations
//!
//! | Operation | Method | Failure |
//! |-----------|--------|---------|
//! | List | [`BookmarkStore::list`] | none for a healthy store |
//! | Get by id | [`BookmarkStore::get`] | [`BookmarkError::NotFound`] |
//! | Create | [`BookmarkStore::create`] | [`BookmarkError::MissingTitle`], [`BookmarkError::MissingUrl`] |
//! | Delete | [`BookmarkStore::delete`] | [`BookmarkError::NotFound`] |
//!
//! Every operation either completes or leaves the collection untouched.
//!
//! ## Example
//!
//! ```
//! use bookmarks::{BookmarkStore, NewBookmark};
//!
//! let store = BookmarkStore::seeded();
//! let created = store.create(NewBookmark::new("Example", "example.com")).unwrap();
//!
//! let id = created.id.to_string();
//! assert_eq!(store.get(&id).unwrap(), created);
//!
//! store.delete(&id).unwrap();
//! assert!(store.get(&id).is_err());
//! assert_eq!(store.len(), 3);
//! ```

mod error;
mod store;
mod types;

pub use crate::error::BookmarkError;
pub use crate::store::{seed_bookmarks, BookmarkStore};
pub use crate::types::{Bookmark, BookmarkId, NewBookmark, ValidatedBookmark};
