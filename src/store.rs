//! The in-memory bookmark collection.
//!
//! [`BookmarkStore`] is the single owner of the records. All reads share one
//! `RwLock` and every mutation takes it exclusively, so id uniqueness and
//! first-match removal hold under a multi-threaded runtime. The lock is never
//! held across an `.await`; every operation is synchronous.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{error, info};

use crate::error::BookmarkError;
use crate::types::{Bookmark, BookmarkId, NewBookmark};

/// The three records a fresh service starts with.
pub fn seed_bookmarks() -> Vec<Bookmark> {
    vec![
        Bookmark::new(1u64, "Google", "www.google.com", Some(Value::from(4))),
        Bookmark::new(2u64, "Facebook", "www.facebook.com", Some(Value::from(3))),
        Bookmark::new(3u64, "Pinterest", "www.pinterest.com", Some(Value::from(2))),
    ]
}

/// Process-lifetime collection of bookmarks, in insertion order.
#[derive(Debug, Default)]
pub struct BookmarkStore {
    records: RwLock<Vec<Bookmark>>,
}

impl BookmarkStore {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding [`seed_bookmarks`].
    pub fn seeded() -> Self {
        Self::from_records(seed_bookmarks())
    }

    pub fn from_records(records: Vec<Bookmark>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Seeded collection whose lock is already poisoned, so every operation
    /// fails with [`BookmarkError::StorePoisoned`].
    #[cfg(any(test, feature = "test-util"))]
    pub fn poisoned() -> Self {
        let store = Self::seeded();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.records.write();
            panic!("poisoning bookmark store");
        }));
        store
    }

    /// Snapshot of every record in insertion order.
    pub fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        Ok(self.read()?.clone())
    }

    /// First record whose id matches `id` (see [`BookmarkId::matches`]).
    pub fn get(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        let records = self.read()?;
        match records.iter().find(|b| b.id.matches(id)) {
            Some(bookmark) => Ok(bookmark.clone()),
            None => {
                error!(id, "bookmark not found");
                Err(BookmarkError::NotFound(id.to_string()))
            }
        }
    }

    /// Validate `new`, assign a fresh id and append the record.
    ///
    /// On a validation failure the collection is left untouched.
    pub fn create(&self, new: NewBookmark) -> Result<Bookmark, BookmarkError> {
        let validated = new.validate().inspect_err(|err| {
            error!(error = %err, "bookmark rejected");
        })?;

        let mut records = self.write()?;
        let mut id = BookmarkId::generate();
        while records.iter().any(|b| b.id == id) {
            id = BookmarkId::generate();
        }

        let bookmark = validated.with_id(id);
        records.push(bookmark.clone());
        info!(id = %bookmark.id, "bookmark created");
        Ok(bookmark)
    }

    /// Remove the first record whose id matches `id` and return it.
    pub fn delete(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        let mut records = self.write()?;
        let Some(index) = records.iter().position(|b| b.id.matches(id)) else {
            error!(id, "bookmark not found for delete");
            return Err(BookmarkError::NotFound(id.to_string()));
        };

        let removed = records.remove(index);
        info!(id = %removed.id, "bookmark deleted");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Bookmark>>, BookmarkError> {
        self.records.read().map_err(|_| {
            error!("bookmark collection lock poisoned");
            BookmarkError::StorePoisoned
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Bookmark>>, BookmarkError> {
        self.records.write().map_err(|_| {
            error!("bookmark collection lock poisoned");
            BookmarkError::StorePoisoned
        })
    }
}
