//! Data model for the bookmark collection.
//!
//! ```text
//! NewBookmark                (request body, every field optional)
//! ├── title: Option<String>
//! ├── url: Option<String>
//! ├── legacy_url: Option<String> (`URL` on the wire, used when `url` is absent)
//! └── rating: Option<Value>
//!
//!         ↓ validate()
//!
//! ValidatedBookmark          (title and url known to be non-empty)
//!
//!         ↓ with_id(BookmarkId)
//!
//! Bookmark
//! ├── id: BookmarkId         (Seq(u64) for seeds, Uuid for created records)
//! ├── title: String
//! ├── url: String
//! └── rating: Option<Value> (any JSON value, omitted when absent)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::BookmarkError;

/// Identifier of a stored bookmark.
///
/// Seeded records use small integers; records created through the API get a
/// random v4 UUID. On the wire the former is a JSON number and the latter a
/// JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookmarkId {
    Seq(u64),
    Uuid(Uuid),
}

impl BookmarkId {
    /// Fresh random identifier for a newly created bookmark.
    pub fn generate() -> Self {
        BookmarkId::Uuid(Uuid::new_v4())
    }

    /// Compare against an id taken from a request path.
    ///
    /// Both sides are reduced to their canonical text form before comparing,
    /// so the path segment `"1"` matches `BookmarkId::Seq(1)` and a UUID
    /// matches its hyphenated lowercase rendering. Nothing else is coerced:
    /// `"01"` does not match `Seq(1)`.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            BookmarkId::Seq(n) => n.to_string() == raw,
            BookmarkId::Uuid(uuid) => uuid.hyphenated().to_string() == raw,
        }
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkId::Seq(n) => write!(f, "{n}"),
            BookmarkId::Uuid(uuid) => write!(f, "{}", uuid.hyphenated()),
        }
    }
}

impl From<u64> for BookmarkId {
    fn from(value: u64) -> Self {
        BookmarkId::Seq(value)
    }
}

impl From<Uuid> for BookmarkId {
    fn from(value: Uuid) -> Self {
        BookmarkId::Uuid(value)
    }
}

/// A stored bookmark. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
}

impl Bookmark {
    pub fn new(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        url: impl Into<String>,
        rating: Option<Value>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            rating,
        }
    }
}

/// Create request as submitted by a client.
///
/// Fields are optional at the type level so that presence checks produce
/// [`BookmarkError`] values instead of deserialization failures. `rating` is
/// stored as whatever JSON value was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "URL", skip_serializing_if = "Option::is_none")]
    pub legacy_url: Option<String>,
    #[serde(default)]
    pub rating: Option<Value>,
}

impl NewBookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            legacy_url: None,
            rating: None,
        }
    }

    pub fn with_rating(mut self, rating: impl Into<Value>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    /// Presence checks, title first. Stops at the first failing field.
    ///
    /// `url` takes precedence over `URL` when both are sent.
    pub fn validate(self) -> Result<ValidatedBookmark, BookmarkError> {
        let title = required(self.title, BookmarkError::MissingTitle)?;
        let url = required(self.url.or(self.legacy_url), BookmarkError::MissingUrl)?;
        Ok(ValidatedBookmark {
            title,
            url,
            rating: self.rating,
        })
    }
}

fn required(field: Option<String>, missing: BookmarkError) -> Result<String, BookmarkError> {
    field.filter(|value| !value.is_empty()).ok_or(missing)
}

/// A create request that passed validation and only lacks an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBookmark {
    title: String,
    url: String,
    rating: Option<Value>,
}

impl ValidatedBookmark {
    pub fn with_id(self, id: BookmarkId) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            rating: self.rating,
        }
    }
}
