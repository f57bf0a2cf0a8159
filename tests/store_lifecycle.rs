//! Lifecycle and thread-safety tests for the bookmark collection

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use serde_json::json;

use bookmarks::{Bookmark, BookmarkError, BookmarkId, BookmarkStore, NewBookmark};

#[test]
fn create_then_get_returns_equal_record() {
    let store = BookmarkStore::seeded();
    let created = store
        .create(NewBookmark::new("Docs", "docs.rs").with_rating(5))
        .expect("valid bookmark");

    let fetched = store.get(&created.id.to_string()).expect("just created");
    assert_eq!(fetched, created);
    assert_eq!(fetched.rating, Some(json!(5)));
}

#[test]
fn created_ids_are_never_seed_ids() {
    let store = BookmarkStore::seeded();
    let seed_ids: HashSet<BookmarkId> = store.list().unwrap().iter().map(|b| b.id).collect();

    for i in 0..50 {
        let created = store
            .create(NewBookmark::new(format!("title-{i}"), "example.com"))
            .unwrap();
        assert!(!seed_ids.contains(&created.id));
    }
}

#[test]
fn missing_both_fields_reports_title_only() {
    let store = BookmarkStore::new();
    let err = store.create(NewBookmark::default()).unwrap_err();

    assert_eq!(err, BookmarkError::MissingTitle);
    assert!(store.is_empty());
}

#[test]
fn delete_then_get_is_not_found() {
    let store = BookmarkStore::seeded();
    let created = store
        .create(NewBookmark::new("Example", "example.com"))
        .unwrap();
    let id = created.id.to_string();

    assert_eq!(store.delete(&id).unwrap(), created);
    assert_eq!(store.len(), 3);
    assert_eq!(store.get(&id), Err(BookmarkError::NotFound(id.clone())));
    assert_eq!(store.delete(&id), Err(BookmarkError::NotFound(id)));
}

#[test]
fn list_is_stable_without_mutation() {
    let store = BookmarkStore::seeded();
    assert_eq!(store.list().unwrap(), store.list().unwrap());
}

#[test]
fn insertion_order_is_preserved() {
    let store = BookmarkStore::from_records(vec![Bookmark::new(10u64, "ten", "ten.example", None)]);
    store.create(NewBookmark::new("a", "a.example")).unwrap();
    store.create(NewBookmark::new("b", "b.example")).unwrap();

    let titles: Vec<String> = store.list().unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, ["ten", "a", "b"]);
}

#[test]
fn concurrent_creates_keep_ids_unique() {
    let store = Arc::new(BookmarkStore::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        store
                            .create(NewBookmark::new(format!("t{t}-{i}"), "example.com"))
                            .expect("create should succeed")
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<BookmarkId> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(unique.len(), 200);
    assert_eq!(store.len(), 200);
}

#[test]
fn concurrent_deletes_remove_each_record_once() {
    let store = Arc::new(BookmarkStore::seeded());

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let store = Arc::clone(&store);
            let id = (i % 3 + 1).to_string();
            thread::spawn(move || store.delete(&id).is_ok())
        })
        .collect();

    let removed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(removed, 3);
    assert!(store.is_empty());
}
