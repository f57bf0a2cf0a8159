use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookmarks::{Bookmark, NewBookmark};
use std::sync::Arc;

/// List every bookmark in insertion order
pub async fn list_bookmarks(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Vec<Bookmark>>> {
    Ok(Json(state.bookmarks.list()?))
}

/// Fetch one bookmark by id
pub async fn get_bookmark(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Bookmark>> {
    let bookmark = state
        .bookmarks
        .get(&id)
        .map_err(|err| ServerError::from_lookup(err, "Bookmark Not Found"))?;
    Ok(Json(bookmark))
}

/// Create a bookmark from `{title, url, rating?}`
///
/// Answers 201 with the stored record and a `Location` header pointing at it.
pub async fn create_bookmark(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<NewBookmark>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(new) = payload.map_err(|rejection| {
        ServerError::from_json_rejection(rejection, state.config.max_body_size_kb)
    })?;
    let bookmark = state.bookmarks.create(new)?;
    let location = state.location_for(&bookmark.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(bookmark)))
}

/// Delete a bookmark by id
pub async fn delete_bookmark(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    state
        .bookmarks
        .delete(&id)
        .map_err(|err| ServerError::from_lookup(err, "Not Found"))?;
    Ok(StatusCode::NO_CONTENT)
}
