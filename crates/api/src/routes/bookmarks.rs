//! Route definitions for the `/bookmarks` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::bookmarks;
use crate::state::AppState;

/// Routes mounted at `/bookmarks`.
///
/// ```text
/// GET    /                  -> list_bookmarks
/// POST   /                  -> create_bookmark
/// GET    /status            -> bookmark_status  (?content_ids=a,b)
/// GET    /{content_id}      -> get_bookmark
/// DELETE /{content_id}      -> delete_bookmark
/// DELETE /by-id/{id}        -> delete_bookmark_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bookmarks::list_bookmarks).post(bookmarks::create_bookmark),
        )
        .route("/status", get(bookmarks::bookmark_status))
        .route(
            "/{content_id}",
            get(bookmarks::get_bookmark).delete(bookmarks::delete_bookmark),
        )
        .route("/by-id/{id}", delete(bookmarks::delete_bookmark_by_id))
}
