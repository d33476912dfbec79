pub mod bookmarks;
pub mod codes;
pub mod health;
pub mod places;
pub mod seo;
pub mod stats;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /places                          list, search, filter (optional auth)
/// /places/{content_id}             detail
/// /places/{content_id}/pet         pet-travel info or null
///
/// /stats/summary                   dashboard summary
/// /stats/regions                   ranked region counts
/// /stats/types                     ranked type counts
///
/// /codes/regions                   region filter options
/// /codes/types                     type filter options
///
/// /users/sync                      provision caller (POST, auth required)
///
/// /bookmarks                       list, create (auth required)
/// /bookmarks/status                bookmark map for ?content_ids=
/// /bookmarks/{content_id}          check, delete
/// /bookmarks/by-id/{id}            delete by bookmark id
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/places", places::router())
        .nest("/stats", stats::router())
        .nest("/codes", codes::router())
        .nest("/users", users::router())
        .nest("/bookmarks", bookmarks::router())
}
