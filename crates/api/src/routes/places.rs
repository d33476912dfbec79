//! Route definitions for the `/places` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::places;
use crate::state::AppState;

/// Routes mounted at `/places`.
///
/// ```text
/// GET    /                       -> list_places  (?area_code&content_type_id&keyword&page&rows&sort&total_pages&bookmarked&pet_friendly)
/// GET    /{content_id}           -> get_place
/// GET    /{content_id}/pet       -> get_place_pet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(places::list_places))
        .route("/{content_id}", get(places::get_place))
        .route("/{content_id}/pet", get(places::get_place_pet))
}
