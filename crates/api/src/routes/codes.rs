//! Route definitions for the `/codes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::codes;
use crate::state::AppState;

/// Routes mounted at `/codes`.
///
/// ```text
/// GET    /regions    -> regions
/// GET    /types      -> types
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/regions", get(codes::regions))
        .route("/types", get(codes::types))
}
