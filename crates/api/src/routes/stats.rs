//! Route definitions for the `/stats` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET    /summary    -> summary
/// GET    /regions    -> regions
/// GET    /types      -> types
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(stats::summary))
        .route("/regions", get(stats::regions))
        .route("/types", get(stats::types))
}
