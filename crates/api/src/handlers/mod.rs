//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Place and statistics handlers delegate to the tourism API client behind
//! the response caches; user and bookmark handlers delegate to the
//! repositories in `mytrip_db`. Errors are mapped via [`AppError`](crate::error::AppError).

pub mod bookmarks;
pub mod codes;
pub mod places;
pub mod seo;
pub mod stats;
pub mod users;

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Fallback for unmatched paths: 404 in the usual error shape.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("No route for {}", uri.path()),
            "code": "NOT_FOUND",
        })),
    )
}
