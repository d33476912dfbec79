//! Root-level crawler documents.

use axum::routing::get;
use axum::Router;

use crate::handlers::seo;
use crate::state::AppState;

/// Mount `robots.txt` and `sitemap.xml` (root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/robots.txt", get(seo::robots_txt))
        .route("/sitemap.xml", get(seo::sitemap_xml))
}
