//! Crawler-facing documents served at the site root.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::state::AppState;

/// Public pages listed in the sitemap.
const SITEMAP_PATHS: &[&str] = &["/", "/stats", "/bookmarks"];

/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_body(&state.config.site_url),
    )
}

/// GET /sitemap.xml
pub async fn sitemap_xml(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap_body(&state.config.site_url),
    )
}

fn robots_body(site_url: &str) -> String {
    format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /admin/\n\
         \n\
         Sitemap: {site_url}/sitemap.xml\n"
    )
}

fn sitemap_body(site_url: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for path in SITEMAP_PATHS {
        let loc = if *path == "/" {
            format!("{site_url}/")
        } else {
            format!("{site_url}{path}")
        };
        xml.push_str(&format!("  <url><loc>{loc}</loc></url>\n"));
    }
    xml.push_str("</urlset>\n");
    xml
}
