//! Integration tests for the health check endpoint, crawler documents and
//! general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, body_text, get};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["tour_api_configured"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_configured_upstream(pool: PgPool) {
    let app = common::build_test_app_with_upstream(pool, "http://127.0.0.1:9");
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["tour_api_configured"], true);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns JSON 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_json_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_returns_correct_headers(pool: PgPool) {
    let app = common::build_test_app(pool);

    // CORS preflight requires custom headers, so we build the request manually.
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/places")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cross_origin_response_exposes_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:5173")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // A caller-supplied id is kept, not replaced.
    assert_eq!(response.headers().get("x-request-id").unwrap(), "trace-me-123");
    let exposed = response
        .headers()
        .get("access-control-expose-headers")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(exposed.contains("x-request-id"), "exposed: {exposed}");
}

// ---------------------------------------------------------------------------
// Test: robots.txt and sitemap.xml
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn robots_txt_disallows_api_and_links_sitemap(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/robots.txt").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let body = body_text(response).await;
    assert!(body.contains("Disallow: /api/"));
    assert!(body.contains("Disallow: /admin/"));
    assert!(body.contains("Sitemap: https://mytrip.example/sitemap.xml"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sitemap_lists_public_pages(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/sitemap.xml").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<loc>https://mytrip.example/</loc>"));
    assert!(body.contains("<loc>https://mytrip.example/stats</loc>"));
    assert!(body.contains("<loc>https://mytrip.example/bookmarks</loc>"));
}

// ---------------------------------------------------------------------------
// Test: filter option lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn code_lists_are_served(pool: PgPool) {
    let app = common::build_test_app(pool);

    let regions = body_json(get(app.clone(), "/api/v1/codes/regions").await).await;
    let regions = regions["data"].as_array().unwrap();
    assert_eq!(regions.len(), 17);
    assert_eq!(regions[0]["code"], "1");
    assert_eq!(regions[0]["name"], "서울");

    let types = body_json(get(app, "/api/v1/codes/types").await).await;
    assert_eq!(types["data"].as_array().unwrap().len(), 8);
}
