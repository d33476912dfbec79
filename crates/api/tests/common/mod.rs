#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mytrip_api::auth::jwt::{generate_access_token, JwtConfig};
use mytrip_api::config::ServerConfig;
use mytrip_api::router::build_app_router;
use mytrip_api::state::AppState;
use mytrip_tourapi::retry::RetryPolicy;
use mytrip_tourapi::TourApiConfig;

/// Secret shared by [`test_config`] and [`token_for`].
pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Service key configured for the mock upstream.
pub const TEST_SERVICE_KEY: &str = "test-service-key";

/// Build a test `ServerConfig` with safe defaults.
///
/// `tour_api_base_url` points the client at a mock upstream; `None` leaves
/// the service key unset so place endpoints report `SETUP_REQUIRED`.
/// Retries are immediate so failure paths stay fast.
pub fn test_config(tour_api_base_url: Option<&str>) -> ServerConfig {
    let tour_api = match tour_api_base_url {
        Some(url) => TourApiConfig::new(url, Some(TEST_SERVICE_KEY.to_string())),
        None => TourApiConfig::default(),
    };

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        site_url: "https://mytrip.example".to_string(),
        jwt: test_jwt_config(),
        tour_api,
        list_cache_ttl: Duration::from_secs(60),
        stats_cache_ttl: Duration::from_secs(3600),
        stats_retry: RetryPolicy {
            max_retries: 3,
            delay: Duration::from_millis(1),
        },
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 60,
    }
}

/// Build the full application router without a tourism API key.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config(None)))
}

/// Build the full application router against a mock tourism API.
pub fn build_test_app_with_upstream(pool: PgPool, base_url: &str) -> Router {
    build_app_router(AppState::new(pool, test_config(Some(base_url))))
}

/// A valid bearer token for `external_id`.
pub fn token_for(external_id: &str) -> String {
    generate_access_token(external_id, Some("Test User"), &test_jwt_config()).unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read the full response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, None)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}
