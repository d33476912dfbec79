use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mytrip_core::error::CoreError;
use mytrip_db::repositories::BookmarkInsertError;
use mytrip_tourapi::TourApiError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`TourApiError`] for upstream
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mytrip_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failure talking to the tourism API.
    #[error(transparent)]
    TourApi(#[from] TourApiError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// One failure handed to every request that waited on the same cache
    /// load.
    #[error(transparent)]
    Shared(Arc<AppError>),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<BookmarkInsertError> for AppError {
    fn from(err: BookmarkInsertError) -> Self {
        match err {
            BookmarkInsertError::AlreadyBookmarked { content_id } => {
                AppError::Core(CoreError::AlreadyBookmarked { content_id })
            }
            BookmarkInsertError::Database(e) => AppError::Database(e),
        }
    }
}

impl AppError {
    /// Unwrap a shared cache-load failure, keeping the `Arc` only when other
    /// waiters still hold it.
    pub fn from_shared(err: Arc<AppError>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(AppError::Shared)
    }

    fn status_parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::AlreadyBookmarked { .. } => (
                    StatusCode::CONFLICT,
                    "ALREADY_BOOKMARKED",
                    core.to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                // Bad coordinates are absorbed where places are rendered; one
                // reaching this point is a server bug.
                CoreError::Internal(_) | CoreError::InvalidCoordinate { .. } => {
                    tracing::error!(error = %core, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upstream errors ---
            AppError::TourApi(err) => classify_tour_api_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::Shared(inner) => inner.status_parts(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.status_parts();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a tourism API error into an HTTP status, error code, and message.
///
/// - A missing service key maps to 503 `SETUP_REQUIRED`.
/// - Transport, HTTP status and body-shape failures map to 502
///   `UPSTREAM_UNAVAILABLE`; the caller may retry.
/// - A non-success result code maps to 502 `UPSTREAM_ERROR` and carries
///   the upstream code and message.
/// - Validation failures map to 400.
fn classify_tour_api_error(err: &TourApiError) -> (StatusCode, &'static str, String) {
    match err {
        TourApiError::MissingServiceKey => {
            tracing::warn!("Tourism API key is not configured");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SETUP_REQUIRED",
                "Place data needs setup: set TOUR_API_KEY to enable the tourism API".to_string(),
            )
        }
        TourApiError::Request(_) | TourApiError::Http { .. } | TourApiError::Decode(_) => {
            tracing::error!(error = %err, "Tourism API unavailable");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "The tourism API is unavailable. Please try again shortly".to_string(),
            )
        }
        TourApiError::Upstream { code, message } => {
            tracing::error!(upstream_code = %code, upstream_message = %message, "Tourism API error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("Tourism API error {code}: {message}"),
            )
        }
        TourApiError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
    }
}
