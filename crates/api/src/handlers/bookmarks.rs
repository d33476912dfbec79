//! Handlers for the `/bookmarks` resource.
//!
//! Every route acts on the caller's own bookmarks. A caller whose identity
//! has not been synced into `users` gets a 404 asking them to sign in.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mytrip_core::error::CoreError;
use mytrip_core::types::DbId;
use mytrip_db::models::bookmark::{BookmarkStatus, CreateBookmark};
use mytrip_db::repositories::BookmarkRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::BookmarkStatusParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/bookmarks
///
/// The caller's bookmarks, newest first.
pub async fn list_bookmarks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let user_id = auth.user_id(&state.pool).await?;
    let bookmarks = BookmarkRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: bookmarks }))
}

/// POST /api/v1/bookmarks
///
/// Returns 201 with the new bookmark, or 409 `ALREADY_BOOKMARKED`.
pub async fn create_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateBookmark>,
) -> AppResult<impl IntoResponse> {
    let content_id = normalize_content_id(&input.content_id)?;
    let user_id = auth.user_id(&state.pool).await?;
    let bookmark = BookmarkRepo::create(&state.pool, user_id, &content_id).await?;

    tracing::info!(
        bookmark_id = bookmark.id,
        user_id,
        content_id = %bookmark.content_id,
        "Bookmark created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: bookmark })))
}

/// GET /api/v1/bookmarks/status?content_ids=a,b
///
/// Bookmark state for each requested content id.
pub async fn bookmark_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<BookmarkStatusParams>,
) -> AppResult<impl IntoResponse> {
    let ids = params.ids();
    let user_id = auth.user_id(&state.pool).await?;
    let status = BookmarkRepo::status_for(&state.pool, user_id, &ids).await?;
    Ok(Json(DataResponse { data: status }))
}

/// GET /api/v1/bookmarks/{content_id}
pub async fn get_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(content_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let content_id = normalize_content_id(&content_id)?;
    let user_id = auth.user_id(&state.pool).await?;
    let bookmarked = BookmarkRepo::exists(&state.pool, user_id, &content_id).await?;
    Ok(Json(DataResponse {
        data: BookmarkStatus {
            content_id,
            bookmarked,
        },
    }))
}

/// DELETE /api/v1/bookmarks/{content_id}
pub async fn delete_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(content_id): Path<String>,
) -> AppResult<StatusCode> {
    let content_id = normalize_content_id(&content_id)?;
    let user_id = auth.user_id(&state.pool).await?;
    let deleted = BookmarkRepo::delete_by_content(&state.pool, user_id, &content_id).await?;
    if deleted {
        tracing::info!(user_id, content_id = %content_id, "Bookmark removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Bookmark",
            id: content_id,
        }))
    }
}

/// DELETE /api/v1/bookmarks/by-id/{id}
///
/// Returns 404 both when the bookmark does not exist and when it belongs
/// to someone else.
pub async fn delete_bookmark_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let user_id = auth.user_id(&state.pool).await?;
    let deleted = BookmarkRepo::delete_by_id(&state.pool, user_id, id).await?;
    if deleted {
        tracing::info!(user_id, bookmark_id = id, "Bookmark removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Bookmark",
            id: id.to_string(),
        }))
    }
}

// ---- private helpers ----

/// Content ids are stored trimmed; every route looks them up the same way.
fn normalize_content_id(raw: &str) -> AppResult<String> {
    let content_id = raw.trim();
    if content_id.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content_id must not be empty".into(),
        )));
    }
    Ok(content_id.to_string())
}
