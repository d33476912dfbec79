//! Bookmark entity model and DTOs.

use mytrip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A saved place from the `bookmarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bookmark {
    pub id: DbId,
    pub user_id: DbId,
    /// Tourism API identifier of the saved place.
    pub content_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a bookmark. The owner comes from the request's auth.
#[derive(Debug, Deserialize)]
pub struct CreateBookmark {
    pub content_id: String,
}

/// Whether one place is bookmarked by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkStatus {
    pub content_id: String,
    pub bookmarked: bool,
}
