//! Repository for the `bookmarks` table.

use std::collections::HashMap;

use mytrip_core::types::DbId;
use sqlx::PgPool;

use crate::models::bookmark::Bookmark;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, content_id, created_at, updated_at";

/// Unique constraint guarding one bookmark per user and place.
const UNIQUE_USER_CONTENT: &str = "uq_bookmarks_user_content";

/// Why a bookmark could not be created.
#[derive(Debug, thiserror::Error)]
pub enum BookmarkInsertError {
    /// The user already bookmarked this place.
    #[error("Place {content_id} is already bookmarked")]
    AlreadyBookmarked { content_id: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides bookmark operations scoped to a single user.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Bookmark a place for a user.
    ///
    /// A second bookmark for the same place fails with
    /// [`BookmarkInsertError::AlreadyBookmarked`].
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        content_id: &str,
    ) -> Result<Bookmark, BookmarkInsertError> {
        let query = format!(
            "INSERT INTO bookmarks (user_id, content_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(user_id)
            .bind(content_id)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                if violates(&e, UNIQUE_USER_CONTENT) {
                    BookmarkInsertError::AlreadyBookmarked {
                        content_id: content_id.to_string(),
                    }
                } else {
                    BookmarkInsertError::Database(e)
                }
            })
    }

    /// Remove the user's bookmark for a place. Returns `true` if one existed.
    pub async fn delete_by_content(
        pool: &PgPool,
        user_id: DbId,
        content_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND content_id = $2")
            .bind(user_id)
            .bind(content_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a bookmark by its id. Only the owner's rows are eligible, so
    /// another user's id behaves like a missing one.
    pub async fn delete_by_id(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's bookmarks, most recent first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Bookmark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookmarks
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the user has bookmarked a place.
    pub async fn exists(pool: &PgPool, user_id: DbId, content_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bookmarks WHERE user_id = $1 AND content_id = $2)",
        )
        .bind(user_id)
        .bind(content_id)
        .fetch_one(pool)
        .await
    }

    /// Bookmark state for each of `content_ids`, in one query.
    ///
    /// Every requested id appears in the result. An empty input returns an
    /// empty map without touching the database.
    pub async fn status_for(
        pool: &PgPool,
        user_id: DbId,
        content_ids: &[String],
    ) -> Result<HashMap<String, bool>, sqlx::Error> {
        if content_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let saved: Vec<String> = sqlx::query_scalar(
            "SELECT content_id FROM bookmarks WHERE user_id = $1 AND content_id = ANY($2)",
        )
        .bind(user_id)
        .bind(content_ids)
        .fetch_all(pool)
        .await?;

        let mut status: HashMap<String, bool> =
            content_ids.iter().map(|id| (id.clone(), false)).collect();
        for id in saved {
            status.insert(id, true);
        }
        Ok(status)
    }
}

/// Whether `err` is a violation of the named constraint.
fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.constraint() == Some(constraint))
}
