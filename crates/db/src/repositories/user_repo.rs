//! Repository for the `users` table.

use mytrip_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, external_id, display_name, created_at, updated_at";

/// Resolves auth-provider identities to internal user ids.
pub struct UserRepo;

impl UserRepo {
    /// Insert the user, or refresh its display name if it already exists.
    ///
    /// A `None` display name leaves an existing one untouched.
    pub async fn upsert(
        pool: &PgPool,
        external_id: &str,
        display_name: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_id, display_name)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_users_external_id DO UPDATE SET
                display_name = COALESCE(EXCLUDED.display_name, users.display_name)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(external_id)
            .bind(display_name)
            .fetch_one(pool)
            .await
    }

    /// Internal id for an auth-provider subject, if the user has synced.
    pub async fn find_id_by_external_id(
        pool: &PgPool,
        external_id: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE external_id = $1")
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
