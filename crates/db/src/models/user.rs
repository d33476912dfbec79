//! User entity model and DTOs.

use mytrip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    /// Subject id issued by the auth provider.
    pub external_id: String,
    pub display_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for provisioning (or refreshing) a user on sign-in.
#[derive(Debug, Default, Deserialize)]
pub struct SyncUser {
    pub display_name: Option<String>,
}
