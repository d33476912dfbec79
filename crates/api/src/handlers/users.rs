//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mytrip_db::models::user::SyncUser;
use mytrip_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users/sync
///
/// Provision the caller, or refresh their display name. The body's name
/// wins over the token's; with neither, an existing name is kept.
pub async fn sync_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SyncUser>,
) -> AppResult<impl IntoResponse> {
    let display_name = input
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or(auth.display_name.as_deref());

    let user = UserRepo::upsert(&state.pool, &auth.external_id, display_name).await?;

    tracing::info!(user_id = user.id, "User synced");

    Ok(Json(DataResponse { data: user }))
}
