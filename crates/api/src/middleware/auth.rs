//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use mytrip_core::error::CoreError;
use mytrip_core::types::DbId;
use mytrip_db::repositories::UserRepo;
use mytrip_db::DbPool;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated caller extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<()>> {
///     let user_id = user.user_id(&state.pool).await?;
///     tracing::info!(user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The auth provider's user id (from `claims.sub`).
    pub external_id: String,
    /// Display name from the token, when present.
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Resolve the internal user id. Callers that never synced get a 404
    /// telling them to sign in first.
    pub async fn user_id(&self, pool: &DbPool) -> AppResult<DbId> {
        UserRepo::find_id_by_external_id(pool, &self.external_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: format!("{} (sign in first)", self.external_id),
                })
            })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        authenticate(auth_header, state)
    }
}

/// Caller identity when a token is supplied, `None` for anonymous requests.
///
/// A header that is present but invalid is still rejected with 401.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(AUTHORIZATION) {
            None => Ok(OptionalAuthUser(None)),
            Some(value) => {
                let header = value.to_str().map_err(|_| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization header".into(),
                    ))
                })?;
                authenticate(header, state).map(|user| OptionalAuthUser(Some(user)))
            }
        }
    }
}

fn authenticate(auth_header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(AuthUser {
        external_id: claims.sub,
        display_name: claims.name,
    })
}
