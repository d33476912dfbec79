//! Handlers for the `/stats` resource.
//!
//! All three views read one cached aggregation run; a miss counts every
//! region and place type against the tourism API once.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mytrip_tourapi::stats::{StatsAggregator, StatsSnapshot};

use crate::cache::get_or_load;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = cached_snapshot(&state).await?;
    Ok(Json(DataResponse {
        data: snapshot.summary.clone(),
    }))
}

/// GET /api/v1/stats/regions
///
/// Place counts for every region, largest first.
pub async fn regions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = cached_snapshot(&state).await?;
    Ok(Json(DataResponse {
        data: snapshot.regions.clone(),
    }))
}

/// GET /api/v1/stats/types
///
/// Place counts for every place type, largest first.
pub async fn types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = cached_snapshot(&state).await?;
    Ok(Json(DataResponse {
        data: snapshot.types.clone(),
    }))
}

async fn cached_snapshot(state: &AppState) -> AppResult<Arc<StatsSnapshot>> {
    get_or_load(&state.caches.stats, (), aggregate(&state.stats)).await
}

async fn aggregate(stats: &StatsAggregator) -> AppResult<Arc<StatsSnapshot>> {
    Ok(Arc::new(stats.snapshot().await?))
}
