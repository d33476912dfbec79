//! Handlers for the `/codes` resource: filter options for the client.

use axum::Json;
use mytrip_core::codes::{area_options, content_type_options, CodeOption};

use crate::response::DataResponse;

/// GET /api/v1/codes/regions
pub async fn regions() -> Json<DataResponse<Vec<CodeOption>>> {
    Json(DataResponse {
        data: area_options(),
    })
}

/// GET /api/v1/codes/types
pub async fn types() -> Json<DataResponse<Vec<CodeOption>>> {
    Json(DataResponse {
        data: content_type_options(),
    })
}
