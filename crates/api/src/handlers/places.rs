//! Handlers for the `/places` resource.
//!
//! Listing, keyword search, filtering, sorting and pagination over the
//! tourism API, plus per-place detail and pet-travel lookups. Upstream
//! results are cached briefly; sorting and the bookmark/pet filters run on
//! the cached page.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use futures::future::join_all;
use mytrip_core::codes::{
    area_name, content_type_name, is_known_area_code, is_known_content_type_id,
};
use mytrip_core::error::CoreError;
use mytrip_core::geo::GeoPoint;
use mytrip_core::pagination::PageWindow;
use mytrip_core::place::{PetInfo, PlaceDetail, PlaceSummary};
use mytrip_core::sorting::{sort_places, SortOption};
use mytrip_db::repositories::BookmarkRepo;
use mytrip_tourapi::{ListQuery, Page, TourApiClient};
use serde::Serialize;

use crate::cache::{get_or_load, ListingKey};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalAuthUser;
use crate::query::PlaceListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A place as returned to clients: the record plus its map position and
/// resolved category names.
#[derive(Debug, Serialize)]
pub struct PlaceView {
    #[serde(flatten)]
    pub place: PlaceSummary,
    /// `None` when the upstream coordinates are malformed.
    pub location: Option<GeoPoint>,
    pub area_name: &'static str,
    pub content_type_name: &'static str,
}

impl PlaceView {
    fn new(place: PlaceSummary) -> Self {
        let location = locate(&place);
        Self {
            area_name: area_name(&place.area_code),
            content_type_name: content_type_name(&place.content_type_id),
            location,
            place,
        }
    }
}

/// Detail view: the full record plus map position and category names.
#[derive(Debug, Serialize)]
pub struct PlaceDetailView {
    #[serde(flatten)]
    pub detail: PlaceDetail,
    pub location: Option<GeoPoint>,
    pub area_name: &'static str,
    pub content_type_name: &'static str,
}

/// One page of the place listing.
#[derive(Debug, Serialize)]
pub struct PlaceListResponse {
    pub items: Vec<PlaceView>,
    /// Upstream match count for the query, before local filters.
    pub total_count: u64,
    pub sort: SortOption,
    pub pagination: PageWindow,
}

/// GET /api/v1/places
///
/// List places by region and/or type, or search by keyword when `keyword`
/// is non-blank. The page is sorted locally, then optionally narrowed to
/// the caller's bookmarks and to pet-friendly places.
pub async fn list_places(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(params): Query<PlaceListParams>,
) -> AppResult<impl IntoResponse> {
    let area_code = PlaceListParams::code(&params.area_code);
    let content_type_id = PlaceListParams::code(&params.content_type_id);
    validate_filters(area_code, content_type_id)?;

    let bookmark_owner = match (params.bookmarked, auth.0) {
        (false, _) => None,
        (true, Some(user)) => Some(user),
        (true, None) => {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Sign in to filter by bookmarks".into(),
            )))
        }
    };

    let keyword = params.keyword();
    let sort = SortOption::from_param(params.sort.as_deref());
    let query = ListQuery {
        page_no: params.page(),
        num_of_rows: params.rows(),
        area_code: area_code.map(str::to_string),
        content_type_id: content_type_id.map(str::to_string),
        arrange: None,
    };
    let key = ListingKey {
        keyword: keyword.map(str::to_string),
        query: query.clone(),
    };

    let page = get_or_load(
        &state.caches.listings,
        key,
        fetch_listing(&state.tour_api, keyword, &query),
    )
    .await?;

    let mut places = sort_places(&page.items, sort);

    if let Some(user) = &bookmark_owner {
        let user_id = user.user_id(&state.pool).await?;
        let ids: Vec<String> = places.iter().map(|p| p.content_id.clone()).collect();
        let status = BookmarkRepo::status_for(&state.pool, user_id, &ids).await?;
        places.retain(|p| status.get(&p.content_id).copied().unwrap_or(false));
    }

    if params.pet_friendly {
        let infos = join_all(
            places
                .iter()
                .map(|p| pet_info_or_none(&state.tour_api, &p.content_id)),
        )
        .await;
        places = places
            .into_iter()
            .zip(infos)
            .filter(|(_, info)| info.as_ref().is_some_and(PetInfo::has_any_info))
            .map(|(place, _)| place)
            .collect();
    }

    let pagination = PageWindow::compute(
        query.page_no,
        params.total_pages,
        query.num_of_rows as usize,
        page.items.len(),
    );

    tracing::info!(
        keyword = keyword.unwrap_or_default(),
        area_code = area_code.unwrap_or_default(),
        content_type_id = content_type_id.unwrap_or_default(),
        page = query.page_no,
        fetched = page.items.len(),
        returned = places.len(),
        "Places listed",
    );

    Ok(Json(DataResponse {
        data: PlaceListResponse {
            items: places.into_iter().map(PlaceView::new).collect(),
            total_count: page.total_count,
            sort,
            pagination,
        },
    }))
}

/// GET /api/v1/places/{content_id}
///
/// Full detail for one place. Returns 404 when the tourism API has no
/// such item.
pub async fn get_place(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let detail = get_or_load(
        &state.caches.details,
        content_id.clone(),
        fetch_detail(&state.tour_api, &content_id),
    )
    .await?;

    let detail = PlaceDetail::clone(&detail);
    let view = PlaceDetailView {
        location: locate(&detail.summary),
        area_name: area_name(&detail.summary.area_code),
        content_type_name: content_type_name(&detail.summary.content_type_id),
        detail,
    };

    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/places/{content_id}/pet
///
/// Pet-travel information, or `null`. Any failure (including a missing
/// key) is logged and reported as `null`.
pub async fn get_place_pet(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let info = pet_info_or_none(&state.tour_api, &content_id).await;
    Ok(Json(DataResponse { data: info }))
}

// ---- private helpers ----

fn validate_filters(area_code: Option<&str>, content_type_id: Option<&str>) -> AppResult<()> {
    if let Some(code) = area_code {
        if !is_known_area_code(code) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown area_code '{code}'"
            ))));
        }
    }
    if let Some(id) = content_type_id {
        if !is_known_content_type_id(id) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown content_type_id '{id}'"
            ))));
        }
    }
    Ok(())
}

async fn fetch_listing(
    client: &TourApiClient,
    keyword: Option<&str>,
    query: &ListQuery,
) -> AppResult<Arc<Page<PlaceSummary>>> {
    let page = match keyword {
        Some(keyword) => client.search_keyword(keyword, query).await?,
        None => client.area_based_list(query).await?,
    };
    Ok(Arc::new(page))
}

async fn fetch_detail(client: &TourApiClient, content_id: &str) -> AppResult<Arc<PlaceDetail>> {
    client
        .detail_common(content_id)
        .await?
        .map(Arc::new)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Place",
                id: content_id.to_string(),
            })
        })
}

async fn pet_info_or_none(client: &TourApiClient, content_id: &str) -> Option<PetInfo> {
    match client.detail_pet_tour(content_id).await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(content_id, error = %e, "Pet info lookup failed");
            None
        }
    }
}

fn locate(place: &PlaceSummary) -> Option<GeoPoint> {
    match place.location() {
        Ok(point) => Some(point),
        Err(e) => {
            tracing::warn!(content_id = %place.content_id, error = %e, "Unusable place coordinates");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn known_filters_pass() {
        assert!(validate_filters(Some("39"), Some("12")).is_ok());
        assert!(validate_filters(None, None).is_ok());
    }

    #[test]
    fn unknown_filters_are_rejected() {
        assert_matches!(
            validate_filters(Some("99"), None),
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            validate_filters(None, Some("13")),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
