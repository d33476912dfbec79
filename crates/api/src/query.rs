//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Items per page when the caller does not say.
pub const DEFAULT_ROWS: u32 = 12;

/// Largest page the listing endpoint will request upstream.
pub const MAX_ROWS: u32 = 100;

/// Query parameters for `GET /places`.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceListParams {
    pub area_code: Option<String>,
    pub content_type_id: Option<String>,
    pub keyword: Option<String>,
    pub page: Option<u32>,
    pub rows: Option<u32>,
    /// `latest` (default) or `name`.
    pub sort: Option<String>,
    /// Known total page count; when absent the pager estimates one.
    pub total_pages: Option<u32>,
    /// Keep only places the caller has bookmarked. Requires auth.
    #[serde(default)]
    pub bookmarked: bool,
    /// Keep only places with pet-travel information.
    #[serde(default)]
    pub pet_friendly: bool,
}

impl PlaceListParams {
    /// Requested page, at least 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Requested page size, clamped to `1..=MAX_ROWS`.
    pub fn rows(&self) -> u32 {
        self.rows.unwrap_or(DEFAULT_ROWS).clamp(1, MAX_ROWS)
    }

    /// Trimmed keyword, `None` when absent or blank.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// A filter code, `None` when absent or blank.
    pub fn code(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Query parameters for `GET /bookmarks/status` (`?content_ids=a,b,c`).
#[derive(Debug, Deserialize)]
pub struct BookmarkStatusParams {
    pub content_ids: Option<String>,
}

impl BookmarkStatusParams {
    /// Distinct non-blank ids in request order.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self
            .content_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            if !ids.iter().any(|seen| seen == id) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}
