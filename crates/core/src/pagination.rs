//! Page-window computation for list pagination controls.
//!
//! The listing endpoints never ask the upstream API for a total page count,
//! so unless a caller supplies one the total is an estimate and "last page"
//! is inferred from a short page. Both are flagged in [`PageWindow`].

use serde::Serialize;

/// Number of page buttons shown at once.
pub const DEFAULT_MAX_VISIBLE: u32 = 5;

/// Page numbers to render, centered on `current` and clamped to `1..=total`.
///
/// When the centered window would run off either end it widens toward the
/// other end, so the result always holds `min(total, max_visible)` pages.
/// A `current` past `total` is treated as the last page.
pub fn visible_pages(current: u32, total: u32, max_visible: u32) -> Vec<u32> {
    if total == 0 || max_visible == 0 {
        return Vec::new();
    }
    if total <= max_visible {
        return (1..=total).collect();
    }

    let current = current.clamp(1, total);
    let span = max_visible - 1;
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = start.saturating_add(span).min(total);
    if end - start < span {
        start = end.saturating_sub(span).max(1);
    }
    (start..=end).collect()
}

/// Estimated total pages when none is supplied: `ceil(current * 1.5)`,
/// saturating at `u32::MAX`.
pub fn estimated_total_pages(current: u32) -> u32 {
    let current = current.max(1);
    current.saturating_add(current.div_ceil(2))
}

/// A short page means there is nothing after it.
pub fn is_last_page(current_items: usize, per_page: usize) -> bool {
    current_items < per_page
}

/// Everything a pagination control needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: u32,
    pub total_pages: u32,
    /// `true` when `total_pages` was estimated rather than supplied.
    pub total_is_estimate: bool,
    pub pages: Vec<u32>,
    pub is_last_page: bool,
    pub has_previous: bool,
    pub has_next: bool,
    /// Render a jump-to-first link before the window.
    pub show_first: bool,
    pub show_leading_ellipsis: bool,
    /// Render a jump-to-last link after the window.
    pub show_last: bool,
    pub show_trailing_ellipsis: bool,
}

impl PageWindow {
    /// Build the control model for one page of results.
    ///
    /// `current_items` is the number of records on the current page and
    /// drives the last-page heuristic.
    pub fn compute(
        current_page: u32,
        total_pages: Option<u32>,
        per_page: usize,
        current_items: usize,
    ) -> Self {
        let current_page = current_page.max(1);
        let total_is_estimate = total_pages.is_none();
        let total_pages = total_pages.unwrap_or_else(|| estimated_total_pages(current_page));

        let pages = visible_pages(current_page, total_pages, DEFAULT_MAX_VISIBLE);
        let first_visible = pages.first().copied().unwrap_or(1);
        let last_visible = pages.last().copied().unwrap_or(total_pages);
        let is_last_page = is_last_page(current_items, per_page);

        Self {
            current_page,
            total_pages,
            total_is_estimate,
            is_last_page,
            has_previous: current_page > 1,
            has_next: !is_last_page && current_page < total_pages,
            show_first: first_visible > 1,
            show_leading_ellipsis: first_visible > 2,
            show_last: last_visible < total_pages,
            show_trailing_ellipsis: last_visible.saturating_add(1) < total_pages,
            pages,
        }
    }
}
