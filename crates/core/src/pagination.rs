//! Pagination metadata and the numbered page-link window.

use serde::{Deserialize, Serialize};

/// Maximum number of numbered page links rendered at once.
pub const MAX_PAGE_LINKS: i64 = 4;

/// Pagination metadata returned by `GET /cuts` alongside the page data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 1-based page number.
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    /// May be 0 when `total` is 0.
    pub total_pages: i64,
}

impl PaginationMeta {
    /// Metadata substituted when a list fetch fails or is skipped.
    ///
    /// Keeps the requested page addressable (`total_pages` covers it) so the
    /// page chrome still renders around an empty data set.
    pub fn fallback(page: i64, per_page: i64) -> Self {
        Self {
            page,
            per_page,
            total: 0,
            total_pages: page.max(1),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is unavailable on the last page and when there are no pages.
    pub fn has_next(&self) -> bool {
        self.total_pages != 0 && self.page < self.total_pages
    }
}

/// Compute the numbered page links to render.
///
/// With [`MAX_PAGE_LINKS`] or fewer pages the full range `1..=total_pages`
/// is emitted. Beyond that, a 4-wide window is centered on `current` and
/// clamped so it never starts below 1 nor ends past `total_pages`.
pub fn page_window(current: i64, total_pages: i64) -> Vec<i64> {
    if total_pages <= MAX_PAGE_LINKS {
        return (1..=total_pages).collect();
    }
    let start = (current - 2).clamp(1, total_pages - MAX_PAGE_LINKS + 1);
    (start..start + MAX_PAGE_LINKS).collect()
}
