//! Page window and page bounds calculations
//!
//! Pure functions for the pagination bar under every list view: which page
//! buttons to show, which item range the current page covers, and where a
//! page starts and ends when a list is paged locally.

use serde::{Deserialize, Serialize};

/// Default number of page buttons rendered by list views.
pub const DEFAULT_MAX_BUTTONS: usize = 5;

/// Error type for pagination operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("Page numbers start at 1")]
    InvalidPage,

    #[error("Page size must be at least 1")]
    InvalidLimit,

    #[error("Page {page} is out of range. Only {total_pages} pages available.")]
    OutOfRange { page: usize, total_pages: usize },
}

/// Page numbers to render as buttons.
///
/// Returns `min(max_buttons, total_pages)` contiguous pages within
/// `1..=total_pages`. The window stays pinned to the first pages while
/// `current_page` is near the start, to the last pages near the end, and
/// otherwise starts `max_buttons / 2` pages before the current one.
/// `current_page` is clamped into range first.
pub fn page_window(current_page: usize, total_pages: usize, max_buttons: usize) -> Vec<usize> {
    if total_pages == 0 || max_buttons == 0 {
        return Vec::new();
    }

    if total_pages <= max_buttons {
        return (1..=total_pages).collect();
    }

    let current = current_page.clamp(1, total_pages);
    let offset = max_buttons / 2;

    let start = if current <= max_buttons.div_ceil(2) {
        1
    } else if current >= total_pages - offset {
        total_pages - max_buttons + 1
    } else {
        current - offset
    };

    (start..start + max_buttons).collect()
}

/// 1-based `(start, end)` item numbers shown on `current_page`.
///
/// Used for the "Showing X to Y of Z entries" text. With no items the end
/// is 0. Arithmetic saturates, so absurd page numbers never overflow.
pub fn item_range(current_page: usize, items_per_page: usize, total_items: usize) -> (usize, usize) {
    let current = current_page.max(1);
    let start = (current - 1).saturating_mul(items_per_page).saturating_add(1);
    let end = current.saturating_mul(items_per_page).min(total_items);
    (start, end)
}

/// Number of pages needed for `total_items`, 0 when there are none.
pub fn total_pages(total_items: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total_items.div_ceil(limit)
}

/// Slice bounds `(start, end)` of `page` within a list of `total_items`.
///
/// An empty list has a single empty first page.
pub fn page_bounds(
    total_items: usize,
    page: usize,
    limit: usize,
) -> Result<(usize, usize), PaginationError> {
    if page == 0 {
        return Err(PaginationError::InvalidPage);
    }
    if limit == 0 {
        return Err(PaginationError::InvalidLimit);
    }
    if total_items == 0 && page == 1 {
        return Ok((0, 0));
    }

    let start = (page - 1).checked_mul(limit).unwrap_or(usize::MAX);

    if start >= total_items {
        return Err(PaginationError::OutOfRange {
            page,
            total_pages: total_pages(total_items, limit),
        });
    }

    let end = start.saturating_add(limit).min(total_items);
    Ok((start, end))
}

/// Everything the pagination bar needs for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub pages: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PaginationInfo {
    pub fn new(page: usize, limit: usize, total_items: usize, max_buttons: usize) -> Self {
        let total_pages = total_pages(total_items, limit);
        let (start_item, end_item) = item_range(page, limit, total_items);

        Self {
            current_page: page,
            total_pages,
            total_items,
            limit,
            start_item,
            end_item,
            pages: page_window(page, total_pages, max_buttons),
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }

    /// "Showing X to Y of Z entries"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.start_item, self.end_item, self.total_items
        )
    }
}
