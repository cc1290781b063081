// src/services/pagination.rs

//! Page slicing and the page-selector window.

use serde::Serialize;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Pages shown on each side of the current page.
const WINDOW: usize = 2;

/// One page of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
}

/// Number of pages for `len` results. An empty result set has 0 pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice `results` into the 1-based `page`.
///
/// Page 0 and pages past the end yield an empty slice.
pub fn paginate<T>(results: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(results.len(), page_size);

    let items = if page == 0 || page > total {
        &results[..0]
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(results.len());
        &results[start..end]
    };

    Page {
        items,
        page,
        total_pages: total,
    }
}

/// An entry in the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page buttons for a selector: first, last, and `current` +-2, with each
/// run of hidden pages collapsed into a single ellipsis.
pub fn visible_pages(current: usize, total: usize) -> Vec<PageMarker> {
    let mut markers = Vec::new();
    for page in 1..=total {
        let near = page.abs_diff(current) <= WINDOW;
        if page == 1 || page == total || near {
            markers.push(PageMarker::Page(page));
        } else if markers.last() != Some(&PageMarker::Ellipsis) {
            markers.push(PageMarker::Ellipsis);
        }
    }
    markers
}

/// Requested page movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Previous,
    Next,
    Number(usize),
}

impl PageTarget {
    /// Resolve against the current page. Previous/Next clamp to the valid
    /// range; explicit numbers are taken as given.
    pub fn resolve(self, current: usize, total: usize) -> usize {
        match self {
            PageTarget::Previous => current.saturating_sub(1).max(1),
            PageTarget::Next => (current + 1).min(total.max(1)),
            PageTarget::Number(n) => n,
        }
    }
}

/// Selector state for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub current: usize,
    pub total_pages: usize,
    pub markers: Vec<PageMarker>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationView {
    pub fn new(current: usize, total_pages: usize) -> Self {
        Self {
            current,
            total_pages,
            markers: visible_pages(current, total_pages),
            has_previous: current > 1,
            has_next: current < total_pages,
        }
    }

    /// A selector is only worth showing with more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}
