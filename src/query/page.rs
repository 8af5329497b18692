//! Pagination

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages needed for `count` items
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamp a requested page into `1..=total_pages` (page 1 when there are none)
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice out 1-based page `page`.
///
/// A page past the end yields no items; clamping is the caller's choice.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> LedgerResult<Page<T>> {
    if page_size == 0 {
        return Err(LedgerError::Validation(
            "Page size must be greater than zero".into(),
        ));
    }
    if page == 0 {
        return Err(LedgerError::Validation("Pages are numbered from 1".into()));
    }

    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Ok(Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_items: items.len(),
        total_pages: total_pages(items.len(), page_size),
    })
}
