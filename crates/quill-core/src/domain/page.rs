//! Pagination arithmetic shared by every list endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Largest row offset a store accepts; SQL `OFFSET` binds as a signed 64-bit value.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// A validated list request: 1-based page number, page size and optional search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            search: None,
        }
    }
}

impl PageRequest {
    /// Build a request, clamping the page size to `max_per_page` and
    /// treating blank search terms as absent.
    pub fn new(
        page: Option<u64>,
        per_page: Option<u64>,
        search: Option<String>,
        max_per_page: u64,
    ) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, max_per_page.max(1)),
            search: search.filter(|s| !s.is_empty()),
        }
    }

    /// Number of rows to skip before this page starts, capped at [`MAX_OFFSET`].
    ///
    /// A page that far out lies past the last row anyway, so it comes back empty.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .min(MAX_OFFSET)
    }
}

/// One page of a list result plus what is needed to build pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total_items,
        }
    }

    /// `ceil(total_items / per_page)`.
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.per_page)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::new(None, None, None, 100);
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::new(Some(3), Some(10), None, 100);
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn test_offset_fits_signed_column() {
        let req = PageRequest::new(Some(u64::MAX / 2), Some(10), None, 100);
        assert_eq!(req.offset(), MAX_OFFSET);

        let req = PageRequest::new(Some(u64::MAX), Some(100), None, 100);
        assert_eq!(req.offset(), MAX_OFFSET);
        assert!(i64::try_from(req.offset()).is_ok());
    }

    #[test]
    fn test_per_page_is_clamped() {
        let req = PageRequest::new(Some(1), Some(5000), None, 100);
        assert_eq!(req.per_page, 100);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let req = PageRequest::new(None, None, Some(String::new()), 100);
        assert_eq!(req.search, None);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest::new(Some(1), Some(10), None, 100);
        assert_eq!(Page::<()>::new(vec![], &req, 0).total_pages(), 0);
        assert_eq!(Page::<()>::new(vec![], &req, 10).total_pages(), 1);
        assert_eq!(Page::<()>::new(vec![], &req, 11).total_pages(), 2);
        assert_eq!(Page::<()>::new(vec![], &req, 25).total_pages(), 3);
    }
}
