//! Paging request and per-search paging state
//!
//! Callers address pages with a 1-based offset. Internally every offset is
//! 0-based; the conversion happens once, in [`Paginator::from_request`].

use serde::{Deserialize, Serialize};

/// Caller-supplied paging request (1-based offset)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingRequest {
    /// Requested page size; absent or zero selects the configured default
    #[serde(default)]
    pub page_size: Option<usize>,
    /// 1-based offset; absent or <= 0 means the first record
    #[serde(default)]
    pub offset: Option<i64>,
    /// Continuation token from a previous page
    #[serde(default)]
    pub cookie: Option<String>,
}

impl PagingRequest {
    /// Creates a request for `page_size` records starting at 1-based `offset`
    pub fn new(page_size: usize, offset: i64) -> Self {
        Self {
            page_size: Some(page_size),
            offset: Some(offset),
            cookie: None,
        }
    }

    /// Sets the continuation token
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

/// Mutable paging state threaded through one search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    offset: usize,
    continuation_token: Option<String>,
    no_more_results: bool,
}

impl Paginator {
    /// Creates a paginator with a 0-based offset
    pub fn new(page_size: usize, offset: usize) -> Self {
        Self {
            page_size,
            offset,
            continuation_token: None,
            no_more_results: false,
        }
    }

    /// Builds the paginator for a search, correcting the 1-based offset
    pub fn from_request(request: Option<&PagingRequest>, default_page_size: usize) -> Self {
        let Some(request) = request else {
            return Self::new(default_page_size, 0);
        };

        let page_size = match request.page_size {
            Some(size) if size > 0 => size,
            _ => default_page_size,
        };
        let offset = match request.offset {
            Some(offset) if offset > 0 => usize::try_from(offset - 1).unwrap_or(usize::MAX),
            _ => 0,
        };

        Self {
            page_size,
            offset,
            continuation_token: request.cookie.clone(),
            no_more_results: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 0-based offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    pub fn no_more_results(&self) -> bool {
        self.no_more_results
    }

    pub fn set_continuation_token(&mut self, token: Option<String>) {
        self.continuation_token = token;
    }

    pub fn set_no_more_results(&mut self, no_more_results: bool) {
        self.no_more_results = no_more_results;
    }

    /// Moves the offset forward by `count` records
    pub fn advance(&mut self, count: usize) {
        self.offset = self.offset.saturating_add(count);
    }

    /// Returns true once `total` records are exhausted by the current window
    pub fn exhausts(&self, total: usize) -> bool {
        self.offset.saturating_add(self.page_size) >= total
    }

    /// Cuts the window `[offset, offset + page_size)` out of `items`
    pub fn window<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.page_size)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_correction() {
        let p = Paginator::from_request(Some(&PagingRequest::new(10, 1)), 20);
        assert_eq!(p.offset(), 0);

        let p = Paginator::from_request(Some(&PagingRequest::new(10, 11)), 20);
        assert_eq!(p.offset(), 10);

        let p = Paginator::from_request(Some(&PagingRequest::new(10, 0)), 20);
        assert_eq!(p.offset(), 0);

        let p = Paginator::from_request(Some(&PagingRequest::new(10, -5)), 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_defaults_without_request() {
        let p = Paginator::from_request(None, 20);
        assert_eq!(p.page_size(), 20);
        assert_eq!(p.offset(), 0);
        assert!(!p.no_more_results());
        assert_eq!(p.continuation_token(), None);
    }

    #[test]
    fn test_zero_page_size_uses_default() {
        let request = PagingRequest {
            page_size: Some(0),
            offset: None,
            cookie: Some("abc".into()),
        };
        let p = Paginator::from_request(Some(&request), 20);
        assert_eq!(p.page_size(), 20);
        assert_eq!(p.continuation_token(), Some("abc"));
    }

    #[test]
    fn test_window_and_exhaustion() {
        let items: Vec<u32> = (0..25).collect();

        let p = Paginator::new(10, 20);
        assert_eq!(p.window(items.clone()), vec![20, 21, 22, 23, 24]);
        assert!(p.exhausts(items.len()));

        let p = Paginator::new(10, 0);
        assert_eq!(p.window(items.clone()).len(), 10);
        assert!(!p.exhausts(items.len()));

        let p = Paginator::new(10, 30);
        assert!(p.window(items.clone()).is_empty());
        assert!(p.exhausts(items.len()));
    }

    #[test]
    fn test_huge_offset_past_the_end() {
        let request = PagingRequest {
            page_size: Some(10),
            offset: Some(i64::MAX),
            cookie: None,
        };
        let p = Paginator::from_request(Some(&request), 20);

        assert!(p.offset() > 1_000_000);
        let items: Vec<u32> = (0..25).collect();
        assert!(p.window(items).is_empty());
        assert!(p.exhausts(25));
    }
}
