//! Pagination request and response types.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;
/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A pagination request (1-based page numbering).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-based).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page, clamped to [`MAX_PAGE_SIZE`].
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// The SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page.max(1)) - 1) * self.limit()
    }

    /// The SQL LIMIT for this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page.clamp(1, MAX_PAGE_SIZE))
    }
}

/// A page of results together with total counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: i64,
    /// The page number (1-based).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl<T> PageResponse<T> {
    /// Assemble a page response from a query result and its total count.
    pub fn new(items: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page.max(1),
            per_page: request.limit() as u32,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PAGE_SIZE
}
