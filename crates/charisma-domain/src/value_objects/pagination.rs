//! Pagination value objects

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};

/// Requested page of a list query (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number, starting at 1
    pub page: u64,
    /// Page size
    pub limit: u64,
}

impl Pagination {
    /// Create a page request
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Number of items to skip
    pub fn offset(&self) -> usize {
        usize::try_from(self.page.saturating_sub(1).saturating_mul(self.limit)).unwrap_or(usize::MAX)
    }

    /// Page size as a `usize`
    pub fn take(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_LIMIT)
    }
}

/// Pagination metadata of a page result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total matching items
    pub total: u64,
    /// Total pages
    pub pages: u64,
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Slice an already filtered and sorted collection into a page
    pub fn slice(all: Vec<T>, request: Pagination) -> Self {
        let total = all.len() as u64;
        let pages = if request.limit == 0 {
            0
        } else {
            total.div_ceil(request.limit)
        };
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.take())
            .collect();
        Self {
            items,
            pagination: PageInfo {
                page: request.page,
                limit: request.limit,
                total,
                pages,
            },
        }
    }
}
