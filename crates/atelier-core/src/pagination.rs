//! Pagination math shared by every list endpoint.
//!
//! [`PageInfo::compute`] performs no I/O; callers run the count query, hand
//! the total in, and apply `offset()`/`limit` to their own storage query.

use serde::{Deserialize, Serialize};

/// Largest accepted page size; anything bigger is clamped, not rejected.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Incoming page selection, before normalization.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageRequest {
    /// Clamp to `page >= 1` and `1 <= limit <= MAX_PAGE_LIMIT`.
    pub fn normalize(self, default_limit: u32) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(default_limit)
            .clamp(1, MAX_PAGE_LIMIT);
        (page, limit)
    }
}

/// Response-side pagination descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    /// `total_pages = ceil(total / limit)`, `has_next = page < total_pages`,
    /// `has_prev = page > 1`.
    pub fn compute(page: u32, limit: u32, total: u64) -> Self {
        debug_assert!(page >= 1 && limit >= 1);
        let total_pages = total.div_ceil(limit as u64).min(u32::MAX as u64) as u32;
        PageInfo {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Offset to apply to the storage query for this page.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// A page of items together with its descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        for (page, limit) in [(1u32, 10u32), (2, 10), (7, 3), (100, 1)] {
            let info = PageInfo::compute(page, limit, 1000);
            assert_eq!(info.offset(), (page as u64 - 1) * limit as u64);
        }
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(PageInfo::compute(1, 10, 0).total_pages, 0);
        assert_eq!(PageInfo::compute(1, 10, 1).total_pages, 1);
        assert_eq!(PageInfo::compute(1, 10, 10).total_pages, 1);
        assert_eq!(PageInfo::compute(1, 10, 11).total_pages, 2);
        assert_eq!(PageInfo::compute(1, 3, 7).total_pages, 3);
    }

    #[test]
    fn has_next_iff_page_below_total_pages() {
        let info = PageInfo::compute(2, 10, 25);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next);
        assert!(info.has_prev);

        let last = PageInfo::compute(3, 10, 25);
        assert!(!last.has_next);

        let empty = PageInfo::compute(1, 10, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn normalize_clamps_degenerate_requests() {
        let (page, limit) = PageRequest {
            page: Some(0),
            limit: Some(0),
        }
        .normalize(10);
        assert_eq!((page, limit), (1, 1));

        let (page, limit) = PageRequest {
            page: None,
            limit: Some(100_000),
        }
        .normalize(10);
        assert_eq!((page, limit), (1, MAX_PAGE_LIMIT));

        let (_, limit) = PageRequest {
            page: Some(3),
            limit: None,
        }
        .normalize(25);
        assert_eq!(limit, 25);
    }
}
