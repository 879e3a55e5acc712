//! Page/limit resolution and pagination metadata for list endpoints.

use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A resolved page request: 1-based page and a clamped limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Clamp user input. Missing or non-positive pages become 1; limits are
    /// clamped into `[1, max]` with `default` used when absent.
    pub fn resolve(page: Option<i64>, limit: Option<i64>, default: i64, max: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: clamp_limit(limit, default, max),
        }
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Build the metadata block for a result set of `total_items` rows.
    pub fn meta(&self, total_items: i64) -> PaginationMeta {
        PaginationMeta {
            current_page: self.page,
            total_pages: total_pages(total_items, self.limit),
            total_items,
            items_per_page: self.limit,
        }
    }
}

/// Clamp a user-provided limit to `[1, max]`, defaulting when `None`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// `ceil(total / limit)`; zero rows means zero pages.
pub fn total_pages(total_items: i64, limit: i64) -> i64 {
    let limit = limit.max(1);
    let total = total_items.max(0);
    (total + limit - 1) / limit
}

/// Pagination block returned alongside list data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        for limit in 1..=12 {
            for total in 0..=60 {
                let expected = (total as f64 / limit as f64).ceil() as i64;
                assert_eq!(total_pages(total, limit), expected, "T={total} L={limit}");
            }
        }
    }

    #[test]
    fn zero_items_is_zero_pages() {
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn resolve_defaults() {
        let req = PageRequest::resolve(None, None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn resolve_clamps_bad_input() {
        let req = PageRequest::resolve(Some(-3), Some(500), 10, 100);
        assert_eq!(req, PageRequest { page: 1, limit: 100 });

        let req = PageRequest::resolve(Some(0), Some(0), 10, 100);
        assert_eq!(req, PageRequest { page: 1, limit: 1 });
    }

    #[test]
    fn offset_follows_page() {
        let req = PageRequest::resolve(Some(3), Some(20), 10, 100);
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn meta_serializes_camel_case() {
        let meta = PageRequest::resolve(Some(2), Some(5), 10, 100).meta(11);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["totalItems"], 11);
        assert_eq!(json["itemsPerPage"], 5);
    }
}
