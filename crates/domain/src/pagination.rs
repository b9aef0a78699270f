use serde::{Deserialize, Serialize};

use crate::lenient;

/// Pagination metadata returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PaginationWire")]
pub struct Pagination {
    /// Total number of records across all pages.
    pub total: u64,
    /// Page size used by the server.
    pub per_page: u32,
    /// One-based page number of this response.
    pub current_page: u32,
    /// Number of pages for the current filter.
    pub total_pages: u32,
}

/// Some endpoints send `last_page` instead of, or alongside, `total_pages`.
#[derive(Deserialize)]
struct PaginationWire {
    #[serde(default, deserialize_with = "lenient::count")]
    total: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    per_page: u32,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    current_page: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    total_pages: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    last_page: Option<u32>,
}

impl From<PaginationWire> for Pagination {
    fn from(wire: PaginationWire) -> Self {
        Self {
            total: wire.total,
            per_page: wire.per_page,
            current_page: wire.current_page.unwrap_or(1),
            total_pages: wire.total_pages.or(wire.last_page).unwrap_or(1),
        }
    }
}

impl Pagination {
    /// Builds metadata for an unpaginated response holding `count` records.
    #[must_use]
    pub fn single_page(count: usize) -> Self {
        let total = u64::try_from(count).unwrap_or(u64::MAX);
        Self {
            total,
            per_page: u32::try_from(count).unwrap_or(u32::MAX),
            current_page: 1,
            total_pages: 1,
        }
    }

    /// Derives the state of the prev/next controls.
    #[must_use]
    pub fn controls(&self) -> PaginationControls {
        PaginationControls {
            visible: self.total_pages > 1,
            previous_enabled: self.current_page > 1,
            next_enabled: self.current_page < self.total_pages,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}

/// Render state of a list's pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    /// Hidden entirely when there is at most one page.
    pub visible: bool,
    /// "Previous" is disabled on the first page.
    pub previous_enabled: bool,
    /// "Next" is disabled on the last page.
    pub next_enabled: bool,
    /// Page shown.
    pub current_page: u32,
    /// Last page.
    pub total_pages: u32,
}

impl PaginationControls {
    /// Controls for a list that has not loaded yet.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            previous_enabled: false,
            next_enabled: false,
            current_page: 1,
            total_pages: 1,
        }
    }
}

/// Page coordinates sent with a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a page request; both values are clamped to at least one.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Returns the one-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::{PageRequest, Pagination};

    #[test]
    fn first_of_three_pages_disables_previous_only() {
        let pagination = Pagination {
            total: 40,
            per_page: 15,
            current_page: 1,
            total_pages: 3,
        };

        let controls = pagination.controls();

        assert!(controls.visible);
        assert!(!controls.previous_enabled);
        assert!(controls.next_enabled);
    }

    #[test]
    fn single_page_hides_controls() {
        let pagination = serde_json::from_value::<Pagination>(json!({
            "total": 0,
            "per_page": 15,
            "current_page": 1,
            "total_pages": 1
        }));

        assert!(matches!(pagination, Ok(value) if !value.controls().visible));
    }

    #[test]
    fn total_pages_and_last_page_may_both_be_sent() {
        let both = serde_json::from_value::<Pagination>(json!({
            "total": 45,
            "per_page": 15,
            "current_page": 1,
            "total_pages": 3,
            "last_page": 3
        }));
        let last_page_only = serde_json::from_value::<Pagination>(json!({
            "total": "45",
            "per_page": 15,
            "current_page": 2,
            "last_page": 3
        }));

        assert!(matches!(both, Ok(Pagination { total_pages: 3, .. })));
        assert!(matches!(
            last_page_only,
            Ok(Pagination { total: 45, current_page: 2, total_pages: 3, .. })
        ));
    }

    #[test]
    fn page_request_clamps_to_one() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 1);
    }

    proptest! {
        #[test]
        fn controls_never_enable_past_boundaries(total_pages in 0_u32..50, current_page in 1_u32..50) {
            let controls = Pagination {
                total: u64::from(total_pages) * 10,
                per_page: 10,
                current_page,
                total_pages,
            }
            .controls();

            prop_assert_eq!(controls.visible, total_pages > 1);
            prop_assert_eq!(controls.previous_enabled, current_page > 1);
            prop_assert!(!(controls.next_enabled && current_page >= total_pages));
        }
    }
}
