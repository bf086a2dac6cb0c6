use serde::{Deserialize, Serialize};

/// The `pagination` block of a search response, plus the page arithmetic
/// derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Offset of the first result on this page.
    pub index: i64,
    pub page_size: i64,
    /// Results actually returned on this page.
    pub result_count: i64,
    /// Results across all pages.
    pub total_count: i64,
}

impl Pagination {
    /// 1-based page number. A zero page size reports page 1.
    pub fn current_page(&self) -> i64 {
        if self.page_size <= 0 {
            return 1;
        }
        self.index / self.page_size + 1
    }

    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        let total = self.total_count.max(0);
        total / self.page_size + i64::from(total % self.page_size != 0)
    }

    pub fn has_next_page(&self) -> bool {
        self.next_index().is_some()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_size > 0 && self.index > 0
    }

    pub fn next_index(&self) -> Option<i64> {
        if self.page_size <= 0 {
            return None;
        }
        self.index
            .checked_add(self.page_size)
            .filter(|next| *next < self.total_count)
    }

    pub fn previous_index(&self) -> Option<i64> {
        self.has_previous_page()
            .then(|| self.index.saturating_sub(self.page_size).max(0))
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
