use crate::conference::ConferenceRecord;
use serde::{Deserialize, Serialize};

/// Number of cards on one page of the conference list.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// A zero-based page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { index: 0, size: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    /// A zero `size` falls back to [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub const fn new(index: usize, size: usize) -> Self {
        let size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        Self { index, size }
    }

    #[must_use]
    pub const fn first(size: usize) -> Self {
        Self::new(0, size)
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }

    /// `ceil(total / size)`.
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }
}

/// One page of filtered results plus the totals needed to render a paginator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T = ConferenceRecord> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page_count: usize,
    pub index: usize,
    pub size: usize,
}

impl<T> PageResult<T> {
    #[must_use]
    pub const fn empty(page: PageRequest) -> Self {
        Self { items: Vec::new(), total_count: 0, page_count: 0, index: page.index, size: page.size }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.index.saturating_add(1) < self.page_count
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.index > 0
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty(PageRequest::default())
    }
}
