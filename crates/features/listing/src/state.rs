use confhub_domain::{ActiveFilters, FilterSpec, PageResult};

/// Everything the list view needs to render its controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Committed constraints; `search` and `location` only change once their debounce
    /// window has passed.
    pub filter: FilterSpec,
    /// The search box as typed.
    pub search_input: String,
    /// The location field as typed.
    pub location_input: String,
    pub page_index: usize,
    pub is_loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            search_input: String::new(),
            location_input: String::new(),
            page_index: 0,
            is_loading: true,
        }
    }
}

/// What subscribers receive after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub state: ViewState,
    pub page: PageResult,
    pub active: ActiveFilters,
    /// Sorted distinct categories of the catalog.
    pub categories: Vec<String>,
    /// A debounced input is still waiting to be committed.
    pub searching: bool,
    /// Number of recomputes so far.
    pub revision: u64,
}

impl ListingSnapshot {
    #[must_use]
    pub fn initial(page_size: usize) -> Self {
        Self {
            state: ViewState::default(),
            page: PageResult::empty(confhub_domain::PageRequest::first(page_size)),
            active: ActiveFilters::empty(),
            categories: Vec::new(),
            searching: false,
            revision: 0,
        }
    }

    /// `true` once loading finished and no record passes the filters.
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        !self.state.is_loading && self.page.total_count == 0
    }
}
