//! Client-held search state.
//!
//! `SearchState` is the single owned source of truth for pagination and
//! filters. Every mutation goes through the update methods here so the
//! page-reset rules live in one place and are testable without a view.

/// Results-per-page choices offered by the UI.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [15, 25, 50];

/// Default results per page at startup.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// The closed set of filter keys the search endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Cuisine,
    Rating,
    TotalTime,
    Serves,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Title,
        FilterField::Cuisine,
        FilterField::Rating,
        FilterField::TotalTime,
        FilterField::Serves,
    ];

    /// Query-string parameter name.
    pub fn param(self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Cuisine => "cuisine",
            FilterField::Rating => "rating",
            FilterField::TotalTime => "total_time",
            FilterField::Serves => "serves",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Title => "Title",
            FilterField::Cuisine => "Cuisine",
            FilterField::Rating => "Rating",
            FilterField::TotalTime => "Max time",
            FilterField::Serves => "Serves",
        }
    }

    fn index(self) -> usize {
        match self {
            FilterField::Title => 0,
            FilterField::Cuisine => 1,
            FilterField::Rating => 2,
            FilterField::TotalTime => 3,
            FilterField::Serves => 4,
        }
    }
}

/// Pagination and filter configuration driving each search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Current page, always >= 1.
    pub page: u32,
    /// Results per page, one of [`PAGE_SIZE_OPTIONS`].
    pub per_page: u32,
    filters: [String; 5],
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            filters: Default::default(),
        }
    }
}

impl SearchState {
    /// Current value for a filter key. Empty string means unset.
    pub fn filter(&self, field: FilterField) -> &str {
        &self.filters[field.index()]
    }

    /// Set a filter value and reset to the first page.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters[field.index()] = value.into();
        self.page = 1;
    }

    /// Clear one filter and reset to the first page.
    pub fn clear_filter(&mut self, field: FilterField) {
        self.set_filter(field, "");
    }

    pub fn has_any_filter(&self) -> bool {
        self.filters.iter().any(|f| !f.is_empty())
    }

    /// Move by `delta` pages. The floor at page 1 mirrors what control
    /// disablement already prevents; upper bounds are the backend's problem.
    pub fn step_page(&mut self, delta: i32) {
        self.page = self.page.saturating_add_signed(delta).max(1);
    }

    /// Change the page size and reset to the first page.
    pub fn set_page_size(&mut self, per_page: u32) {
        self.per_page = per_page;
        self.page = 1;
    }

    /// The next entry in [`PAGE_SIZE_OPTIONS`] after the current one.
    pub fn next_page_size(&self) -> u32 {
        let pos = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&n| n == self.per_page)
            .unwrap_or(0);
        PAGE_SIZE_OPTIONS[(pos + 1) % PAGE_SIZE_OPTIONS.len()]
    }
}

/// Display state of the list area.
///
/// `NoData` and `NoResults` are mutually exclusive terminal outcomes of a
/// search; `Rows` is the default whenever at least one row came back (and at
/// startup, before the first response, when the table is simply blank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Rows,
    NoResults,
    NoData,
}

impl ListPhase {
    /// Phase entered after a search completes.
    pub fn after_fetch(fetch_ok: bool, row_count: usize) -> Self {
        match (fetch_ok, row_count) {
            (false, _) => ListPhase::NoData,
            (true, 0) => ListPhase::NoResults,
            (true, _) => ListPhase::Rows,
        }
    }
}
