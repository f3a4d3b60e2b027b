//! Filter and pagination state store.
//!
//! [`FilterState`] holds the user's current search text, date range, page
//! number and page size. All mutators are synchronous, total and free of
//! side effects: they never trigger a fetch themselves. Whether a mutation
//! leads to a refetch is decided by the event handler, the UI policy layer.

use crate::api::query::{QueryParams, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Page sizes the UI cycles through.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// User-selected filters plus the pagination cursor.
///
/// Invariant: `page` is reset to 1 whenever `page_size` changes. Date
/// bounds are kept as plain ISO strings (empty = unset), matching what the
/// query builder expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Substring filter on the record key; empty = no filter.
    pub search_value: String,

    /// Inclusive lower bound on the update timestamp; empty = unset.
    pub date_from: String,

    /// Inclusive upper bound on the update timestamp; empty = unset.
    pub date_to: String,

    /// 1-based page cursor.
    pub page: u32,

    /// Records per page.
    pub page_size: u32,
}

/// A partial update for [`FilterState::set_filters`].
///
/// `None` fields are left untouched; `Some` fields are assigned as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search_value: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_value: String::new(),
            date_from: String::new(),
            date_to: String::new(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// Creates filter state with a custom initial page size.
    ///
    /// A zero page size falls back to the default.
    #[must_use]
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            ..Self::default()
        }
    }

    /// Merges the supplied fields into the current state.
    ///
    /// Note that a `page_size` arriving through a patch does not reset the
    /// page; only [`update_page_size`](Self::update_page_size) carries that
    /// invariant, mirroring the difference between a bulk restore and a
    /// user-driven size change.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        if let Some(search_value) = patch.search_value {
            self.search_value = search_value;
        }
        if let Some(date_from) = patch.date_from {
            self.date_from = date_from;
        }
        if let Some(date_to) = patch.date_to {
            self.date_to = date_to;
        }
        if let Some(page) = patch.page {
            self.page = page;
        }
        if let Some(page_size) = patch.page_size {
            self.page_size = page_size;
        }
    }

    /// Replaces the search text.
    pub fn update_search_value(&mut self, search_value: impl Into<String>) {
        self.search_value = search_value.into();
    }

    /// Replaces both date bounds at once.
    pub fn update_date_range(&mut self, date_from: impl Into<String>, date_to: impl Into<String>) {
        self.date_from = date_from.into();
        self.date_to = date_to.into();
    }

    /// Changes the page size and resets the cursor to the first page.
    pub fn update_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
        self.page = DEFAULT_PAGE;
    }

    /// Moves the page cursor.
    pub fn update_page(&mut self, page: u32) {
        self.page = page;
    }

    /// Restores every field to its default.
    pub fn clear_filters(&mut self) {
        *self = Self::default();
    }

    /// Whether any user filter (search or date bound) is active.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search_value.trim().is_empty()
            || !self.date_from.trim().is_empty()
            || !self.date_to.trim().is_empty()
    }

    /// Snapshots this state as query-builder input.
    #[must_use]
    pub fn to_query_params(&self) -> QueryParams {
        QueryParams {
            search: Some(self.search_value.clone()),
            date_from: Some(self.date_from.clone()),
            date_to: Some(self.date_to.clone()),
            page: Some(self.page),
            page_size: Some(self.page_size),
        }
    }

    /// Returns the next page size in the cycle 10 → 25 → 50 → 100 → 10.
    ///
    /// An off-cycle current size (from configuration) advances to the first
    /// entry larger than it, wrapping to the smallest.
    #[must_use]
    pub fn next_page_size(&self) -> u32 {
        PAGE_SIZES
            .iter()
            .position(|&size| size == self.page_size)
            .map_or_else(
                || {
                    PAGE_SIZES
                        .iter()
                        .find(|&&size| size > self.page_size)
                        .copied()
                        .unwrap_or(PAGE_SIZES[0])
                },
                |idx| PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()],
            )
    }
}
