//! Pagination math shared by the coordination layer and the table component.
//!
//! [`PaginationInfo`] is derived state: it is recomputed from the current
//! page, page size and filtered total on every read and never stored. Both
//! the server-side pagination path (coordination layer) and the table
//! component's self-managed mode go through [`PaginationInfo::compute`], so
//! the two can never drift apart.

/// Derived pagination view for one (page, page size, total) triple.
///
/// `start_index`/`end_index` are 1-based positions of the visible slice
/// within the filtered total, with `end_index` clamped to `total_items`
/// (a partial last page reports its real extent, not `page * page_size`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    /// The page currently displayed, 1-based.
    pub current_page: u32,

    /// Total number of pages; 0 when there are no matching items.
    pub total_pages: u32,

    /// Filtered total across all pages.
    pub total_items: u64,

    /// 1-based index of the first item on the current page.
    pub start_index: u64,

    /// 1-based index of the last item on the current page, clamped to
    /// `total_items`.
    pub end_index: u64,

    /// Whether a next page exists.
    pub has_next: bool,

    /// Whether a previous page exists.
    pub has_previous: bool,
}

impl PaginationInfo {
    /// Computes the pagination view for the given cursor and total.
    ///
    /// `page_size` of zero is treated as one to keep the math total; the
    /// filter store never produces a zero page size.
    #[must_use]
    pub fn compute(page: u32, page_size: u32, total_items: u64) -> Self {
        let size = u64::from(page_size.max(1));
        let total_pages_wide = (total_items + size - 1) / size;
        let total_pages = u32::try_from(total_pages_wide).unwrap_or(u32::MAX);

        let start_index = u64::from(page.saturating_sub(1)) * size + 1;
        let end_index = (u64::from(page) * size).min(total_items);

        Self {
            current_page: page,
            total_pages,
            total_items,
            start_index,
            end_index,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }

    /// Clamps a requested jump target into the valid page range.
    ///
    /// Returns `None` when the jump would be a no-op: the target equals the
    /// current page, or there are no pages at all.
    #[must_use]
    pub fn clamp_jump(&self, target: u32) -> Option<u32> {
        if self.total_pages == 0 {
            return None;
        }
        let clamped = target.clamp(1, self.total_pages);
        (clamped != self.current_page).then_some(clamped)
    }
}
