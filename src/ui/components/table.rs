//! Generic data-table component.
//!
//! [`DataTable`] is a presentational component generic over its row type:
//! callers describe columns (label, width, alignment, cell extractor) and a
//! row-key extractor, hand it data, and get header/body rendering with
//! exactly one of three body states (loading placeholder, empty-state
//! placeholder, or data rows) selected by priority loading > empty > data.
//!
//! Pagination comes in two modes. In [`PaginationMode::SelfManaged`] the
//! table derives its pagination view from its own row count and an internal
//! page cursor, slicing the visible rows itself. In
//! [`PaginationMode::External`] the caller supplies a ready
//! [`PaginationInfo`] (the server-side case: the data already is one page)
//! and the table renders it as-is. Both modes share the same formulas via
//! [`PaginationInfo::compute`], and navigation is a no-op at the
//! boundaries in both.

use crate::domain::PaginationInfo;
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One rendered cell: text plus optional highlight ranges.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Cell text.
    pub text: String,

    /// Character ranges to highlight, `(start, end)` exclusive end.
    pub highlights: Vec<(usize, usize)>,
}

impl Cell {
    /// Creates a plain cell without highlights.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlights: vec![],
        }
    }

    /// Creates a cell with highlight ranges.
    #[must_use]
    pub fn highlighted(text: impl Into<String>, highlights: Vec<(usize, usize)>) -> Self {
        Self {
            text: text.into(),
            highlights,
        }
    }
}

/// Column descriptor: header label, width, alignment and cell extractor.
///
/// `width` is the fixed display width in characters; `None` marks the
/// flexible column that absorbs the remaining terminal width (at most one
/// per table makes sense).
pub struct Column<R> {
    /// Header label.
    pub label: &'static str,

    /// Fixed width, or `None` for the flexible remainder column.
    pub width: Option<usize>,

    /// Horizontal alignment of cell text.
    pub align: Align,

    /// Extracts the cell for a row.
    pub cell: fn(&R) -> Cell,
}

/// Pagination behavior of a [`DataTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// The table owns the page cursor and slices its own data.
    SelfManaged {
        /// Current 1-based page.
        page: u32,
        /// Rows per page.
        page_size: u32,
    },

    /// The caller supplies the pagination view; data is already one page.
    External(PaginationInfo),
}

/// Body state of the table, selected by priority loading > empty > data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Empty,
    Data,
}

/// Generic table component.
pub struct DataTable<R> {
    columns: Vec<Column<R>>,
    data: Vec<R>,
    row_key: fn(&R) -> &str,
    loading: bool,
    empty_message: String,
    empty_subtitle: String,
    pagination: PaginationMode,
}

impl<R> DataTable<R> {
    /// Creates a table with the given columns and row-key extractor.
    ///
    /// Starts empty, not loading, with a generic empty message and
    /// self-managed pagination at page 1 / page size 10.
    #[must_use]
    pub fn new(columns: Vec<Column<R>>, row_key: fn(&R) -> &str) -> Self {
        Self {
            columns,
            data: vec![],
            row_key,
            loading: false,
            empty_message: "No data".to_string(),
            empty_subtitle: String::new(),
            pagination: PaginationMode::SelfManaged {
                page: 1,
                page_size: 10,
            },
        }
    }

    /// Sets the pagination mode.
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationMode) -> Self {
        self.pagination = pagination;
        self
    }

    /// Sets the empty-state message and subtitle.
    #[must_use]
    pub fn with_empty_message(
        mut self,
        message: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        self.empty_message = message.into();
        self.empty_subtitle = subtitle.into();
        self
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replaces the table data.
    ///
    /// In self-managed mode the page cursor is clamped into the new bounds
    /// so the table never points past the last page.
    pub fn set_data(&mut self, data: Vec<R>) {
        self.data = data;
        if let PaginationMode::SelfManaged { page, page_size } = self.pagination {
            let total_pages = self.pagination_view().total_pages;
            let clamped = page.min(total_pages.max(1));
            self.pagination = PaginationMode::SelfManaged {
                page: clamped,
                page_size,
            };
        }
    }

    /// Current table data.
    #[must_use]
    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Finds the index of the row with the given key.
    #[must_use]
    pub fn find_row(&self, key: &str) -> Option<usize> {
        self.data.iter().position(|row| (self.row_key)(row) == key)
    }

    /// The body state to render, priority loading > empty > data.
    #[must_use]
    pub fn body_state(&self) -> BodyState {
        if self.loading {
            BodyState::Loading
        } else if self.data.is_empty() {
            BodyState::Empty
        } else {
            BodyState::Data
        }
    }

    /// Derives the pagination view for the current mode.
    #[must_use]
    pub fn pagination_view(&self) -> PaginationInfo {
        match self.pagination {
            PaginationMode::SelfManaged { page, page_size } => {
                PaginationInfo::compute(page, page_size, self.data.len() as u64)
            }
            PaginationMode::External(info) => info,
        }
    }

    /// Rows visible on the current page.
    ///
    /// External mode returns all supplied rows (they already are one page);
    /// self-managed mode slices by the internal cursor.
    #[must_use]
    pub fn visible_rows(&self) -> &[R] {
        match self.pagination {
            PaginationMode::External(_) => &self.data,
            PaginationMode::SelfManaged { .. } => {
                let view = self.pagination_view();
                if view.total_items == 0 {
                    return &[];
                }
                let start = usize::try_from(view.start_index - 1).unwrap_or(0);
                let end = usize::try_from(view.end_index).unwrap_or(0);
                &self.data[start.min(self.data.len())..end.min(self.data.len())]
            }
        }
    }

    /// Moves to the next page; no-op past the last page.
    ///
    /// Returns the new page when navigation happened. In external mode the
    /// caller owns the cursor, so the target page is returned without any
    /// internal change.
    pub fn next_page(&mut self) -> Option<u32> {
        let view = self.pagination_view();
        if !view.has_next {
            return None;
        }
        self.apply_page(view.current_page + 1)
    }

    /// Moves to the previous page; no-op below page 1.
    pub fn previous_page(&mut self) -> Option<u32> {
        let view = self.pagination_view();
        if !view.has_previous {
            return None;
        }
        self.apply_page(view.current_page - 1)
    }

    /// Jumps to a page, clamped to the valid range; no-op when the clamp
    /// lands on the current page or there are no pages.
    pub fn jump_to_page(&mut self, target: u32) -> Option<u32> {
        let view = self.pagination_view();
        let page = view.clamp_jump(target)?;
        self.apply_page(page)
    }

    fn apply_page(&mut self, target: u32) -> Option<u32> {
        if let PaginationMode::SelfManaged { page_size, .. } = self.pagination {
            self.pagination = PaginationMode::SelfManaged {
                page: target,
                page_size,
            };
        }
        Some(target)
    }

    /// Renders header and body starting at `start_row`.
    ///
    /// `selected` is the index of the selected row within the visible rows;
    /// it only affects styling. Returns the next available row.
    pub fn render(
        &self,
        start_row: usize,
        theme: &Theme,
        cols: usize,
        selected: Option<usize>,
    ) -> usize {
        let widths = self.resolve_widths(cols);
        let mut current_row = self.render_header_row(start_row, theme, &widths);

        match self.body_state() {
            BodyState::Loading => self.render_loading(current_row, theme, cols),
            BodyState::Empty => self.render_empty(current_row, theme, cols),
            BodyState::Data => {
                for (idx, row) in self.visible_rows().iter().enumerate() {
                    current_row = self.render_data_row(
                        current_row,
                        row,
                        theme,
                        cols,
                        &widths,
                        selected == Some(idx),
                    );
                }
                current_row
            }
        }
    }

    /// Resolves per-column display widths for the terminal width.
    ///
    /// Fixed columns keep their width; the flexible column absorbs what
    /// remains after fixed widths and single-space gaps.
    fn resolve_widths(&self, cols: usize) -> Vec<usize> {
        let gaps = self.columns.len().saturating_sub(1);
        let fixed: usize = self.columns.iter().filter_map(|c| c.width).sum();
        let flexible = cols.saturating_sub(fixed + gaps);

        self.columns
            .iter()
            .map(|c| c.width.unwrap_or(flexible))
            .collect()
    }

    fn render_header_row(&self, row: usize, theme: &Theme, widths: &[usize]) -> usize {
        position_cursor(row, 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        for (idx, (column, width)) in self.columns.iter().zip(widths).enumerate() {
            if idx > 0 {
                print!(" ");
            }
            print!("{}", pad(column.label, *width, column.align));
        }
        print!("{}", Theme::reset());
        row + 1
    }

    fn render_loading(&self, row: usize, theme: &Theme, cols: usize) -> usize {
        let message = "Loading translation keys...";
        let padding = cols.saturating_sub(message.len()) / 2;

        position_cursor(row + 1, 1);
        print!("{}", Theme::fg(&theme.colors.loading_fg));
        print!("{}{message}", " ".repeat(padding));
        print!("{}", Theme::reset());
        row + 2
    }

    fn render_empty(&self, row: usize, theme: &Theme, cols: usize) -> usize {
        let msg_padding = cols.saturating_sub(self.empty_message.len()) / 2;
        position_cursor(row + 1, 1);
        print!("{}", Theme::fg(&theme.colors.empty_state_fg));
        print!("{}{}", " ".repeat(msg_padding), self.empty_message);
        print!("{}", Theme::reset());

        let sub_padding = cols.saturating_sub(self.empty_subtitle.len()) / 2;
        position_cursor(row + 2, 1);
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}{}", " ".repeat(sub_padding), self.empty_subtitle);
        print!("{}", Theme::reset());
        row + 3
    }

    fn render_data_row(
        &self,
        row: usize,
        item: &R,
        theme: &Theme,
        cols: usize,
        widths: &[usize],
        is_selected: bool,
    ) -> usize {
        position_cursor(row, 1);

        if is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        let mut line_len = 0;
        for (idx, (column, width)) in self.columns.iter().zip(widths).enumerate() {
            if idx > 0 {
                print!(" ");
                line_len += 1;
            }

            let cell = (column.cell)(item);
            let visible = truncate(&cell.text, *width);
            let visible_len = visible.chars().count();

            if column.align == Align::Right {
                print!("{}", " ".repeat(width.saturating_sub(visible_len)));
            }

            if cell.highlights.is_empty() {
                print!("{visible}");
            } else {
                helpers::render_highlighted_text(&visible, &cell.highlights, theme, is_selected);
                if is_selected {
                    print!("{}", Theme::fg(&theme.colors.selection_fg));
                    print!("{}", Theme::bg(&theme.colors.selection_bg));
                }
            }

            if column.align == Align::Left {
                print!("{}", " ".repeat(width.saturating_sub(visible_len)));
            }
            line_len += *width;
        }

        // Pad to the full terminal width so selection backgrounds are solid.
        print!("{}", " ".repeat(cols.saturating_sub(line_len)));
        print!("{}", Theme::reset());
        row + 1
    }
}

/// Pads (or truncates) text into a fixed width with the given alignment.
fn pad(text: &str, width: usize, align: Align) -> String {
    let truncated = truncate(text, width);
    let len = truncated.chars().count();
    let padding = " ".repeat(width.saturating_sub(len));
    match align {
        Align::Left => format!("{truncated}{padding}"),
        Align::Right => format!("{padding}{truncated}"),
    }
}

/// Truncates text to a character width, appending `...` when shortened.
fn truncate(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return chars[..width].iter().collect();
    }
    let mut shortened: String = chars[..width - 3].iter().collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Item {
        id: String,
        label: String,
    }

    fn item(id: &str, label: &str) -> Item {
        Item {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column {
                label: "ID",
                width: Some(10),
                align: Align::Left,
                cell: |item| Cell::plain(item.id.clone()),
            },
            Column {
                label: "LABEL",
                width: None,
                align: Align::Left,
                cell: |item| Cell::plain(item.label.clone()),
            },
        ]
    }

    fn table_with(count: usize, page_size: u32) -> DataTable<Item> {
        let mut table = DataTable::new(columns(), |item: &Item| item.id.as_str()).with_pagination(
            PaginationMode::SelfManaged {
                page: 1,
                page_size,
            },
        );
        table.set_data(
            (0..count)
                .map(|i| item(&format!("id-{i}"), &format!("label {i}")))
                .collect(),
        );
        table
    }

    #[test]
    fn test_body_state_priority() {
        let mut table = table_with(0, 10);
        assert_eq!(table.body_state(), BodyState::Empty);

        table.set_loading(true);
        assert_eq!(table.body_state(), BodyState::Loading, "loading beats empty");

        table.set_loading(false);
        table.set_data(vec![item("a", "A")]);
        assert_eq!(table.body_state(), BodyState::Data);

        table.set_loading(true);
        assert_eq!(table.body_state(), BodyState::Loading, "loading beats data");
    }

    #[test]
    fn test_self_managed_pagination_view() {
        let table = table_with(23, 10);
        let view = table.pagination_view();
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.total_items, 23);
        assert_eq!(table.visible_rows().len(), 10);
    }

    #[test]
    fn test_self_managed_last_page_slice() {
        let mut table = table_with(23, 10);
        table.jump_to_page(3);

        let visible = table.visible_rows();
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].id, "id-20");

        let view = table.pagination_view();
        assert_eq!(view.start_index, 21);
        assert_eq!(view.end_index, 23);
    }

    #[test]
    fn test_navigation_noop_at_boundaries() {
        let mut table = table_with(23, 10);

        assert_eq!(table.previous_page(), None, "already on first page");
        assert_eq!(table.next_page(), Some(2));
        assert_eq!(table.next_page(), Some(3));
        assert_eq!(table.next_page(), None, "already on last page");
        assert_eq!(table.pagination_view().current_page, 3);
    }

    #[test]
    fn test_jump_clamps_into_range() {
        let mut table = table_with(23, 10);
        assert_eq!(table.jump_to_page(99), Some(3));
        assert_eq!(table.jump_to_page(0), Some(1));
        assert_eq!(table.jump_to_page(1), None, "no-op on current page");
    }

    #[test]
    fn test_set_data_clamps_internal_page() {
        let mut table = table_with(23, 10);
        table.jump_to_page(3);

        table.set_data(vec![item("only", "row")]);
        assert_eq!(table.pagination_view().current_page, 1);
        assert_eq!(table.visible_rows().len(), 1);
    }

    #[test]
    fn test_external_mode_passthrough() {
        let info = PaginationInfo::compute(3, 10, 23);
        let mut table = DataTable::new(columns(), |item: &Item| item.id.as_str())
            .with_pagination(PaginationMode::External(info));
        table.set_data(vec![item("a", "A"), item("b", "B"), item("c", "C")]);

        assert_eq!(table.pagination_view(), info);
        assert_eq!(table.visible_rows().len(), 3, "external data is the page");

        // External navigation reports the target but mutates nothing.
        assert_eq!(table.next_page(), None, "page 3 of 3 has no next");
        assert_eq!(table.previous_page(), Some(2));
        assert_eq!(table.pagination_view().current_page, 3);
    }

    #[test]
    fn test_find_row_by_key() {
        let table = table_with(5, 10);
        assert_eq!(table.find_row("id-3"), Some(3));
        assert_eq!(table.find_row("missing"), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        assert_eq!(truncate("far too long for this", 10), "far too...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_pad_alignment() {
        assert_eq!(pad("ab", 4, Align::Left), "ab  ");
        assert_eq!(pad("ab", 4, Align::Right), "  ab");
    }
}
