//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture, plus the two
//! high-level layout functions the renderer dispatches to:
//!
//! - [`render_normal_mode`]: header + status + table + pagination + footer
//! - [`render_input_mode`]: the same with the 3-line input box inserted
//!
//! # Components
//!
//! - [`header`]: title bar with the filtered total
//! - [`footer`]: keybinding hints for the active mode
//! - [`input`]: bordered input box (search, dates, page jump)
//! - [`pagination`]: item range / page cursor bar
//! - [`status`]: loading/error/filter-summary line
//! - [`table`]: the generic data table

pub mod footer;
pub mod header;
pub mod input;
pub mod pagination;
pub mod status;
pub mod table;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayRow, InputBarInfo, UIViewModel};

use footer::render_footer;
use header::render_header;
use input::render_input_bar;
use pagination::render_pagination_bar;
use status::render_status_line;
use table::{Align, Cell, Column, DataTable, PaginationMode};

/// Fixed display width of the KEY column.
const KEY_COLUMN_WIDTH: usize = 37;

/// Fixed display width of the UPDATED column.
const UPDATED_COLUMN_WIDTH: usize = 12;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/table, table/footer). Returns the
/// next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    super::helpers::position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Builds the translation-keys table for a view model.
///
/// Pagination is external: the rows the view model carries already are the
/// server-side page, and the pagination view comes from the coordination
/// layer.
fn build_table(vm: &UIViewModel) -> DataTable<DisplayRow> {
    let columns = vec![
        Column {
            label: "KEY",
            width: Some(KEY_COLUMN_WIDTH),
            align: Align::Left,
            cell: |row: &DisplayRow| Cell::highlighted(row.key.clone(), row.key_highlights.clone()),
        },
        Column {
            label: "TRANSLATIONS",
            width: None,
            align: Align::Left,
            cell: |row: &DisplayRow| Cell::plain(row.translation.clone()),
        },
        Column {
            label: "UPDATED",
            width: Some(UPDATED_COLUMN_WIDTH),
            align: Align::Right,
            cell: |row: &DisplayRow| Cell::plain(row.updated.clone()),
        },
    ];

    let mut table = DataTable::new(columns, |row: &DisplayRow| row.key.as_str())
        .with_pagination(PaginationMode::External(vm.pagination));

    if let Some(empty) = &vm.empty_state {
        table = table.with_empty_message(empty.message.clone(), empty.subtitle.clone());
    }

    table.set_loading(vm.is_loading);
    table.set_data(vm.rows.clone());
    table
}

/// Renders the bottom chrome: border, pagination bar and footer.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows;
    let pagination_row = rows.saturating_sub(1);
    let border_row = rows.saturating_sub(2);

    render_border(border_row, &theme.colors.border, cols);
    render_pagination_bar(pagination_row, &vm.pagination, theme, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Renders the normal mode layout (no input box).
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Status / filter summary]
/// [Border]
/// [Table headers + body]
/// [Blank padding]
/// [Border]
/// [Pagination bar]
/// [Footer]
/// ```
pub fn render_normal_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_status_line(
        current_row,
        vm.status.as_ref(),
        vm.filter_summary.as_deref(),
        theme,
        cols,
    );
    current_row = render_border(current_row, &theme.colors.border, cols);

    let table = build_table(vm);
    let selected = (!vm.rows.is_empty()).then_some(vm.selected_index);
    table.render(current_row, theme, cols, selected);

    render_bottom(vm, theme, cols, rows);
}

/// Renders an input mode layout (search, date range or page jump).
///
/// Identical to normal mode with the 3-line input box between the border
/// and the table.
pub fn render_input_mode(
    vm: &UIViewModel,
    input_bar: &InputBarInfo,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_status_line(
        current_row,
        vm.status.as_ref(),
        vm.filter_summary.as_deref(),
        theme,
        cols,
    );
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_input_bar(current_row, input_bar, theme, cols);

    let table = build_table(vm);
    let selected = (!vm.rows.is_empty()).then_some(vm.selected_index);
    table.render(current_row, theme, cols, selected);

    render_bottom(vm, theme, cols, rows);
}
