//! Pagination bar component renderer.
//!
//! Renders the centered pagination summary under the table: the visible
//! item range, the filtered total, the page cursor, and boundary-aware
//! previous/next arrows.

use crate::domain::PaginationInfo;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders the pagination bar at the specified row.
///
/// Arrows are drawn dimmed when the corresponding direction is unavailable,
/// so the bar doubles as a boundary indicator. Returns the next available
/// row.
pub fn render_pagination_bar(
    row: usize,
    info: &PaginationInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let summary = summary_text(info);
    // Arrows plus two spaces on each side of the summary.
    let text_len = summary.len() + 6;
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));

    render_arrow(theme, "‹ ", info.has_previous);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!(" {summary} ");
    render_arrow(theme, " ›", info.has_next);

    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

fn render_arrow(theme: &Theme, arrow: &str, active: bool) {
    if active {
        print!("{}", Theme::fg(&theme.colors.header_fg));
    } else {
        print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    }
    print!("{arrow}");
    print!("{}", Theme::reset());
}

/// Builds the `start-end of total · page x/y` summary.
fn summary_text(info: &PaginationInfo) -> String {
    if info.total_items == 0 {
        return "0 of 0".to_string();
    }
    format!(
        "{}-{} of {}  ·  page {}/{}",
        info.start_index, info.end_index, info.total_items, info.current_page, info.total_pages
    )
}
