//! Status line component renderer.
//!
//! Renders the line under the header that surfaces the shared status store:
//! a loading indicator while a fetch is in flight, the last error message
//! after a failure, or the active-filter summary when the store is quiet.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status line at the specified row.
///
/// Precedence: status (loading or error) over the filter summary over a
/// blank line. Returns the next available row.
pub fn render_status_line(
    row: usize,
    status: Option<&StatusLine>,
    filter_summary: Option<&str>,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);

    match status {
        Some(StatusLine::Loading) => {
            let text = " Loading...";
            print!("{}", Theme::fg(&theme.colors.loading_fg));
            print!("{text}");
            print!("{}", " ".repeat(cols.saturating_sub(text.len())));
        }
        Some(StatusLine::Error(message)) => {
            let text = format!(" ✗ {message}");
            let text_len = text.chars().count().min(cols);
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print!("{text}");
            print!("{}", " ".repeat(cols.saturating_sub(text_len)));
        }
        None => {
            if let Some(summary) = filter_summary {
                let text = format!(" {summary}");
                let text_len = text.chars().count().min(cols);
                print!("{}", Theme::dim());
                print!("{}", Theme::fg(&theme.colors.text_dim));
                print!("{text}");
                print!("{}", " ".repeat(cols.saturating_sub(text_len)));
            } else {
                print!("{}", " ".repeat(cols));
            }
        }
    }

    print!("{}", Theme::reset());
    row + 1
}
