//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application
//! state, following the MVVM pattern. View models are optimized for
//! rendering and contain pre-computed display information like highlight
//! ranges and selection state; they carry no business logic.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed
//! by the renderer.

use crate::domain::PaginationInfo;

/// Complete UI view model for rendering.
///
/// Contains all display information needed to render the plugin UI: the
/// visible window of table rows, header/footer content, the status line,
/// optional input bar, and the derived pagination values.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title with the filtered total).
    pub header: HeaderInfo,

    /// Loading indicator or last error, when either applies.
    pub status: Option<StatusLine>,

    /// Summary of the active filters, when any are set.
    pub filter_summary: Option<String>,

    /// Input bar content for the active input mode.
    pub input_bar: Option<InputBarInfo>,

    /// Visible window of table rows.
    pub rows: Vec<DisplayRow>,

    /// Index of the selected row within the visible window.
    pub selected_index: usize,

    /// Whether a fetch is in flight (drives the table's loading body).
    pub is_loading: bool,

    /// Empty-state content when the current page has no rows.
    pub empty_state: Option<EmptyState>,

    /// Derived pagination values for the pagination bar and table.
    pub pagination: PaginationInfo,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,
}

/// Display information for a single translation-key row.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    /// Record key, truncated for display.
    pub key: String,

    /// Character ranges of the key to highlight (search matches).
    ///
    /// Each tuple is `(start, end)` in character indices, exclusive end.
    pub key_highlights: Vec<(usize, usize)>,

    /// Preview of the record's translations (flag emoji + first value).
    pub translation: String,

    /// Relative "Nd ago" label for the last update.
    pub updated: String,

    /// Whether this row is currently selected.
    pub is_selected: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the active mode.
    pub keybindings: String,
}

/// Loading/error line shown under the header.
///
/// Loading takes precedence over a lingering error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// A fetch is in flight.
    Loading,

    /// The last fetch failed with this message.
    Error(String),
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No translation keys found").
    pub message: String,

    /// Secondary explanatory text (e.g., "Press 'r' to refresh").
    pub subtitle: String,
}

/// Input bar display information for the active input mode.
#[derive(Debug, Clone)]
pub struct InputBarInfo {
    /// Prompt label ("Search", "Dates", "Page").
    pub label: String,

    /// Current pending input text.
    pub value: String,
}
