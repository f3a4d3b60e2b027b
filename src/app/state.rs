//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin. It composes the three stores ([`FilterState`], [`TableState`]
//! and [`SharedStatus`]) into one coordination facade: dispatching tagged
//! fetches with loading/error bracketing, deriving pagination values, and
//! computing the renderable view model.
//!
//! # Coordination Contract
//!
//! - [`AppState::start_fetch`] brackets a fetch: loading on, error cleared,
//!   a fresh tag recorded as the in-flight request.
//! - [`AppState::finish_fetch`] accepts only the in-flight tag. Stale
//!   completions (an older request resolving after a newer dispatch) are
//!   ignored wholesale, so the latest request always wins. The loading flag
//!   transitions back to `false` on every owned completion, success or
//!   failure; a failure records the normalized message and leaves the
//!   table snapshot untouched.
//! - [`AppState::pagination_info`] is derived state, recomputed from the
//!   filter and table stores on every call and never cached.
//!
//! Filter mutators are *not* wrapped here: they stay on [`FilterState`] and
//! never trigger a fetch. The event handler decides when a mutation
//! warrants one.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::api::{self, ApiRequest, ApiSettings, KeysPage};
use crate::domain::{ApiError, PaginationInfo, TranslationKey};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayRow, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, StatusLine, UIViewModel,
};

use super::filters::FilterState;
use super::modes::{InputMode, SearchFocus};
use super::status::SharedStatus;
use super::table::TableState;

/// Central application state container.
///
/// Holds the three stores, the input-mode machine, the row selection and
/// the in-flight request bookkeeping. Mutated by the event handler in
/// response to user input and host events; view models are computed
/// on-demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection settings resolved at startup.
    pub api: ApiSettings,

    /// Search, date range and pagination cursor.
    pub filters: FilterState,

    /// Last successfully fetched page.
    pub table: TableState,

    /// Loading flag and last error message.
    pub status: SharedStatus,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Text being edited in the active input mode.
    ///
    /// Holds the pending search query, date-range expression or page-jump
    /// digits; committed into `filters` on enter, discarded on escape.
    pub pending_input: String,

    /// Zero-based index of the selected row within the current page.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Tag allocated to the most recent dispatch; `None` when idle.
    in_flight: Option<u64>,

    /// Monotonic source of request tags.
    next_tag: u64,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// The table starts empty; the first page is populated by the initial
    /// fetch the shim dispatches once permissions are granted.
    #[must_use]
    pub fn new(api: ApiSettings, initial_page_size: u32, theme: Theme) -> Self {
        Self {
            api,
            filters: FilterState::with_page_size(initial_page_size),
            table: TableState::default(),
            status: SharedStatus::default(),
            input_mode: InputMode::Normal,
            pending_input: String::new(),
            selected_index: 0,
            theme,
            in_flight: None,
            next_tag: 0,
        }
    }

    /// Tag of the request currently in flight, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Brackets and describes a fetch for the current filters.
    ///
    /// Sets the loading flag, clears the previous error, allocates the next
    /// request tag and records it as in flight. Returns the fully built
    /// request for the shim to execute. An older request still in flight is
    /// simply superseded: its completion will arrive with a stale tag and
    /// be ignored.
    pub fn start_fetch(&mut self) -> ApiRequest {
        self.next_tag += 1;
        let tag = self.next_tag;

        if let Some(previous) = self.in_flight.replace(tag) {
            tracing::debug!(superseded_tag = previous, tag = tag, "superseding in-flight fetch");
        }

        self.status.set_loading(true);
        self.status.clear_error();

        let query = api::build_query(&self.filters.to_query_params());
        let request = api::build_request(&self.api, &query, tag);

        tracing::debug!(tag = tag, url = %request.url, "fetch dispatched");
        request
    }

    /// Completes the fetch carrying `tag`.
    ///
    /// Returns `false` when the tag is stale (a newer fetch owns the state);
    /// nothing is touched in that case. Otherwise the loading flag is
    /// cleared unconditionally; a success replaces the snapshot atomically
    /// and re-anchors the row selection, a failure records the error
    /// message and leaves the snapshot as it was.
    pub fn finish_fetch(&mut self, tag: u64, outcome: Result<KeysPage, ApiError>) -> bool {
        if self.in_flight != Some(tag) {
            tracing::debug!(tag = tag, in_flight = ?self.in_flight, "ignoring stale fetch completion");
            return false;
        }
        self.in_flight = None;
        self.status.set_loading(false);

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    tag = tag,
                    row_count = page.rows.len(),
                    total_count = page.total_count,
                    "fetch completed"
                );
                let selected_key = self.selected_key().map(|record| record.key.clone());
                self.table.apply(page);
                self.restore_selection(selected_key.as_deref());
            }
            Err(error) => {
                tracing::debug!(tag = tag, error = %error, "fetch failed");
                self.status.set_error(error.message());
            }
        }
        true
    }

    /// Expires the fetch carrying `tag` after its deadline elapsed.
    ///
    /// Stale deadlines (the tag is no longer in flight because a response
    /// or a newer dispatch got there first) are no-ops. Returns whether the
    /// timeout was applied.
    pub fn fetch_deadline(&mut self, tag: u64) -> bool {
        if self.in_flight != Some(tag) {
            tracing::debug!(tag = tag, "ignoring stale fetch deadline");
            return false;
        }
        let timeout_ms = self.api.timeout_ms;
        tracing::debug!(tag = tag, timeout_ms = timeout_ms, "fetch timed out");
        self.finish_fetch(tag, Err(ApiError::Timeout { timeout_ms }))
    }

    /// Derives the pagination view from the current filter and table state.
    ///
    /// Recomputed on every call; consumers must treat the result as
    /// read-only and always current.
    #[must_use]
    pub fn pagination_info(&self) -> PaginationInfo {
        PaginationInfo::compute(
            self.filters.page,
            self.filters.page_size,
            self.table.total_count,
        )
    }

    /// Moves the row selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.table.rows.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.table.rows.len();
    }

    /// Moves the row selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.table.rows.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.table.rows.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns the currently selected record, if any.
    #[must_use]
    pub fn selected_key(&self) -> Option<&TranslationKey> {
        self.table.rows.get(self.selected_index)
    }

    /// Re-anchors the selection after a snapshot replacement.
    ///
    /// Prefers the row with the previously selected key (the key is the
    /// stable row identity); falls back to clamping the index into the new
    /// bounds.
    fn restore_selection(&mut self, previous_key: Option<&str>) {
        if self.table.rows.is_empty() {
            self.selected_index = 0;
            return;
        }

        if let Some(key) = previous_key {
            if let Some(position) = self.table.rows.iter().position(|row| row.key == key) {
                self.selected_index = position;
                return;
            }
        }

        self.selected_index = self.selected_index.min(self.table.rows.len() - 1);
    }

    /// Computes a renderable view model from current state and terminal
    /// dimensions.
    ///
    /// Handles windowing (a selection-centered slice of the page when the
    /// terminal is shorter than the page), search-match highlighting, and
    /// the header/status/footer/input-bar content for the active mode.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let pagination = self.pagination_info();

        let available_rows = self.calculate_available_rows(rows);
        let total_rows = self.table.rows.len();

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total_rows);
        let actual_count = visible_end.saturating_sub(visible_start);
        if actual_count < available_rows && total_rows >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = if self.filters.search_value.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let display_rows: Vec<DisplayRow> = self.table.rows[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, record)| {
                let absolute_idx = visible_start + relative_idx;
                self.compute_display_row(record, absolute_idx, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            status: self.compute_status(),
            filter_summary: self.compute_filter_summary(),
            input_bar: self.compute_input_bar(),
            rows: display_rows,
            selected_index: self.selected_index.saturating_sub(visible_start),
            is_loading: self.status.is_loading,
            empty_state: self.compute_empty_state(),
            pagination,
            footer: self.compute_footer(),
        }
    }

    /// Computes one display row, including match-highlight ranges.
    fn compute_display_row(
        &self,
        record: &TranslationKey,
        absolute_idx: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayRow {
        let key = if record.key.len() > 35 {
            format!("{}...", &record.key[..32])
        } else {
            record.key.clone()
        };

        let key_highlights =
            matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(&record.key, m));

        DisplayRow {
            key,
            key_highlights,
            translation: crate::ui::helpers::translation_preview(&record.translations),
            updated: record.updated_ago(),
            is_selected: absolute_idx == self.selected_index,
        }
    }

    /// Computes character ranges to highlight for the active search query.
    ///
    /// Consecutive matched indices are coalesced into `(start, end)` ranges
    /// (exclusive end) for efficient rendering.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.filters.search_value)
        else {
            return vec![];
        };

        let mut ranges = Vec::new();
        let mut start = None;
        let mut prev = None;

        for &idx in &indices {
            match (start, prev) {
                (None, _) => {
                    start = Some(idx);
                    prev = Some(idx);
                }
                (Some(_), Some(p)) if idx == p + 1 => {
                    prev = Some(idx);
                }
                (Some(s), Some(p)) => {
                    ranges.push((s, p + 1));
                    start = Some(idx);
                    prev = Some(idx);
                }
                _ => {}
            }
        }

        if let (Some(s), Some(p)) = (start, prev) {
            ranges.push((s, p + 1));
        }

        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Translation Keys ({}) ", self.table.total_count),
        }
    }

    /// Status precedence: loading beats a lingering error message.
    fn compute_status(&self) -> Option<StatusLine> {
        if self.status.is_loading {
            return Some(StatusLine::Loading);
        }
        self.status.error.clone().map(StatusLine::Error)
    }

    fn compute_filter_summary(&self) -> Option<String> {
        if !self.filters.has_active_filters() {
            return None;
        }

        let mut parts = Vec::new();
        if !self.filters.search_value.trim().is_empty() {
            parts.push(format!("search \"{}\"", self.filters.search_value));
        }
        match (
            self.filters.date_from.trim(),
            self.filters.date_to.trim(),
        ) {
            ("", "") => {}
            (from, "") => parts.push(format!("updated since {from}")),
            ("", to) => parts.push(format!("updated until {to}")),
            (from, to) => parts.push(format!("updated {from}..{to}")),
        }
        Some(parts.join("  ·  "))
    }

    fn compute_input_bar(&self) -> Option<InputBarInfo> {
        let label = match self.input_mode {
            InputMode::Search(_) => "Search",
            InputMode::DateRange => "Dates",
            InputMode::GoToPage => "Page",
            InputMode::Normal => return None,
        };
        let value = if self.input_mode == InputMode::Search(SearchFocus::Navigating) {
            self.filters.search_value.clone()
        } else {
            self.pending_input.clone()
        };
        Some(InputBarInfo {
            label: label.to_string(),
            value,
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.table.is_empty() {
            return None;
        }
        let subtitle = if self.filters.has_active_filters() {
            "Adjust filters or press 'c' to clear them".to_string()
        } else {
            "Press 'r' to refresh".to_string()
        };
        Some(EmptyState {
            message: "No translation keys found".to_string(),
            subtitle,
        })
    }

    /// Computes footer keybinding hints for the current mode.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                "j/k: rows  h/l: page  g: goto  /: search  d: dates  s: size  c: clear  r: refresh  q: quit"
                    .to_string()
            }
            InputMode::Search(SearchFocus::Typing) => {
                "Enter: apply  ESC: cancel  Type to edit query".to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: done  /: edit query  j/k: rows  h/l: page".to_string()
            }
            InputMode::DateRange => {
                "Enter: apply  ESC: cancel  Format: YYYY-MM-DD..YYYY-MM-DD (either side may be blank)"
                    .to_string()
            }
            InputMode::GoToPage => "Enter: jump  ESC: cancel  Digits only".to_string(),
        };
        FooterInfo { keybindings }
    }

    /// Calculates rows available for the table body after UI chrome.
    ///
    /// Chrome: blank line, header, status line, two borders, table header
    /// row, pagination bar and footer (8 rows), plus the 3-row input box
    /// when an input bar is shown.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(8),
            InputMode::Search(_) | InputMode::DateRange | InputMode::GoToPage => {
                total_rows.saturating_sub(11)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Translation;

    fn state() -> AppState {
        AppState::new(ApiSettings::default(), 10, Theme::default())
    }

    fn record(name: &str) -> TranslationKey {
        TranslationKey {
            key: name.to_string(),
            created_at: "2024-01-01T00:00:00".to_string(),
            updated_at: Some("2024-06-01T00:00:00".to_string()),
            translations: vec![Translation {
                value: "Value".to_string(),
                languages_code: "en-GB".to_string(),
            }],
        }
    }

    fn page(names: &[&str], total: u64) -> KeysPage {
        KeysPage {
            rows: names.iter().map(|n| record(n)).collect(),
            total_count: total,
        }
    }

    #[test]
    fn test_start_fetch_brackets_status() {
        let mut state = state();
        state.status.set_error("stale error");

        let request = state.start_fetch();

        assert!(state.status.is_loading);
        assert!(!state.status.has_error());
        assert_eq!(state.in_flight(), Some(request.tag));
    }

    #[test]
    fn test_finish_fetch_success_replaces_snapshot() {
        let mut state = state();
        let request = state.start_fetch();

        let applied = state.finish_fetch(request.tag, Ok(page(&["a", "b"], 2)));

        assert!(applied);
        assert!(!state.status.is_loading);
        assert_eq!(state.table.rows.len(), 2);
        assert_eq!(state.table.total_count, 2);

        let info = state.pagination_info();
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next);
    }

    #[test]
    fn test_finish_fetch_failure_keeps_snapshot_and_records_error() {
        let mut state = state();
        let seed = state.start_fetch();
        state.finish_fetch(seed.tag, Ok(page(&["a", "b"], 12)));

        let request = state.start_fetch();
        let applied = state.finish_fetch(
            request.tag,
            Err(ApiError::HttpStatus {
                message: "Service unavailable".to_string(),
                status: 503,
                code: None,
            }),
        );

        assert!(applied);
        assert!(!state.status.is_loading, "loading must clear on failure");
        assert_eq!(state.status.error.as_deref(), Some("Service unavailable"));
        assert_eq!(state.table.rows.len(), 2, "snapshot must survive failure");
        assert_eq!(state.table.total_count, 12);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = state();
        let first = state.start_fetch();
        let second = state.start_fetch();

        let applied = state.finish_fetch(first.tag, Ok(page(&["stale"], 1)));
        assert!(!applied);
        assert!(state.status.is_loading, "newer fetch still owns the state");
        assert!(state.table.is_empty());

        assert!(state.finish_fetch(second.tag, Ok(page(&["fresh"], 1))));
        assert_eq!(state.table.rows[0].key, "fresh");
    }

    #[test]
    fn test_deadline_times_out_current_fetch_only() {
        let mut state = state();
        let first = state.start_fetch();

        assert!(state.fetch_deadline(first.tag));
        assert!(!state.status.is_loading);
        assert!(state.status.error.as_deref().unwrap().contains("timed out"));

        // A stale deadline after a new dispatch must not touch anything.
        let second = state.start_fetch();
        assert!(!state.fetch_deadline(first.tag));
        assert!(state.status.is_loading);
        assert_eq!(state.in_flight(), Some(second.tag));
    }

    #[test]
    fn test_selection_restored_by_key_after_refresh() {
        let mut state = state();
        let seed = state.start_fetch();
        state.finish_fetch(seed.tag, Ok(page(&["a", "b", "c"], 3)));
        state.selected_index = 1;

        let refresh = state.start_fetch();
        state.finish_fetch(refresh.tag, Ok(page(&["x", "b", "y", "z"], 4)));

        assert_eq!(state.selected_key().unwrap().key, "b");
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_selection_clamped_when_key_disappears() {
        let mut state = state();
        let seed = state.start_fetch();
        state.finish_fetch(seed.tag, Ok(page(&["a", "b", "c"], 3)));
        state.selected_index = 2;

        let refresh = state.start_fetch();
        state.finish_fetch(refresh.tag, Ok(page(&["x", "y"], 2)));

        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = state();
        let seed = state.start_fetch();
        state.finish_fetch(seed.tag, Ok(page(&["a", "b"], 2)));

        state.move_selection_down();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_viewmodel_scenario_two_items() {
        let mut state = state();
        let request = state.start_fetch();
        state.finish_fetch(request.tag, Ok(page(&["a", "b"], 2)));

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.rows.len(), 2);
        assert!(vm.header.title.contains("(2)"));
        assert_eq!(vm.pagination.total_pages, 1);
        assert!(!vm.pagination.has_next);
        assert!(vm.empty_state.is_none());
        assert!(vm.status.is_none());
    }

    #[test]
    fn test_viewmodel_loading_beats_error() {
        let mut state = state();
        state.status.set_error("old error");
        state.status.set_loading(true);

        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.status, Some(StatusLine::Loading)));
    }

    #[test]
    fn test_viewmodel_empty_state_subtitle_tracks_filters() {
        let mut state = state();
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.empty_state.unwrap().subtitle.contains("refresh"));

        state.filters.update_search_value("nothing.matches");
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.empty_state.unwrap().subtitle.contains("clear"));
    }

    #[test]
    fn test_viewmodel_highlights_search_matches() {
        let mut state = state();
        state.filters.update_search_value("gen");
        let request = state.start_fetch();
        state.finish_fetch(request.tag, Ok(page(&["general.accept"], 1)));

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.rows[0].key_highlights, vec![(0, 3)]);
    }
}
