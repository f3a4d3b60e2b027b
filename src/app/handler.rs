//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input
//! and host events (fetch completions, deadlines), translating them into
//! state changes and action sequences. It is also where the fetch policy
//! lives: store mutators never fetch by themselves, so this handler decides
//! which interactions dispatch a request: committing a search or date
//! range, changing the page or page size, clearing filters, and explicit
//! refreshes.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin shim (keyboard, web results, timers)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and store methods
//! 4. Actions are collected and returned for execution

use chrono::NaiveDate;

use crate::api;
use crate::domain::error::Result;

use super::actions::Action;
use super::modes::{InputMode, SearchFocus};
use super::state::AppState;

/// Events triggered by user input or host responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the row selection down by one (wraps to top).
    MoveDown,
    /// Moves the row selection up by one (wraps to bottom).
    MoveUp,
    /// Advances to the next page, if one exists.
    NextPage,
    /// Returns to the previous page, if one exists.
    PreviousPage,
    /// Enters search mode with typing focus.
    EnterSearch,
    /// Refocuses the search input field (from navigating focus).
    FocusSearchBar,
    /// Enters date-range editing mode.
    EnterDateRange,
    /// Enters page-jump mode.
    EnterGoToPage,
    /// Cycles the page size to the next step (resets to page 1).
    CyclePageSize,
    /// Resets all filters to their defaults.
    ClearFilters,
    /// Refetches the current page with the current filters.
    Refresh,
    /// Commits the pending input of the active mode (Enter).
    Commit,
    /// Abandons the pending input / leaves the active mode (Escape).
    Escape,
    /// Appends a character to the pending input.
    Char(char),
    /// Removes the last character from the pending input.
    Backspace,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// A host web request finished with a response.
    ///
    /// Carries the tag from the dispatch context, the HTTP status (0 when
    /// the host produced no response) and the raw body bytes.
    FetchCompleted {
        /// Tag pairing this result with its dispatch.
        tag: u64,
        /// HTTP status of the response.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// The deadline timer armed for a dispatch fired.
    FetchDeadline {
        /// Tag of the dispatch the timer belongs to.
        tag: u64,
    },
}

/// Processes an event, mutates application state, and returns actions.
///
/// Returns `(should_render, actions)`: whether the UI needs a repaint, and
/// the side effects the shim must execute.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for
/// handlers that grow fallible state transitions.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span =
        tracing::debug_span!("handle_event", event_type = %discriminant_name(event)).entered();

    match event {
        Event::MoveDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage => {
            let info = state.pagination_info();
            if !info.has_next {
                tracing::debug!("already on the last page");
                return Ok((false, vec![]));
            }
            state.filters.update_page(info.current_page + 1);
            Ok((true, dispatch_fetch(state)))
        }
        Event::PreviousPage => {
            let info = state.pagination_info();
            if !info.has_previous {
                tracing::debug!("already on the first page");
                return Ok((false, vec![]));
            }
            state.filters.update_page(info.current_page - 1);
            Ok((true, dispatch_fetch(state)))
        }
        Event::EnterSearch | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.pending_input = state.filters.search_value.clone();
            Ok((true, vec![]))
        }
        Event::EnterDateRange => {
            state.input_mode = InputMode::DateRange;
            state.pending_input = if state.filters.date_from.is_empty()
                && state.filters.date_to.is_empty()
            {
                String::new()
            } else {
                format!("{}..{}", state.filters.date_from, state.filters.date_to)
            };
            Ok((true, vec![]))
        }
        Event::EnterGoToPage => {
            state.input_mode = InputMode::GoToPage;
            state.pending_input = String::new();
            Ok((true, vec![]))
        }
        Event::CyclePageSize => {
            let next = state.filters.next_page_size();
            tracing::debug!(page_size = next, "cycling page size");
            state.filters.update_page_size(next);
            Ok((true, dispatch_fetch(state)))
        }
        Event::ClearFilters => {
            state.filters.clear_filters();
            Ok((true, dispatch_fetch(state)))
        }
        Event::Refresh => Ok((true, dispatch_fetch(state))),
        Event::Commit => commit_pending(state),
        Event::Escape => {
            if state.input_mode == InputMode::Normal {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Normal;
            state.pending_input = String::new();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            match state.input_mode {
                InputMode::Search(SearchFocus::Typing) | InputMode::DateRange => {
                    state.pending_input.push(*c);
                }
                InputMode::GoToPage => {
                    if c.is_ascii_digit() {
                        state.pending_input.push(*c);
                    } else {
                        return Ok((false, vec![]));
                    }
                }
                InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => {
                    return Ok((false, vec![]));
                }
            }
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_editing() {
                return Ok((false, vec![]));
            }
            state.pending_input.pop();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::FetchCompleted { tag, status, body } => {
            let outcome = api::classify(*status, body);
            Ok((state.finish_fetch(*tag, outcome), vec![]))
        }
        Event::FetchDeadline { tag } => Ok((state.fetch_deadline(*tag), vec![])),
    }
}

/// Dispatches a fetch for the current filters.
fn dispatch_fetch(state: &mut AppState) -> Vec<Action> {
    vec![Action::StartFetch(state.start_fetch())]
}

/// Commits the pending input of the active mode.
fn commit_pending(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.input_mode {
        InputMode::Search(SearchFocus::Typing) => {
            let query = state.pending_input.clone();
            tracing::debug!(query = %query, "committing search");
            state.filters.update_search_value(query);
            state.filters.update_page(1);
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, dispatch_fetch(state)))
        }
        InputMode::Search(SearchFocus::Navigating) => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        InputMode::DateRange => match parse_date_range(&state.pending_input) {
            Ok((from, to)) => {
                tracing::debug!(date_from = %from, date_to = %to, "committing date range");
                state.filters.update_date_range(from, to);
                state.filters.update_page(1);
                state.input_mode = InputMode::Normal;
                state.pending_input = String::new();
                Ok((true, dispatch_fetch(state)))
            }
            Err(message) => {
                tracing::debug!(input = %state.pending_input, "rejecting date range input");
                state.status.set_error(message);
                Ok((true, vec![]))
            }
        },
        InputMode::GoToPage => {
            let input = state.pending_input.clone();
            state.input_mode = InputMode::Normal;
            state.pending_input = String::new();

            let Ok(target) = input.parse::<u32>() else {
                return Ok((true, vec![]));
            };
            match state.pagination_info().clamp_jump(target) {
                Some(page) => {
                    tracing::debug!(page = page, "jumping to page");
                    state.filters.update_page(page);
                    Ok((true, dispatch_fetch(state)))
                }
                None => Ok((true, vec![])),
            }
        }
        InputMode::Normal => Ok((false, vec![])),
    }
}

/// Parses a `FROM..TO` date-range expression.
///
/// Either side may be blank; non-blank sides must be `YYYY-MM-DD` dates. A
/// fully blank input clears both bounds.
fn parse_date_range(input: &str) -> std::result::Result<(String, String), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok((String::new(), String::new()));
    }

    let Some((from, to)) = trimmed.split_once("..") else {
        return Err("expected FROM..TO, e.g. 2024-01-01..2024-06-30".to_string());
    };

    let from = from.trim();
    let to = to.trim();
    for side in [from, to] {
        if !side.is_empty() && NaiveDate::parse_from_str(side, "%Y-%m-%d").is_err() {
            return Err(format!("invalid date '{side}', expected YYYY-MM-DD"));
        }
    }

    Ok((from.to_string(), to.to_string()))
}

/// Short name of an event variant for tracing spans.
const fn discriminant_name(event: &Event) -> &'static str {
    match event {
        Event::MoveDown => "MoveDown",
        Event::MoveUp => "MoveUp",
        Event::NextPage => "NextPage",
        Event::PreviousPage => "PreviousPage",
        Event::EnterSearch => "EnterSearch",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::EnterDateRange => "EnterDateRange",
        Event::EnterGoToPage => "EnterGoToPage",
        Event::CyclePageSize => "CyclePageSize",
        Event::ClearFilters => "ClearFilters",
        Event::Refresh => "Refresh",
        Event::Commit => "Commit",
        Event::Escape => "Escape",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::CloseFocus => "CloseFocus",
        Event::FetchCompleted { .. } => "FetchCompleted",
        Event::FetchDeadline { .. } => "FetchDeadline",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiSettings;
    use crate::ui::theme::Theme;

    fn state_with_total(total: u64) -> AppState {
        let mut state = AppState::new(ApiSettings::default(), 10, Theme::default());
        state.table.set_total_count(total);
        state
    }

    fn success_body(keys: &[&str], filter_count: u64) -> Vec<u8> {
        let rows: Vec<String> = keys
            .iter()
            .map(|k| {
                format!(
                    r#"{{ "key": "{k}", "createdAt": "2024-01-01T00:00:00", "updatedAt": null, "translations": [] }}"#
                )
            })
            .collect();
        format!(
            r#"{{ "data": [{}], "meta": {{ "filter_count": {filter_count} }} }}"#,
            rows.join(",")
        )
        .into_bytes()
    }

    #[test]
    fn test_next_page_noop_at_last_page() {
        let mut state = state_with_total(25);
        state.filters.update_page(3);

        let (rendered, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!rendered);
        assert!(actions.is_empty());
        assert_eq!(state.filters.page, 3);
    }

    #[test]
    fn test_next_page_advances_and_fetches() {
        let mut state = state_with_total(25);

        let (rendered, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(rendered);
        assert_eq!(state.filters.page, 2);
        assert!(matches!(actions.as_slice(), [Action::StartFetch(_)]));
    }

    #[test]
    fn test_previous_page_noop_at_first_page() {
        let mut state = state_with_total(25);
        let (rendered, actions) = handle_event(&mut state, &Event::PreviousPage).unwrap();
        assert!(!rendered);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_cycle_page_size_resets_page() {
        let mut state = state_with_total(100);
        state.filters.update_page(4);

        let (_, actions) = handle_event(&mut state, &Event::CyclePageSize).unwrap();
        assert_eq!(state.filters.page_size, 25);
        assert_eq!(state.filters.page, 1);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_search_commit_applies_query_and_fetches() {
        let mut state = state_with_total(0);
        handle_event(&mut state, &Event::EnterSearch).unwrap();
        for c in "nav".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::Commit).unwrap();
        assert_eq!(state.filters.search_value, "nav");
        assert_eq!(state.filters.page, 1);
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));
        assert!(matches!(actions.as_slice(), [Action::StartFetch(_)]));
    }

    #[test]
    fn test_search_escape_discards_pending_edit() {
        let mut state = state_with_total(0);
        state.filters.update_search_value("kept");

        handle_event(&mut state, &Event::EnterSearch).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.filters.search_value, "kept");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_date_range_commit_valid() {
        let mut state = state_with_total(0);
        handle_event(&mut state, &Event::EnterDateRange).unwrap();
        for c in "2024-01-01..2024-06-30".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::Commit).unwrap();
        assert_eq!(state.filters.date_from, "2024-01-01");
        assert_eq!(state.filters.date_to, "2024-06-30");
        assert_eq!(actions.len(), 1);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_date_range_commit_invalid_keeps_store_untouched() {
        let mut state = state_with_total(0);
        handle_event(&mut state, &Event::EnterDateRange).unwrap();
        for c in "junk".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::Commit).unwrap();
        assert!(actions.is_empty(), "invalid input must not fetch");
        assert_eq!(state.filters.date_from, "");
        assert_eq!(state.input_mode, InputMode::DateRange, "stays in the mode");
        assert!(state.status.has_error());
    }

    #[test]
    fn test_goto_page_clamps_to_bounds() {
        let mut state = state_with_total(25);
        handle_event(&mut state, &Event::EnterGoToPage).unwrap();
        for c in "99".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::Commit).unwrap();
        assert_eq!(state.filters.page, 3);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_goto_page_rejects_non_digits() {
        let mut state = state_with_total(25);
        handle_event(&mut state, &Event::EnterGoToPage).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        assert_eq!(state.pending_input, "");
    }

    #[test]
    fn test_clear_filters_restores_defaults_and_fetches() {
        let mut state = state_with_total(25);
        state.filters.update_search_value("abc");
        state.filters.update_date_range("2024-01-01", "2024-02-01");
        state.filters.update_page_size(50);
        state.filters.update_page(2);

        let (_, actions) = handle_event(&mut state, &Event::ClearFilters).unwrap();
        assert_eq!(state.filters, crate::app::filters::FilterState::default());
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_fetch_roundtrip_through_events() {
        let mut state = state_with_total(0);

        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let [Action::StartFetch(request)] = actions.as_slice() else {
            panic!("expected a fetch action");
        };
        assert!(state.status.is_loading);

        let completed = Event::FetchCompleted {
            tag: request.tag,
            status: 200,
            body: success_body(&["a", "b"], 2),
        };
        let (rendered, _) = handle_event(&mut state, &completed).unwrap();
        assert!(rendered);
        assert!(!state.status.is_loading);
        assert_eq!(state.table.rows.len(), 2);
        assert_eq!(state.table.total_count, 2);
    }

    #[test]
    fn test_fetch_failure_surfaces_error_and_clears_loading() {
        let mut state = state_with_total(0);
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let [Action::StartFetch(request)] = actions.as_slice() else {
            panic!("expected a fetch action");
        };

        let completed = Event::FetchCompleted {
            tag: request.tag,
            status: 503,
            body: br#"{ "errors": [ { "message": "down for maintenance" } ] }"#.to_vec(),
        };
        handle_event(&mut state, &completed).unwrap();

        assert!(!state.status.is_loading);
        assert_eq!(state.status.error.as_deref(), Some("down for maintenance"));
        assert!(state.table.is_empty(), "snapshot untouched");
    }

    #[test]
    fn test_stale_deadline_does_not_render() {
        let mut state = state_with_total(0);
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let [Action::StartFetch(first)] = actions.as_slice() else {
            panic!("expected a fetch action");
        };
        let first_tag = first.tag;

        // A newer dispatch supersedes the first one.
        handle_event(&mut state, &Event::Refresh).unwrap();

        let (rendered, _) =
            handle_event(&mut state, &Event::FetchDeadline { tag: first_tag }).unwrap();
        assert!(!rendered);
        assert!(state.status.is_loading, "newer fetch still pending");
    }

    #[test]
    fn test_parse_date_range() {
        assert_eq!(
            parse_date_range("2024-01-01..2024-06-30").unwrap(),
            ("2024-01-01".to_string(), "2024-06-30".to_string())
        );
        assert_eq!(
            parse_date_range("2024-01-01..").unwrap(),
            ("2024-01-01".to_string(), String::new())
        );
        assert_eq!(
            parse_date_range("..2024-06-30").unwrap(),
            (String::new(), "2024-06-30".to_string())
        );
        assert_eq!(parse_date_range("  ").unwrap(), (String::new(), String::new()));
        assert!(parse_date_range("2024-01-01").is_err());
        assert!(parse_date_range("01/01/2024..").is_err());
    }
}
