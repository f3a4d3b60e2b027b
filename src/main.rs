//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Lexikey
//! library and the Zellij plugin system. It implements the `ZellijPlugin`
//! trait to handle host events and lifecycle, mapping them onto the
//! library's event model and executing the actions the handler emits.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: register for Key, Timer, `WebRequestResult` and
//!    `PermissionRequestResult` events
//! 3. **Permissions granted**: dispatch the initial fetch
//! 4. **Update**: translate host events to library events, execute actions
//! 5. **Render**: call the library render function
//!
//! # Fetch Round-Trip
//!
//! `Action::StartFetch` is executed as a host `web_request` with the
//! request tag in the context map, plus a `set_timeout` for the deadline.
//! The host answers with `WebRequestResult` (tag recovered from the echoed
//! context) or, if nothing arrived in time, the timer fires and the queued
//! deadline tag expires the request. Stale tags are ignored by the
//! library's latest-request-wins guard.
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`k`/arrows: move row selection (also `Ctrl+n`/`Ctrl+p`)
//! - `h`/`l`/`←`/`→`: previous/next page
//! - `g`: jump to page, `s`: cycle page size
//! - `/`: search, `d`: date range, `c`: clear filters
//! - `r`: refresh, `q`: close the pane
//!
//! Input modes (search/dates/page): type to edit, `Enter` commits,
//! `Esc` cancels.

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;
use zellij_tile::shim::web_request;

use lexikey::api::CONTEXT_TAG_KEY;
use lexikey::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific bookkeeping: the
/// FIFO of armed deadline timers (the host's timer event carries no
/// payload, so tags are matched by arming order) and the one-shot initial
/// fetch flag.
struct State {
    /// Core application state from the library layer.
    app: lexikey::AppState,

    /// Tags of dispatched fetches whose deadline timer has not fired yet.
    ///
    /// All fetches share one timeout duration, so timers fire in arming
    /// order and a FIFO pairs each `Timer` event with its tag.
    pending_deadlines: VecDeque<u64>,

    /// Whether the initial fetch was already dispatched.
    initial_fetch_done: bool,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: lexikey::initialize(&default_config),
            pending_deadlines: VecDeque::new(),
            initial_fetch_done: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes tracing, builds application
    /// state, requests permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: fetch translation keys from the remote API
    /// - `ChangeApplicationState`: hide the plugin pane on quit
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        lexikey::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(environment = ?config.environment, "plugin loading started");
        self.app = lexikey::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates host events to library events, delegates to
    /// `handle_event`, and executes resulting actions. Returns `true` if
    /// the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => {
                match self.pending_deadlines.pop_front() {
                    Some(tag) => Event::FetchDeadline { tag },
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.handle_permission_result(status);
                return true;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI by delegating to the library layer.
    fn render(&mut self, rows: usize, cols: usize) {
        lexikey::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events based on the input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::MoveDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::MoveUp);
        }

        if self.app.input_mode.is_editing() {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Commit,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Enter => Event::Commit,
            BareKey::Esc => Event::Escape,
            BareKey::Char('/') => {
                if self.app.input_mode == InputMode::Search(SearchFocus::Navigating) {
                    Event::FocusSearchBar
                } else {
                    Event::EnterSearch
                }
            }
            BareKey::Char('d') if self.app.input_mode == InputMode::Normal => Event::EnterDateRange,
            BareKey::Char('g') => Event::EnterGoToPage,
            BareKey::Char('s') if self.app.input_mode == InputMode::Normal => Event::CyclePageSize,
            BareKey::Char('c') if self.app.input_mode == InputMode::Normal => Event::ClearFilters,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a host web-request result to an application event.
    ///
    /// Results without a parseable tag in the echoed context did not come
    /// from this plugin's fetch path and are ignored.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let tag = context.get(CONTEXT_TAG_KEY)?.parse::<u64>().ok()?;
        tracing::debug!(tag = tag, status = status, body_len = body.len(), "web request result");
        Some(Event::FetchCompleted { tag, status, body })
    }

    /// Handles permission request results.
    ///
    /// The initial fetch waits for permissions: a web request dispatched
    /// before `WebAccess` is granted would be dropped by the host.
    fn handle_permission_result(&mut self, status: PermissionStatus) {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted");
                if !self.initial_fetch_done {
                    self.initial_fetch_done = true;
                    if let Ok((_, actions)) = handle_event(&mut self.app, &Event::Refresh) {
                        for action in actions {
                            self.execute_action(&action);
                        }
                    }
                }
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin cannot fetch translation keys");
            }
        }
    }

    /// Executes an action returned from event handling.
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::StartFetch(request) => {
                tracing::debug!(tag = request.tag, url = %request.url, "executing web request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );

                #[allow(clippy::cast_precision_loss)]
                set_timeout(request.timeout_ms as f64 / 1000.0);
                self.pending_deadlines.push_back(request.tag);
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
