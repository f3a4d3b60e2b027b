//! Input mode state types for the application.
//!
//! This module defines the state machine enum that controls user interaction
//! modes. The mode determines which keybindings are active, how typed
//! characters are processed, and which input bar (if any) the UI shows.
//!
//! # State Machine
//!
//! The application operates in one of four input modes:
//! - **Normal**: navigation and command mode
//! - **Search**: editing or navigating with an active search query
//! - **`DateRange`**: editing the update-timestamp filter bounds
//! - **`GoToPage`**: accumulating a page number to jump to

/// Focus state within search mode.
///
/// Determines whether the search input is being typed or the filtered
/// results are being navigated. Controls which keybindings are active
/// during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (commits the query).
    Typing,

    /// User is navigating rows with a committed query.
    ///
    /// Accepts j/k for movement, h/l for paging, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how typed characters are
/// interpreted. Determines the displayed footer text and input bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (rows), h/l (pages), g (go to page),
    /// / (search), d (date range), s (page size), c (clear filters),
    /// r (refresh), q (quit).
    Normal,

    /// Active search mode with focus state.
    ///
    /// Contains a [`SearchFocus`] variant indicating whether the user is
    /// editing the query or navigating results.
    Search(SearchFocus),

    /// Editing the date-range filter as `FROM..TO`.
    ///
    /// Enter validates and commits both bounds; escape abandons the edit.
    DateRange,

    /// Accumulating digits for a page jump.
    ///
    /// Enter jumps (clamped to the valid page range); escape cancels.
    GoToPage,
}

impl InputMode {
    /// Whether this mode is editing free text in the input bar.
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(
            self,
            Self::Search(SearchFocus::Typing) | Self::DateRange | Self::GoToPage
        )
    }
}
