//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced
//! by the event handler after processing user input or host events. Actions
//! bridge pure state transformations and effectful operations: issuing the
//! web request, arming its deadline timer, or closing the pane.
//!
//! The event handler returns a `Vec<Action>` per event; the plugin shim
//! executes them in sequence against the Zellij host API.

use crate::api::ApiRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Executes a translation-keys fetch through the host.
    ///
    /// The shim issues the web request and arms a timer for the request's
    /// deadline; the response (or the deadline) comes back as an event
    /// carrying the request tag.
    StartFetch(ApiRequest),

    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,
}
