//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view
//! model computation and delegation to UI components. It handles layout
//! switching between normal mode and the input modes.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// layout for the active mode. Prints ANSI-styled output using `print!`;
/// does not clear the screen or manage cursor visibility (the host does).
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    if let Some(input_bar) = &viewmodel.input_bar {
        components::render_input_mode(&viewmodel, input_bar, &state.theme, cols, rows);
    } else {
        components::render_normal_mode(&viewmodel, &state.theme, cols, rows);
    }
}
