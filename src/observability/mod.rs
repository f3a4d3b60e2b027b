//! Logging infrastructure with rotating file output.
//!
//! This module wires the `tracing` macros used across the crate to a
//! subscriber that writes structured log lines to a size-rotated file in
//! the plugin data directory. Plugins have no terminal of their own for
//! diagnostics, so a file is the only place logs can usefully go.
//!
//! # Configuration
//!
//! The log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option in the plugin configuration
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use init::init_tracing;
