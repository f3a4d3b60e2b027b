//! Lexikey: a Zellij plugin for browsing translation keys from a
//! Directus-style CMS.
//!
//! Lexikey is a terminal-multiplexer plugin that lists, searches, filters
//! and paginates the `translationKeys` collection of a remote headless CMS:
//! - Substring search on the record key, with match highlighting
//! - Date-range filtering on the update timestamp
//! - Server-side pagination with page-size cycling and page jumps
//! - Live fetches through Zellij's web-request facility, with a
//!   latest-request-wins guard and per-request deadlines
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Stores
//! │  - Filter / table / shared-status stores            │  ← Coordination
//! │  - Event handling and fetch policy                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │
//! │ (ui/)         │   │ (api/)        │
//! │ - Rendering   │   │ - Query build │
//! │ - Theming     │   │ - Transport   │
//! │ - Data table  │   │ - Normalizing │
//! └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Records, pagination math, errors (domain/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - Rotating file logs via tracing                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Data Flow
//!
//! ```text
//! Key press → Event → handler → store mutation → Action::StartFetch
//!     → host web request → WebRequestResult → Event::FetchCompleted
//!     → snapshot replaced → derived pagination → render
//! ```
//!
//! Store mutators never fetch by themselves; the event handler decides
//! which interactions dispatch a request. Every dispatch carries a
//! monotonic tag, and only the newest tag may touch state on completion,
//! so a stale response can never overwrite a newer one.
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/lexikey.wasm" {
//!         api_base_url "https://directus.example.com"
//!         environment "production"
//!         request_timeout_ms "10000"
//!         page_size "25"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Environment variables (`LEXIKEY_API_BASE_URL`, `LEXIKEY_API_TIMEOUT_MS`,
//! `LEXIKEY_ENV`) fill in values the configuration map omits.

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use api::{ApiSettings, Environment};
pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{ApiError, LexikeyError, PaginationInfo, Result, TranslationKey};
pub use ui::Theme;

use std::collections::BTreeMap;

use api::request::{DEFAULT_API_BASE_URL, DEFAULT_PROXY_BASE_URL, DEFAULT_TIMEOUT_MS};
use api::DEFAULT_PAGE_SIZE;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Values come from the plugin's KDL configuration map, falling back to
/// environment variables and documented defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote CMS.
    ///
    /// Config key `api_base_url`, env `LEXIKEY_API_BASE_URL`.
    /// Default: `https://directus.altura.io`
    pub api_base_url: String,

    /// Base URL of the development proxy.
    ///
    /// Config key `proxy_base_url`. Default: `http://localhost:3000`
    pub proxy_base_url: String,

    /// Runtime environment selecting the transport.
    ///
    /// Config key `environment`, env `LEXIKEY_ENV`. Default: production.
    pub environment: Environment,

    /// Request deadline in milliseconds.
    ///
    /// Config key `request_timeout_ms`, env `LEXIKEY_API_TIMEOUT_MS`.
    /// Default: 10000
    pub request_timeout_ms: u64,

    /// Initial page size.
    ///
    /// Config key `page_size`. Default: 10
    pub page_size: u32,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Log level for the tracing subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            proxy_base_url: DEFAULT_PROXY_BASE_URL.to_string(),
            environment: Environment::Production,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            page_size: DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. Each value is resolved as: config map entry,
    /// then environment variable (where one is documented), then the
    /// default. Blank entries and unparseable numbers fall through to the
    /// next source.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let api_base_url = string_setting(config, "api_base_url", Some("LEXIKEY_API_BASE_URL"))
            .unwrap_or(defaults.api_base_url);
        let proxy_base_url =
            string_setting(config, "proxy_base_url", None).unwrap_or(defaults.proxy_base_url);

        let environment = string_setting(config, "environment", Some("LEXIKEY_ENV"))
            .map_or(defaults.environment, |name| Environment::from_name(&name));

        let request_timeout_ms =
            string_setting(config, "request_timeout_ms", Some("LEXIKEY_API_TIMEOUT_MS"))
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.request_timeout_ms);

        let page_size = string_setting(config, "page_size", None)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|&size| size > 0)
            .unwrap_or(defaults.page_size);

        Self {
            api_base_url,
            proxy_base_url,
            environment,
            request_timeout_ms,
            page_size,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Resolves the connection settings for the API layer.
    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            api_base_url: self.api_base_url.clone(),
            proxy_base_url: self.proxy_base_url.clone(),
            environment: self.environment,
            timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Reads a non-blank string setting from the config map or an env var.
fn string_setting(
    config: &BTreeMap<String, String>,
    key: &str,
    env_var: Option<&str>,
) -> Option<String> {
    config
        .get(key)
        .cloned()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            env_var
                .and_then(|name| std::env::var(name).ok())
                .filter(|value| !value.trim().is_empty())
        })
}

/// Initializes the plugin application state with configuration.
///
/// Resolves the theme (file, then name, then default) and constructs the
/// per-session [`AppState`] context the shim drives. The table starts
/// empty; the shim dispatches the initial fetch once the host grants
/// permissions.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing lexikey plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.api_settings(), config.page_size, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_zellij_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.proxy_base_url, DEFAULT_PROXY_BASE_URL);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.page_size, 10);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn test_from_zellij_parses_values() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "https://cms.example.com"),
            ("environment", "development"),
            ("request_timeout_ms", "2500"),
            ("page_size", "25"),
            ("theme", "catppuccin-latte"),
        ]));

        assert_eq!(config.api_base_url, "https://cms.example.com");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn test_from_zellij_rejects_unusable_numbers() {
        let config = Config::from_zellij(&map(&[
            ("request_timeout_ms", "soon"),
            ("page_size", "0"),
        ]));
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_initialize_builds_state() {
        let config = Config {
            page_size: 50,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.filters.page_size, 50);
        assert_eq!(state.filters.page, 1);
        assert!(state.table.is_empty());
    }
}
