//! Outbound request construction and transport selection.
//!
//! The plugin never opens sockets itself: requests are described as
//! [`ApiRequest`] values and handed to the Zellij host's web-request
//! facility by the plugin shim. This module owns everything about the
//! request that is not host-specific: which endpoint to hit for the
//! current environment, the fixed header set, the encoded query string and
//! the context tag used to pair responses with dispatches.

use std::collections::BTreeMap;

/// Context key carrying the request tag through the host round-trip.
///
/// The host echoes the context map back verbatim on the result event; the
/// shim reads this key to recover which dispatch a response belongs to.
pub const CONTEXT_TAG_KEY: &str = "lexikey_request_tag";

/// Default remote API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://directus.altura.io";

/// Default development proxy base URL.
pub const DEFAULT_PROXY_BASE_URL: &str = "http://localhost:3000";

/// Default request deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Fixed User-Agent sent with every request.
///
/// The upstream CMS sits behind a CDN that rejects non-browser agents, so
/// the plugin presents a browserlike identity.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Runtime environment controlling transport selection.
///
/// Development deployments route through a local forwarding proxy (the same
/// route a browser build uses to dodge cross-origin restrictions); every
/// other environment calls the remote API directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Requests go through the local development proxy.
    Development,

    /// Requests go straight to the remote API.
    #[default]
    Production,
}

impl Environment {
    /// Parses an environment name, defaulting to production for anything
    /// unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Connection settings resolved once at plugin startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL of the remote CMS.
    pub api_base_url: String,

    /// Base URL of the development proxy.
    pub proxy_base_url: String,

    /// Which transport to select.
    pub environment: Environment,

    /// Request deadline in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            proxy_base_url: DEFAULT_PROXY_BASE_URL.to_string(),
            environment: Environment::Production,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// A fully described outbound GET request, ready for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Complete URL including the encoded query string.
    pub url: String,

    /// Headers to attach.
    pub headers: BTreeMap<String, String>,

    /// Context map echoed back on the result event.
    pub context: BTreeMap<String, String>,

    /// Tag pairing this dispatch with its response or deadline.
    pub tag: u64,

    /// Deadline for this request in milliseconds.
    pub timeout_ms: u64,
}

/// Builds the translation-keys request for the given settings and query.
///
/// Selects the endpoint for the configured environment, encodes the query
/// map into the URL and attaches the fixed header set plus the tag context.
#[must_use]
pub fn build_request(
    settings: &ApiSettings,
    query: &BTreeMap<String, String>,
    tag: u64,
) -> ApiRequest {
    let endpoint = match settings.environment {
        Environment::Development => {
            format!("{}/api/translationKeys", settings.proxy_base_url.trim_end_matches('/'))
        }
        Environment::Production => {
            format!("{}/items/translationKeys", settings.api_base_url.trim_end_matches('/'))
        }
    };

    let url = format!("{endpoint}?{}", encode_query(query));

    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert(
        "Accept".to_string(),
        "application/json, text/plain, */*".to_string(),
    );
    headers.insert("Accept-Language".to_string(), "en-US,en;q=0.9".to_string());
    headers.insert("User-Agent".to_string(), USER_AGENT.to_string());

    let mut context = BTreeMap::new();
    context.insert(CONTEXT_TAG_KEY.to_string(), tag.to_string());

    ApiRequest {
        url,
        headers,
        context,
        tag,
        timeout_ms: settings.timeout_ms,
    }
}

/// Percent-encodes a query map into `key=value&...` form.
fn encode_query(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::{build_query, QueryParams};

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("DEV"), Environment::Development);
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name("staging"), Environment::Production);
        assert_eq!(Environment::from_name(""), Environment::Production);
    }

    #[test]
    fn test_production_hits_remote_items_route() {
        let settings = ApiSettings::default();
        let request = build_request(&settings, &build_query(&QueryParams::default()), 7);

        assert!(request
            .url
            .starts_with("https://directus.altura.io/items/translationKeys?"));
        assert_eq!(request.tag, 7);
        assert_eq!(
            request.context.get(CONTEXT_TAG_KEY).map(String::as_str),
            Some("7")
        );
    }

    #[test]
    fn test_development_hits_proxy_route() {
        let settings = ApiSettings {
            environment: Environment::Development,
            ..ApiSettings::default()
        };
        let request = build_request(&settings, &build_query(&QueryParams::default()), 1);

        assert!(request
            .url
            .starts_with("http://localhost:3000/api/translationKeys?"));
    }

    #[test]
    fn test_query_is_percent_encoded() {
        let params = QueryParams {
            search: Some("a key&with specials".to_string()),
            ..QueryParams::default()
        };
        let request = build_request(&ApiSettings::default(), &build_query(&params), 1);

        assert!(request.url.contains("filter%5Bkey%5D%5B_contains%5D="));
        assert!(request.url.contains("a%20key%26with%20specials"));
        assert!(!request.url.contains("with specials"));
    }

    #[test]
    fn test_fixed_headers_present() {
        let request = build_request(&ApiSettings::default(), &BTreeMap::new(), 1);

        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert!(request.headers.get("Accept").unwrap().contains("application/json"));
        assert!(request.headers.get("User-Agent").unwrap().contains("Mozilla/5.0"));
    }

    #[test]
    fn test_trailing_slash_on_base_url_is_tolerated() {
        let settings = ApiSettings {
            api_base_url: "https://cms.example.com/".to_string(),
            ..ApiSettings::default()
        };
        let request = build_request(&settings, &BTreeMap::new(), 1);
        assert!(request.url.starts_with("https://cms.example.com/items/translationKeys?"));
    }
}
