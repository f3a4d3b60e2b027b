//! API layer: query building, request construction and response
//! classification for the translation-keys endpoint.
//!
//! The layer is deliberately transport-free. It describes requests
//! ([`ApiRequest`]) and interprets results ([`classify`]); the actual HTTP
//! round-trip is performed by the Zellij host through the plugin shim. That
//! split keeps every piece of API behavior unit-testable without a network.
//!
//! # Modules
//!
//! - [`query`]: filter/pagination input → Directus query-parameter map
//! - [`request`]: environment-aware endpoint selection, headers, tagging
//! - [`response`]: payload decoding and failure normalization

pub mod query;
pub mod request;
pub mod response;

pub use query::{build_query, QueryParams, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use request::{build_request, ApiRequest, ApiSettings, Environment, CONTEXT_TAG_KEY};
pub use response::{classify, KeysPage, KeysResponse, ResponseMeta};
