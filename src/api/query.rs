//! Query-parameter construction for the translation-keys endpoint.
//!
//! The remote API is a Directus-style CMS: filters are expressed as
//! `filter[<field>][<operator>]` parameters, pagination as `page`/`limit`,
//! and the response payload is narrowed with an explicit field projection.
//! This module turns a [`QueryParams`] input into the flat key/value map the
//! endpoint expects, applying defaults and skipping blank filters.

use std::collections::BTreeMap;

/// Default page when the caller supplies none.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Field projection requested from the API.
///
/// Limits the response payload to exactly what the table renders; the
/// nested `translations.*` entries pull the per-language values along.
const FIELDS: &str = "key,createdAt,updatedAt,translations.value,translations.languages_code";

/// Filter and pagination input for one fetch.
///
/// All fields are optional; unsupplied pagination falls back to the
/// documented defaults and unsupplied filters are simply omitted from the
/// output. Blank strings (empty or whitespace-only) count as unsupplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Substring filter on the record key.
    pub search: Option<String>,

    /// Inclusive lower bound (ISO date) on the update timestamp.
    pub date_from: Option<String>,

    /// Inclusive upper bound (ISO date) on the update timestamp.
    pub date_to: Option<String>,

    /// 1-based page to fetch.
    pub page: Option<u32>,

    /// Number of records per page.
    pub page_size: Option<u32>,
}

/// Builds the query-parameter map for one request.
///
/// Rules, each independently skippable when its source field is blank:
/// a non-blank search becomes a `_contains` filter on the key, non-blank
/// date bounds become `_gte`/`_lte` filters on the update timestamp.
/// Pagination, the meta flag and the field projection are always present.
#[must_use]
pub fn build_query(params: &QueryParams) -> BTreeMap<String, String> {
    let mut query = BTreeMap::new();

    if let Some(search) = non_blank(params.search.as_deref()) {
        query.insert("filter[key][_contains]".to_string(), search.to_string());
    }
    if let Some(from) = non_blank(params.date_from.as_deref()) {
        query.insert("filter[updatedAt][_gte]".to_string(), from.to_string());
    }
    if let Some(to) = non_blank(params.date_to.as_deref()) {
        query.insert("filter[updatedAt][_lte]".to_string(), to.to_string());
    }

    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    query.insert("page".to_string(), page.to_string());
    query.insert("limit".to_string(), page_size.to_string());

    query.insert("meta".to_string(), "filter_count".to_string());
    query.insert("fields".to_string(), FIELDS.to_string());

    query
}

/// Returns the value when it is present and not blank.
///
/// Whitespace-only strings are treated as absent; the returned slice keeps
/// the caller's original spelling (no trimming of the value itself).
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
