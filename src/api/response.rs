//! Response payload types and failure normalization.
//!
//! Everything the host hands back (success bodies, Directus error
//! envelopes, plain error objects, garbage) is classified here into either
//! a [`KeysPage`] snapshot or a normalized [`ApiError`]. Stores and UI code
//! never see a raw HTTP response.

use serde::Deserialize;

use crate::domain::{ApiError, TranslationKey, DEFAULT_FETCH_ERROR};

/// Wire shape of a successful translation-keys response.
#[derive(Debug, Clone, Deserialize)]
pub struct KeysResponse {
    /// One page of records.
    pub data: Vec<TranslationKey>,

    /// Optional counts for the filtered collection.
    #[serde(default)]
    pub meta: Option<ResponseMeta>,
}

/// Count metadata attached to a response.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ResponseMeta {
    /// Total records in the collection, ignoring filters.
    pub total_count: Option<u64>,

    /// Total records matching the active filters.
    pub filter_count: Option<u64>,
}

/// One fetched page plus the filtered total, ready to replace the table
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysPage {
    /// The records of this page.
    pub rows: Vec<TranslationKey>,

    /// Filtered total across all pages; 0 when the API sent no meta.
    pub total_count: u64,
}

/// Directus error envelope: `{ "errors": [ { "message", "extensions": { "code" } } ] }`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: Option<String>,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct ErrorExtensions {
    code: Option<String>,
}

/// Classifies one completed host request into a page or a normalized error.
///
/// A status of 0 means the host never produced a response (transport
/// failure). Success statuses must carry a decodable body; anything else is
/// reported as [`ApiError::Network`] since the payload did not survive the
/// transport intact. Non-success statuses are mined for the most specific
/// message available.
pub fn classify(status: u16, body: &[u8]) -> Result<KeysPage, ApiError> {
    if status == 0 {
        tracing::debug!("host reported no response for request");
        return Err(ApiError::Network {
            message: "no response received from the server".to_string(),
        });
    }

    if (200..300).contains(&status) {
        return decode_page(body);
    }

    let (message, code) = extract_error_message(body);
    tracing::debug!(status = status, message = %message, "request failed with HTTP error");
    Err(ApiError::HttpStatus {
        message,
        status,
        code,
    })
}

/// Decodes a success body into a [`KeysPage`].
fn decode_page(body: &[u8]) -> Result<KeysPage, ApiError> {
    let response: KeysResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "failed to decode response body");
        ApiError::Network {
            message: format!("invalid response body: {e}"),
        }
    })?;

    let total_count = response
        .meta
        .and_then(|meta| meta.filter_count)
        .unwrap_or(0);

    tracing::debug!(
        row_count = response.data.len(),
        total_count = total_count,
        "response decoded"
    );

    Ok(KeysPage {
        rows: response.data,
        total_count,
    })
}

/// Extracts the most specific message and code from an error body.
///
/// Preference order: first entry of the Directus `errors` envelope, then a
/// top-level `message`, then the fixed default.
fn extract_error_message(body: &[u8]) -> (String, Option<String>) {
    let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
        return (DEFAULT_FETCH_ERROR.to_string(), None);
    };

    if let Some(entry) = envelope.errors.into_iter().next() {
        let code = entry.extensions.and_then(|ext| ext.code);
        if let Some(message) = entry.message {
            return (message, code);
        }
        if let Some(message) = envelope.message {
            return (message, code);
        }
        return (DEFAULT_FETCH_ERROR.to_string(), code);
    }

    if let Some(message) = envelope.message {
        return (message, None);
    }

    (DEFAULT_FETCH_ERROR.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_filter_count() {
        let body = br#"{
            "data": [
                { "key": "a", "createdAt": "2024-01-01T00:00:00", "updatedAt": null, "translations": [] },
                { "key": "b", "createdAt": "2024-01-02T00:00:00", "updatedAt": null, "translations": [] }
            ],
            "meta": { "filter_count": 2 }
        }"#;

        let page = classify(200, body).unwrap();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_success_without_meta_defaults_to_zero() {
        let body = br#"{ "data": [] }"#;
        let page = classify(200, body).unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_status_zero_is_network_error() {
        let err = classify(0, b"").unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
    }

    #[test]
    fn test_malformed_success_body_is_network_error() {
        let err = classify(200, b"<html>gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
    }

    #[test]
    fn test_directus_envelope_message_preferred() {
        let body = br#"{
            "message": "outer message",
            "errors": [
                { "message": "You don't have permission to access this.",
                  "extensions": { "code": "FORBIDDEN" } }
            ]
        }"#;

        let err = classify(403, body).unwrap_err();
        assert_eq!(err.message(), "You don't have permission to access this.");
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.code(), Some("FORBIDDEN"));
    }

    #[test]
    fn test_top_level_message_fallback() {
        let body = br#"{ "message": "upstream exploded" }"#;
        let err = classify(502, body).unwrap_err();
        assert_eq!(err.message(), "upstream exploded");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_default_message_for_unusable_body() {
        let err = classify(500, b"not json at all").unwrap_err();
        assert_eq!(err.message(), DEFAULT_FETCH_ERROR);
        assert_eq!(err.status(), Some(500));
    }
}
