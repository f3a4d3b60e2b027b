//! Translation-key domain model.
//!
//! This module defines the core [`TranslationKey`] type representing one
//! record of the remote `translationKeys` collection, together with its
//! nested per-language [`Translation`] values. Records are immutable once
//! deserialized from the API and are replaced wholesale on every fetch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A single translated value attached to a translation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// The translated text.
    pub value: String,

    /// Language code of this value, e.g. `"en-GB"` or `"nl-NL"`.
    pub languages_code: String,
}

/// One record of the remote translation-keys collection.
///
/// The `key` field is the unique, stable identifier used by application code
/// to reference translations (e.g. `$t("general.accept")`). Timestamps are
/// carried as the API's string representation; `updated_at` is `None` for
/// records that were never touched after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationKey {
    /// The key used to reference translation values.
    pub key: String,

    /// Creation timestamp as reported by the API.
    #[serde(rename = "createdAt")]
    pub created_at: String,

    /// Last update timestamp, `None` when the record was never updated.
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,

    /// Per-language translated values, in the API's order.
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl TranslationKey {
    /// Returns the timestamp the record was last touched.
    ///
    /// Falls back to the creation timestamp when the record has never been
    /// updated, so the UI always has something to display.
    #[must_use]
    pub fn last_touched(&self) -> &str {
        self.updated_at.as_deref().unwrap_or(&self.created_at)
    }

    /// Returns a human-readable string describing how many days ago the
    /// record was last updated.
    ///
    /// The format is whole days only: `"today"` for anything under 24 hours,
    /// otherwise `"Nd ago"`. Unparseable timestamps render as `"-"`.
    #[must_use]
    pub fn updated_ago(&self) -> String {
        Self::relative_days(self.last_touched(), Utc::now())
    }

    /// Computes the relative-days label for `timestamp` against `now`.
    fn relative_days(timestamp: &str, now: DateTime<Utc>) -> String {
        let Some(parsed) = parse_timestamp(timestamp) else {
            return "-".to_string();
        };

        let diff = now.timestamp() - parsed.timestamp();
        let days = diff / SECONDS_PER_DAY;

        if days > 0 {
            format!("{days}d ago")
        } else {
            "today".to_string()
        }
    }
}

/// Parses an API timestamp into a UTC datetime.
///
/// The remote API is not consistent about its timestamp shape: records may
/// carry an RFC 3339 string with offset, a bare `YYYY-MM-DDTHH:MM:SS`, or a
/// plain date. All three are accepted; anything else is `None`.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
