//! Table data store holding the most recently fetched page.
//!
//! [`TableState`] owns the current snapshot: one page of records plus the
//! filtered total across all pages. The snapshot is replaced atomically on
//! every successful fetch and left untouched when a fetch fails, so the
//! user keeps looking at the last good data while the error is shown.

use crate::api::KeysPage;
use crate::domain::TranslationKey;

/// The last successfully fetched page and its filtered total.
///
/// `rows.len()` is at most one page; `total_count` counts every record
/// matching the active filters, so the two are unrelated in general.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    /// Records of the current page.
    pub rows: Vec<TranslationKey>,

    /// Filtered total across all pages.
    pub total_count: u64,
}

impl TableState {
    /// Replaces the rows of the snapshot.
    pub fn set_rows(&mut self, rows: Vec<TranslationKey>) {
        self.rows = rows;
    }

    /// Replaces the filtered total.
    pub fn set_total_count(&mut self, total_count: u64) {
        self.total_count = total_count;
    }

    /// Atomically replaces the whole snapshot from a classified response.
    pub fn apply(&mut self, page: KeysPage) {
        self.rows = page.rows;
        self.total_count = page.total_count;
    }

    /// Whether the current page has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> TranslationKey {
        TranslationKey {
            key: name.to_string(),
            created_at: "2024-01-01T00:00:00".to_string(),
            updated_at: None,
            translations: vec![],
        }
    }

    #[test]
    fn test_apply_replaces_whole_snapshot() {
        let mut table = TableState::default();
        table.set_rows(vec![key("old.one"), key("old.two")]);
        table.set_total_count(12);

        table.apply(KeysPage {
            rows: vec![key("new.one")],
            total_count: 1,
        });

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].key, "new.one");
        assert_eq!(table.total_count, 1);
    }

    #[test]
    fn test_is_empty() {
        let mut table = TableState::default();
        assert!(table.is_empty());

        table.set_rows(vec![key("a")]);
        assert!(!table.is_empty());
    }
}
