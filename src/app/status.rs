//! Shared loading/error status store.
//!
//! One [`SharedStatus`] instance exists per session. It is written only by
//! the coordination layer around fetches and read by the UI to show the
//! loading indicator or the last error message.

/// Process-wide loading flag and error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStatus {
    /// Whether a fetch is currently in flight.
    pub is_loading: bool,

    /// Message of the last failed fetch, `None` after a successful one.
    pub error: Option<String>,
}

impl SharedStatus {
    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Records an error message.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Clears any recorded error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Whether an error message is currently recorded.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_roundtrip() {
        let mut status = SharedStatus::default();
        assert!(!status.has_error());

        status.set_error("boom");
        assert!(status.has_error());
        assert_eq!(status.error.as_deref(), Some("boom"));

        status.clear_error();
        assert!(!status.has_error());
    }
}
