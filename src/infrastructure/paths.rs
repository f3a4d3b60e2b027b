//! Path utilities for the Zellij sandbox environment.
//!
//! In the Zellij plugin sandbox the host filesystem is mounted under
//! `/host`, which points to the cwd of the last focused terminal (or the
//! folder Zellij was started from). The plugin keeps its log files under a
//! data directory inside that mount.

use std::path::PathBuf;

/// Returns the data directory for Lexikey files.
///
/// The directory is located at `/host/.local/share/zellij/lexikey` in the
/// Zellij sandbox, which typically resolves to
/// `~/.local/share/zellij/lexikey` when Zellij is started from the user's
/// home directory. The rotating log file lives within this directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("lexikey")
}

/// Removes the `/host` prefix from sandbox paths for display purposes.
///
/// When showing paths to users it is clearer to present them as they would
/// appear on the host filesystem.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir() {
        assert_eq!(
            get_data_dir().to_str().unwrap(),
            "/host/.local/share/zellij/lexikey"
        );
    }

    #[test]
    fn test_strip_host_prefix() {
        assert_eq!(strip_host_prefix("/host/home/user/x"), "/home/user/x");
        assert_eq!(strip_host_prefix("/absolute/path"), "/absolute/path");
    }
}
