//! Rotating file writer with size-based rotation and backup retention.
//!
//! This module provides a thread-safe file writer that automatically
//! rotates the log file when it exceeds a size threshold, maintaining a
//! fixed number of backup files. This prevents unbounded disk usage for
//! plugin logs.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// When the current file exceeds the size threshold it is renamed with a
/// timestamp suffix and a new file is created; backups beyond
/// `MAX_BACKUP_FILES` are removed. The writer is cheap to clone (clones
/// share the same file handle), which is what the tracing subscriber's
/// `MakeWriter` contract needs.
#[derive(Clone)]
pub struct FileWriter {
    inner: Arc<Inner>,
}

struct Inner {
    /// Path to the primary log file.
    file_path: PathBuf,

    /// Rotation threshold in bytes.
    max_size: u64,

    /// Lazily-initialized file handle (opens on first write).
    handle: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a new file writer for the given path.
    ///
    /// The file is not opened until the first write, so construction
    /// succeeds even when the file cannot be opened yet.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_max_size(file_path, MAX_FILE_SIZE_BYTES)
    }

    fn with_max_size(file_path: PathBuf, max_size: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                file_path,
                max_size,
                handle: Mutex::new(None),
            }),
        }
    }

    /// Appends bytes to the file, rotating first when it grew too large.
    fn append(&self, buf: &[u8]) -> io::Result<usize> {
        let mut handle = self
            .inner
            .handle
            .lock()
            .map_err(|e| {
                io::Error::new(io::ErrorKind::Other, format!("log writer mutex poisoned: {e}"))
            })?;

        self.check_and_rotate(&mut handle)?;

        if handle.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.inner.file_path)?;
            *handle = Some(file);
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no log file available"))?;
        file.write_all(buf)?;
        file.flush()?;
        Ok(buf.len())
    }

    /// Rotates the file when it exceeds the size threshold.
    ///
    /// The current file is renamed to `<name>.<unix-timestamp>` and the
    /// handle is dropped so the next write opens a fresh file. Oldest
    /// backups beyond the retention count are removed; cleanup failures
    /// are ignored.
    fn check_and_rotate(&self, handle: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.inner.file_path) else {
            return Ok(());
        };
        if metadata.len() < self.inner.max_size {
            return Ok(());
        }

        *handle = None;

        let timestamp = chrono::Utc::now().timestamp();
        let rotated = self
            .inner
            .file_path
            .with_file_name(format!(
                "{}.{timestamp}",
                self.inner
                    .file_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("lexikey.log")
            ));
        fs::rename(&self.inner.file_path, &rotated)?;

        self.cleanup_backups();
        Ok(())
    }

    /// Removes the oldest backups beyond the retention count.
    fn cleanup_backups(&self) {
        let Some(parent) = self.inner.file_path.parent() else {
            return;
        };
        let Some(base_name) = self
            .inner
            .file_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| format!("{n}."))
        else {
            return;
        };
        let Ok(entries) = fs::read_dir(parent) else {
            return;
        };

        let mut backups: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&base_name))
            })
            .collect();

        if backups.len() <= MAX_BACKUP_FILES {
            return;
        }

        // Timestamp suffixes sort lexicographically in creation order.
        backups.sort();
        for stale in &backups[..backups.len() - MAX_BACKUP_FILES] {
            let _ = fs::remove_file(stale);
        }
    }
}

impl io::Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexikey.log");
        let writer = FileWriter::new(path.clone());

        writer.append(b"line one\n").unwrap();
        writer.append(b"line two\n").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "line one\nline two\n");
    }

    #[test]
    fn test_rotation_renames_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexikey.log");
        let writer = FileWriter::with_max_size(path.clone(), 16);

        writer.append(b"0123456789abcdef\n").unwrap();
        // First write took the file past the threshold; this one rotates.
        writer.append(b"fresh\n").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "fresh\n");

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("lexikey.log."))
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_clones_share_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexikey.log");
        let writer = FileWriter::new(path.clone());
        let clone = writer.clone();

        writer.append(b"a\n").unwrap();
        clone.append(b"b\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
