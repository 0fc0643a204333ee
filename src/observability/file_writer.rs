//! Append-only line writer with size-based rotation.
//!
//! When the active file grows past the size limit it is shifted to `<name>.1`,
//! the previous `<name>.1` to `<name>.2`, and so on; the oldest backup beyond
//! the retention count is removed. Trace files therefore never use more than
//! `(keep + 1) * max_bytes` plus one batch.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default rotation threshold (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups kept.
pub const DEFAULT_KEEP: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    keep: usize,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// A writer for `path` with the default limits. Nothing is opened yet.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_KEEP)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, keep: usize) -> Self {
        Self {
            path,
            max_bytes,
            keep,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    /// Appends one line, rotating first if the file is over the limit.
    ///
    /// # Errors
    ///
    /// Returns an error if rotating, opening or writing fails, or if another
    /// thread panicked while holding the lock.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        let size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if size > self.max_bytes {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if self.keep == 0 {
            return fs::remove_file(&self.path).or_else(ignore_missing);
        }
        fs::remove_file(self.backup(self.keep)).or_else(ignore_missing)?;
        for n in (1..self.keep).rev() {
            let from = self.backup(n);
            if from.exists() {
                fs::rename(&from, self.backup(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup(1)).or_else(ignore_missing)
    }
}

fn ignore_missing(e: io::Error) -> io::Result<()> {
    if e.kind() == io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(e)
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("keep", &self.keep)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let writer = RotatingFile::with_limits(path.clone(), 8, 2);

        for i in 0..5 {
            writer.append_line(&format!("line-{i}-xxxxxxxx")).unwrap();
        }

        assert!(path.exists());
        assert!(writer.backup(1).exists());
        assert!(writer.backup(2).exists());
        assert!(!writer.backup(3).exists());
        let current = fs::read_to_string(&path).unwrap();
        assert_eq!(current.trim(), "line-4-xxxxxxxx");
    }

    #[test]
    fn small_writes_share_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("otlp.json");
        let writer = RotatingFile::new(path.clone());
        writer.append_line("a").unwrap();
        writer.append_line("b").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
