//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends lines to a file.
///
/// Every line is written straight to the file with one `write_all` while
/// holding the appender's lock. With the `file` feature the write also takes
/// an advisory exclusive lock on the file, so several processes can share
/// one log file without interleaving lines.
pub struct FileAppender {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    path.display().to_string(),
                    e,
                )
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(feature = "file")]
fn write_locked(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    use fs2::FileExt;

    file.lock_exclusive()?;
    let result = file.write_all(line);
    let unlock = FileExt::unlock(file);
    result.and(unlock)
}

#[cfg(not(feature = "file"))]
fn write_locked(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    file.write_all(line)
}

impl Appender for FileAppender {
    fn append(&self, line: &[u8]) -> Result<usize> {
        let mut file = self.file.lock();
        write_locked(&mut file, line)?;
        Ok(line.len())
    }

    fn flush(&self) -> Result<()> {
        self.file.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl std::fmt::Debug for FileAppender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAppender")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
