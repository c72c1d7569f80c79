//! This module provides the file logger.
//!
//! A `Logger` bootstraps its target path once, at construction, and then
//! appends one record per call. Construction errors are returned to the
//! caller; write errors are reported on the diagnostic channel and swallowed.
use super::{LogEntry, LogLevel, LoggerError, LoggerOptions};
use crate::diagnostics;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// A structured logger that appends JSON records to a single file.
///
/// Cloning a `Logger` is cheap; clones write to the same file and share the
/// same write lock.
#[derive(Debug, Clone)]
pub struct Logger {
    /// The file every record is appended to.
    path: PathBuf,
    /// How records are written.
    options: LoggerOptions,
    /// Held for the duration of a write when `serialize_writes` is set.
    write_lock: Arc<Mutex<()>>,
}

impl Logger {
    /// Creates a new `Logger` with default options.
    ///
    /// The parent directory and the log file are created if they do not exist.
    /// An existing file is left untouched.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the log file, relative or absolute.
    ///
    /// # Errors
    ///
    /// This function will return an error if the directory or the file cannot
    /// be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LoggerError> {
        Self::with_options(path, LoggerOptions::default())
    }

    /// Creates a new `Logger` with the given options.
    ///
    /// # Errors
    ///
    /// Same as [`Logger::new`].
    pub fn with_options(
        path: impl Into<PathBuf>,
        options: LoggerOptions,
    ) -> Result<Self, LoggerError> {
        let path = path.into();
        ensure_log_file(&path)?;

        Ok(Self {
            path,
            options,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the options this logger writes with.
    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    /// Appends an entry to the log file.
    ///
    /// The entry is stamped with the current UTC time. If the write fails, a
    /// diagnostic is emitted and the call still returns normally.
    ///
    /// # Arguments
    ///
    /// * `message` - The log message.
    /// * `level` - The severity of the entry.
    /// * `extra` - Optional structured context for the entry.
    pub async fn append(&self, message: impl Into<String>, level: LogLevel, extra: Option<Value>) {
        let entry = LogEntry::new(level, message, extra);
        if let Err(e) = self.write_entry(&entry).await {
            diagnostics::report_write_failure(&self.path, &e);
        }
    }

    /// Appends a `Debug` entry.
    pub async fn debug(&self, message: impl Into<String>, extra: Option<Value>) {
        self.append(message, LogLevel::Debug, extra).await
    }

    /// Appends an `Information` entry.
    pub async fn info(&self, message: impl Into<String>, extra: Option<Value>) {
        self.append(message, LogLevel::Information, extra).await
    }

    /// Appends a `Warning` entry.
    pub async fn warn(&self, message: impl Into<String>, extra: Option<Value>) {
        self.append(message, LogLevel::Warning, extra).await
    }

    /// Appends an `Error` entry.
    pub async fn error(&self, message: impl Into<String>, extra: Option<Value>) {
        self.append(message, LogLevel::Error, extra).await
    }

    /// Appends a `Critical` entry.
    pub async fn critical(&self, message: impl Into<String>, extra: Option<Value>) {
        self.append(message, LogLevel::Critical, extra).await
    }

    /// Serializes `entry` and appends it, with a line terminator, in a single
    /// write. The file is opened for this write only.
    async fn write_entry(&self, entry: &LogEntry) -> Result<(), LoggerError> {
        let mut record = entry.to_record(self.options.format)?;
        record.push_str(LINE_ENDING);

        let _guard = if self.options.serialize_writes {
            Some(self.write_lock.lock().await)
        } else {
            None
        };

        let write_err = |source: std::io::Error| LoggerError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(write_err)?;
        file.write_all(record.as_bytes()).await.map_err(write_err)?;
        // Tokio completes file writes in the background; flush before the
        // handle is dropped so the write has landed when we return.
        file.flush().await.map_err(write_err)?;

        Ok(())
    }
}

/// Creates the parent directory and the log file if they do not exist.
///
/// An empty parent (a bare file name) refers to the current directory. The
/// file is always opened in append mode, so an existing file is never
/// truncated and a target that is not a regular file fails here.
fn ensure_log_file(path: &Path) -> Result<(), LoggerError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.is_dir() {
            fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDirectory {
                path: dir.to_path_buf(),
                source,
            })?;
        }
    }

    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggerError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}
