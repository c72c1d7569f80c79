//! Errors produced by the logger.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to create log directory '{}': {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create log file '{}': {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to log file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read log file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize log entry: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("malformed log record: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("unknown log level '{0}'")]
    UnknownLevel(String),

    #[error("unknown record format '{0}' (expected 'indented' or 'compact')")]
    UnknownFormat(String),
}
