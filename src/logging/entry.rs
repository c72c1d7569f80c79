//! This module defines the structure of a single log record and how it is
//! written to and read back from the log file.
use super::{LogLevel, LoggerError, RecordFormat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Represents a single log entry with timestamp, level, message, and optional
/// structured context.
///
/// Field names are written in PascalCase: `Timestamp`, `Level`, `Message`,
/// `AdditionalData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    /// The UTC time at which the entry was created.
    pub timestamp: DateTime<Utc>,
    /// The severity of the entry.
    pub level: LogLevel,
    /// The caller-supplied message.
    pub message: String,
    /// Arbitrary structured context. Written as `null` when absent.
    #[serde(default)]
    pub additional_data: Option<Value>,
}

impl LogEntry {
    /// Creates a new entry stamped with the current UTC time.
    pub fn new(level: LogLevel, message: impl Into<String>, additional_data: Option<Value>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            additional_data,
        }
    }

    /// Serializes the entry as a single record, without the trailing line
    /// terminator.
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::Serialize` if the entry cannot be encoded.
    pub fn to_record(&self, format: RecordFormat) -> Result<String, LoggerError> {
        match format {
            RecordFormat::Indented => serde_json::to_string_pretty(self),
            RecordFormat::Compact => serde_json::to_string(self),
        }
        .map_err(LoggerError::Serialize)
    }
}

/// Parses the contents of a log file into its entries, in file order.
///
/// The file is a concatenation of JSON objects rather than a JSON array, so
/// records are read one after another regardless of whether they span one
/// line or several.
///
/// # Errors
///
/// Returns `LoggerError::Malformed` at the first record that is not a valid
/// entry.
pub fn parse_records(text: &str) -> Result<Vec<LogEntry>, LoggerError> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<LogEntry>()
        .map(|record| record.map_err(LoggerError::Malformed))
        .collect()
}

/// Reads and parses every entry in the log file at `path`.
///
/// # Errors
///
/// Returns `LoggerError::Read` if the file cannot be read, or
/// `LoggerError::Malformed` if a record cannot be parsed.
pub async fn read_entries(path: impl AsRef<Path>) -> Result<Vec<LogEntry>, LoggerError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoggerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_records(&text)
}
