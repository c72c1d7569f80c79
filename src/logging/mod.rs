//! This module contains the file logger and the types it writes.
//!
//! It includes the severity levels, the entry record and its on-disk
//! serialization, the logger options, and the [`Logger`] itself.
pub mod entry;
pub mod error;
pub mod level;
pub mod logger;
pub mod options;

pub use entry::{parse_records, read_entries, LogEntry};
pub use error::LoggerError;
pub use level::LogLevel;
pub use logger::Logger;
pub use options::{LoggerOptions, RecordFormat};
