//! A small structured logger that appends JSON records to a single file.
//!
//! Each call to [`Logger::append`] (or one of its level wrappers) writes one
//! JSON object, followed by a line terminator, to the end of the log file.
//! Write failures never reach the caller; they are reported through the
//! [`diagnostics`] channel instead.
pub mod diagnostics;
pub mod logging;

pub use logging::{
    parse_records, read_entries, LogEntry, LogLevel, Logger, LoggerError, LoggerOptions,
    RecordFormat,
};
