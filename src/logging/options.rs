//! Options controlling how a [`Logger`](super::Logger) writes its records.
use super::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted by [`LoggerOptions::from_env`].
pub const FORMAT_ENV_VAR: &str = "JSONLOG_FORMAT";

/// The on-disk shape of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// Pretty-printed JSON with a two-space indent; records span several lines.
    #[default]
    Indented,
    /// One JSON object per line.
    Compact,
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::Indented => f.write_str("indented"),
            RecordFormat::Compact => f.write_str("compact"),
        }
    }
}

impl FromStr for RecordFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indented" | "pretty" => Ok(RecordFormat::Indented),
            "compact" | "jsonl" => Ok(RecordFormat::Compact),
            _ => Err(LoggerError::UnknownFormat(s.to_string())),
        }
    }
}

/// Options for a [`Logger`](super::Logger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// How each record is serialized.
    pub format: RecordFormat,
    /// Whether appends through one logger (and its clones) are serialized so
    /// that concurrent records never interleave.
    pub serialize_writes: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            format: RecordFormat::default(),
            serialize_writes: true,
        }
    }
}

impl LoggerOptions {
    /// Builds options from the process environment.
    ///
    /// `JSONLOG_FORMAT` selects the record format. A missing or unrecognised
    /// value keeps the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds options using `lookup` to resolve environment variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(raw) = lookup(FORMAT_ENV_VAR) {
            match raw.parse() {
                Ok(format) => options.format = format,
                Err(e) => tracing::warn!("Ignoring {}: {}", FORMAT_ENV_VAR, e),
            }
        }
        options
    }

    /// Returns these options with `format` replaced.
    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns these options with `serialize_writes` replaced.
    pub fn with_serialized_writes(mut self, serialize_writes: bool) -> Self {
        self.serialize_writes = serialize_writes;
        self
    }
}
