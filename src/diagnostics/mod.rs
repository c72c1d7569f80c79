//! This module contains the side channel used to report logger failures.
//!
//! Failures are emitted as `tracing` events under the [`TARGET`] target, so
//! they never go through the log file itself. When no subscriber is listening
//! they are printed to standard error. It also includes a `tracing` layer and
//! a bounded buffer for collecting those events, and a helper that installs a
//! stderr subscriber.
pub mod buffer;
pub mod collector;
pub mod setup;

pub use buffer::{Diagnostic, DiagnosticBuffer};
pub use collector::DiagnosticCollector;
pub use setup::init_stderr;

use crate::logging::LoggerError;
use std::path::Path;
use tracing::{error, Level};

/// The `tracing` target of every diagnostic emitted by this crate.
pub const TARGET: &str = "jsonlog";

/// Reports a failed append on the diagnostic channel.
pub(crate) fn report_write_failure(path: &Path, err: &LoggerError) {
    if tracing::enabled!(target: TARGET, Level::ERROR) {
        error!(target: TARGET, path = %path.display(), error = %err, "Failed to log message");
    } else {
        eprintln!("{}", stderr_line(err));
    }
}

/// Formats the stderr fallback. `err` already names the path.
fn stderr_line(err: &LoggerError) -> String {
    format!("Failed to log message: {}", err)
}
