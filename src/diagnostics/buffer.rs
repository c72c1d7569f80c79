//! This module provides a bounded buffer for diagnostics collected from
//! `tracing` events.
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;

/// A single diagnostic captured from a `tracing` event.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The time the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// The level of the event.
    pub level: Level,
    /// The target of the event.
    pub target: String,
    /// The event message.
    pub message: String,
    /// The remaining event fields, rendered as `name=value`, in record order.
    pub fields: Vec<(String, String)>,
}

impl Diagnostic {
    /// Returns the rendered value of the field called `name`, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A shared, bounded buffer of diagnostics.
///
/// Clones share the same storage. Once `max_size` diagnostics are held, the
/// oldest is dropped to make room for the next.
#[derive(Debug, Clone)]
pub struct DiagnosticBuffer {
    /// The circular buffer of diagnostics.
    entries: Arc<Mutex<VecDeque<Diagnostic>>>,
    /// The maximum number of diagnostics to keep.
    max_size: usize,
}

impl DiagnosticBuffer {
    /// Creates a new `DiagnosticBuffer`.
    ///
    /// # Arguments
    ///
    /// * `max_size` - The maximum number of diagnostics to store. A value of
    ///   zero is treated as one.
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(max_size))),
            max_size,
        }
    }

    /// Adds a diagnostic, evicting the oldest one if the buffer is full.
    pub fn push(&self, diagnostic: Diagnostic) {
        let mut entries = self.lock();
        if entries.len() >= self.max_size {
            entries.pop_front();
        }
        entries.push_back(diagnostic);
    }

    /// Returns a copy of the buffered diagnostics, oldest first.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.lock().iter().cloned().collect()
    }

    /// Removes and returns every buffered diagnostic, oldest first.
    pub fn drain(&self) -> Vec<Diagnostic> {
        self.lock().drain(..).collect()
    }

    /// Returns the number of buffered diagnostics.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no diagnostics are buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the maximum number of diagnostics kept.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // Every critical section leaves the deque consistent; recover from poison.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Diagnostic>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for DiagnosticBuffer {
    fn default() -> Self {
        Self::new(256)
    }
}
