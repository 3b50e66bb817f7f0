//! Pluggable diagnostics sink for the resolver and loader.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity attached to a diagnostic emitted through a [`LogSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Fine-grained lookup and cache activity.
    Trace,
    /// Informational notes such as skipped malformed lines.
    Info,
    /// Recoverable problems (no resources found, mode mismatch).
    Warn,
    /// Failed operations that degraded to a fallback.
    Error,
    /// Configuration problems that abort a load.
    Fatal,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Trace => "trace",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        f.write_str(s)
    }
}

/// What: Capability receiving diagnostics from an [`crate::i18n::I18n`] instance.
///
/// Details:
/// - Any implementation may be substituted; the resolver never inspects what a sink does.
/// - Implementations must be shareable because one sink can back several instances.
pub trait LogSink: Send + Sync {
    /// Informational message.
    fn info(&self, message: &str);
    /// Trace-level message.
    fn trace(&self, message: &str);
    /// Warning.
    fn warn(&self, message: &str);
    /// Error that was recovered from.
    fn error(&self, message: &str);
    /// Fatal configuration problem.
    fn fatal(&self, message: &str);
}

/// Default sink forwarding every message to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn trace(&self, message: &str) {
        tracing::trace!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn fatal(&self, message: &str) {
        // tracing has no level above error
        tracing::error!(fatal = true, "{message}");
    }
}

/// What: Sink that keeps every message in memory.
///
/// Details:
/// - Useful for embedding applications that surface diagnostics in their own UI,
///   and for asserting on diagnostics in tests.
/// - Cloning shares the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Snapshot all recorded messages in emission order.
    ///
    /// Output:
    /// - Vector of `(Level, message)` pairs; empty if the buffer lock is poisoned.
    #[must_use]
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at exactly `level`.
    #[must_use]
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// Drop every recorded message.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.clear();
        }
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push((level, message.to_string()));
        }
    }
}

impl LogSink for MemorySink {
    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn trace(&self, message: &str) {
        self.record(Level::Trace, message);
    }

    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }

    fn fatal(&self, message: &str) {
        self.record(Level::Fatal, message);
    }
}
