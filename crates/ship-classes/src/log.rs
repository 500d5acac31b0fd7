use std::fmt;
use std::sync::Arc;

/// Severity attached to a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// An append-only message sink.
///
/// Implementations decide where lines go (a dated file, stderr, a test
/// buffer) and stamp their own timestamps. Components receive a sink at
/// construction time rather than reaching for a global logger.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str, level: LogLevel);

    fn info(&self, message: &str) {
        self.log(message, LogLevel::Info);
    }

    fn warning(&self, message: &str) {
        self.log(message, LogLevel::Warning);
    }

    fn error(&self, message: &str) {
        self.log(message, LogLevel::Error);
    }
}

/// Sink that discards everything. Used when logging is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _message: &str, _level: LogLevel) {}
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, message: &str, level: LogLevel) {
        (**self).log(message, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_is_uppercase() {
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn level_helpers_tag_messages() {
        let sink = crate::test_support::MemorySink::default();
        sink.info("one");
        sink.warning("two");
        sink.error("three");

        let lines = sink.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], (LogLevel::Info, "one".to_owned()));
        assert_eq!(lines[1], (LogLevel::Warning, "two".to_owned()));
        assert_eq!(lines[2], (LogLevel::Error, "three".to_owned()));
    }
}
