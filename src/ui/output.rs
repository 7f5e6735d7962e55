//! Output abstraction layer
//!
//! Commands write through [`OutputWriter`] so the same code can print to a
//! terminal or feed the interactive panel's status bar.

use crate::sync::{Notice, NoticeLevel};
use colored::Colorize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use catalog_filters::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new(false);
/// output.write("?search=pump&page=1");
/// output.success("Configuration written");
/// output.error("Couldn't update filters");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message (always shown)
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Clear all messages (for TUI status bars)
    fn clear(&self);

    /// Write a panel notice at its matching level
    fn notice(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => self.info(&notice.text),
            NoticeLevel::Error => self.error(&notice.text),
        }
    }
}

/// CLI implementation - writes to stdout/stderr
///
/// In quiet mode only `write` and `error` produce output.
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Whether secondary output is suppressed
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "warning:".yellow(), message);
        }
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.dimmed());
        }
    }

    fn clear(&self) {}
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

impl From<NoticeLevel> for MessageLevel {
    fn from(level: NoticeLevel) -> Self {
        match level {
            NoticeLevel::Info => Self::Info,
            NoticeLevel::Error => Self::Error,
        }
    }
}

type Entry = (MessageLevel, String, Instant);

/// Buffered writer for the TUI status bar
///
/// Messages expire after a TTL so stale notices disappear on their own.
///
/// ```
/// use catalog_filters::ui::output::{MessageLevel, OutputWriter, StatusBarWriter};
///
/// let writer = StatusBarWriter::new();
/// writer.error("Couldn't update filters");
/// assert_eq!(writer.latest_message().map(|(level, _)| level), Some(MessageLevel::Error));
/// ```
pub struct StatusBarWriter {
    messages: Mutex<Vec<Entry>>,
    ttl: Duration,
}

impl StatusBarWriter {
    /// Create a new status bar writer with default TTL (6 seconds)
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(6))
    }

    /// Create a new status bar writer with custom TTL
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Messages still within their TTL, oldest first
    #[must_use]
    pub fn recent_messages(&self) -> Vec<(MessageLevel, String)> {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .map(|(level, msg, _)| (*level, msg.clone()))
            .collect()
    }

    /// The most recent live message, if any
    #[must_use]
    pub fn latest_message(&self) -> Option<(MessageLevel, String)> {
        let now = Instant::now();
        self.lock()
            .iter()
            .rev()
            .find(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .map(|(level, msg, _)| (*level, msg.clone()))
    }

    /// Number of live messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .count()
    }

    fn add_message(&self, level: MessageLevel, message: &str) {
        let mut messages = self.lock();
        messages.push((level, message.to_string(), Instant::now()));

        if messages.len() > 100 {
            messages.drain(0..50);
        }
    }
}

impl Default for StatusBarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StatusBarWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.add_message(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_writer_quiet_flag() {
        assert!(StdoutWriter::new(true).is_quiet());
        assert!(!StdoutWriter::default().is_quiet());
    }

    #[test]
    fn test_status_bar_writer_messages() {
        let writer = StatusBarWriter::new();

        writer.success("Saved");
        writer.error("Refused");
        writer.warning("Careful");

        let messages = writer.recent_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], (MessageLevel::Success, "Saved".to_string()));
        assert_eq!(messages[1].0, MessageLevel::Error);
        assert_eq!(messages[2].0, MessageLevel::Warning);
    }

    #[test]
    fn test_notice_maps_level() {
        let writer = StatusBarWriter::new();
        writer.notice(&Notice::error("Couldn't update filters"));
        writer.notice(&Notice::info("Filters cleared"));

        let messages = writer.recent_messages();
        assert_eq!(messages[0].0, MessageLevel::Error);
        assert_eq!(messages[1].0, MessageLevel::Info);
    }

    #[test]
    fn test_status_bar_writer_clear() {
        let writer = StatusBarWriter::new();
        writer.write("Message 1");
        writer.write("Message 2");
        assert_eq!(writer.message_count(), 2);

        writer.clear();
        assert_eq!(writer.message_count(), 0);
    }

    #[test]
    fn test_status_bar_writer_ttl() {
        let writer = StatusBarWriter::with_ttl(Duration::from_millis(50));

        writer.write("Message");
        assert_eq!(writer.message_count(), 1);

        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(writer.message_count(), 0);
        assert!(writer.latest_message().is_none());
    }
}
