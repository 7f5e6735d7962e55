//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! The library only emits events; the binary decides where they go.
//!
//! # Log Levels
//!
//! - `warn`: refused navigations
//! - `info`: command progress
//! - `debug`: commits, reconciliations, skipped writes
//! - `trace`: keystrokes, suppressed reconciliations, timer bookkeeping
//!
//! The interactive panel owns the terminal, so logs from `browse` should go
//! to a file with `--log-file`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-field human-readable lines
    #[default]
    Full,
    /// Shorter single-line records
    Compact,
}

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for this crate when `RUST_LOG` is unset
    pub level: Level,
    /// Include timestamps
    pub with_timestamps: bool,
    /// Include the module path
    pub with_target: bool,
    /// Use ANSI colors (forced off for files)
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Write to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from the number of `-v` flags
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+ (`-vvv`): trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    /// Set output format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable timestamps
    #[must_use]
    pub const fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    /// Set the log file path (stderr when `None`)
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Filter directive used when `RUST_LOG` is unset
    #[must_use]
    pub fn default_directive(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        format!("warn,catalog_filters={level}")
    }
}

/// Install the global subscriber
///
/// Call once at startup. A second call leaves the first subscriber in place.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let file_config = LogConfig {
            with_ansi: false,
            with_timestamps: true,
            ..config.clone()
        };
        init_logging_with_writer(&file_config, SharedFileWriter::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Install the global subscriber with a custom writer
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match (config.format, config.with_timestamps) {
        (LogFormat::Full, true) => registry.with(layer).try_init(),
        (LogFormat::Full, false) => registry.with(layer.without_time()).try_init(),
        (LogFormat::Compact, true) => registry.with(layer.compact()).try_init(),
        (LogFormat::Compact, false) => registry.with(layer.compact().without_time()).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// `RUST_LOG` wins over the configured level
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_directive()))
}
