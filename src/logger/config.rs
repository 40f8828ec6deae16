//! Base logger configuration that options are applied to.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

use super::error::LoggerError;

/// Severity levels understood by the logger.
///
/// `Panic` filters like `Error`; a record logged at `Panic` is written at
/// error level and then panics the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Diagnostic detail for developers
    Debug,
    /// Normal operational messages
    #[default]
    Info,
    /// Something unexpected that does not stop the program
    Warn,
    /// A failed operation
    Error,
    /// A failure the caller cannot continue from
    Panic,
}

impl LogLevel {
    /// Every supported level, from most to least verbose.
    pub const ALL: [Self; 5] = [Self::Debug, Self::Info, Self::Warn, Self::Error, Self::Panic];

    /// Returns the configuration name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Panic => "panic",
        }
    }

    /// Returns the `tracing` level records of this severity are emitted at.
    #[must_use]
    pub const fn tracing_level(self) -> Level {
        match self {
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error | Self::Panic => Level::ERROR,
        }
    }

    /// Returns the most verbose `tracing` level enabled at this severity.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error | Self::Panic => LevelFilter::ERROR,
        }
    }

    /// Returns a printable list of supported levels, e.g. `"debug", "info"`.
    #[must_use]
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|level| format!("\"{}\"", level.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LoggerError::UnknownLevel {
                value: s.to_string(),
                supported: Self::supported(),
            })
    }
}

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Output {
    /// Process standard output
    Stdout,
    /// A file, opened in append mode
    File(PathBuf),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Logger configuration that log options are applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Minimum severity that is written
    pub level: LogLevel,

    /// Destinations, each receiving every record
    pub outputs: Vec<Output>,

    /// Attach a captured backtrace to error and panic records
    pub stacktrace: bool,

    /// Record the source location of the logging call
    pub caller: bool,
}

impl LoggerConfig {
    /// Returns the configuration every initialization starts from.
    ///
    /// Records go to stdout only. Backtraces are off because root-cause
    /// detail is reported through [`crate::error::describe`] instead.
    /// Caller locations are on and point at the caller of the
    /// [`Logger`](super::Logger) method, not the method itself.
    #[must_use]
    pub fn base() -> Self {
        Self {
            level: LogLevel::default(),
            outputs: vec![Output::Stdout],
            stacktrace: false,
            caller: true,
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::base()
    }
}
