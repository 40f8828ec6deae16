//! Error types for logger configuration and initialization.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for logger setup.
///
/// The first two variants are raised while options are parsed or applied.
/// The rest are raised while the logger is built or installed.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The log level string is not one of the supported levels.
    #[error("unsupported log level: {value}, only support {supported}")]
    UnknownLevel {
        /// The rejected value
        value: String,
        /// Printable list of accepted values
        supported: String,
    },

    /// A log file path cannot be used as an output destination.
    #[error("invalid log file path '{}': {reason}", path.display())]
    InvalidFilePath {
        /// The rejected path
        path: PathBuf,
        /// Reason for invalidity
        reason: &'static str,
    },

    /// An output destination could not be opened.
    #[error("failed to open log output '{}': {source}", path.display())]
    OpenOutput {
        /// Path of the destination
        path: PathBuf,
        /// Underlying appender error
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    /// A process-wide logger has already been installed.
    #[error("failed to install global logger: {0}")]
    AlreadyInstalled(#[source] tracing::dispatcher::SetGlobalDefaultError),
}
