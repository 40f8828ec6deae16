//! Default values for configuration options.

use crate::logger::LogLevel;

/// Default log level.
pub const LOG_LEVEL: LogLevel = LogLevel::Info;

/// Default exit handling strategy name.
///
/// The exit handler itself starts on `detail` so that failures before the
/// settings are applied carry full detail.
pub const ERR_HANDLING: &str = "simple";
