//! The leveled logger and its sugared variant.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;
use std::io;
use std::panic::Location;

use tracing::Dispatch;
use tracing::field::display;

use super::config::{LogLevel, LoggerConfig};
use super::sink::Destinations;

/// Emits an event through the current dispatcher at a runtime level.
macro_rules! event_at {
    ($level:expr, $($rest:tt)+) => {
        match $level {
            LogLevel::Debug => tracing::debug!($($rest)+),
            LogLevel::Info => tracing::info!($($rest)+),
            LogLevel::Warn => tracing::warn!($($rest)+),
            LogLevel::Error | LogLevel::Panic => tracing::error!($($rest)+),
        }
    };
}

/// Key-value fields attached to a structured record.
///
/// Keys keep insertion order and may repeat. `tracing` field names are
/// fixed per call site, so the pairs travel as one `fields` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(String, String)>);

impl Fields {
    /// Creates an empty field set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a field, rendering `value` with its `Display` implementation.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Adds an `error` field holding the display form of `err`.
    #[must_use]
    pub fn with_error(self, err: &dyn Error) -> Self {
        self.with("error", err)
    }

    /// Returns true if no field was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |fields, (k, v)| fields.with(k, v))
    }
}

/// A structured, leveled logger.
///
/// Records go through the logger's own dispatcher, so a `Logger` works
/// whether or not it was installed as the process-wide default. It is cheap
/// to clone and safe to use from many threads.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    destinations: Destinations,
    level: LogLevel,
    caller: bool,
    stacktrace: bool,
}

impl Logger {
    pub(crate) fn new(dispatch: Dispatch, destinations: Destinations, config: &LoggerConfig) -> Self {
        Self {
            dispatch,
            destinations,
            level: config.level,
            caller: config.caller,
            stacktrace: config.stacktrace,
        }
    }

    /// Returns the underlying dispatcher.
    #[must_use]
    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Returns the configured minimum level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns true if a record at `level` would be written.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Debug => tracing::enabled!(tracing::Level::DEBUG),
            LogLevel::Info => tracing::enabled!(tracing::Level::INFO),
            LogLevel::Warn => tracing::enabled!(tracing::Level::WARN),
            LogLevel::Error | LogLevel::Panic => tracing::enabled!(tracing::Level::ERROR),
        })
    }

    /// Logs `message` at debug level.
    #[track_caller]
    pub fn debug(&self, message: &str, fields: &Fields) {
        self.emit(LogLevel::Debug, message, fields, Location::caller());
    }

    /// Logs `message` at info level.
    #[track_caller]
    pub fn info(&self, message: &str, fields: &Fields) {
        self.emit(LogLevel::Info, message, fields, Location::caller());
    }

    /// Logs `message` at warn level.
    #[track_caller]
    pub fn warn(&self, message: &str, fields: &Fields) {
        self.emit(LogLevel::Warn, message, fields, Location::caller());
    }

    /// Logs `message` at error level.
    #[track_caller]
    pub fn error(&self, message: &str, fields: &Fields) {
        self.emit(LogLevel::Error, message, fields, Location::caller());
    }

    /// Logs `message` at error level and then panics with it.
    ///
    /// # Panics
    ///
    /// Always.
    #[track_caller]
    pub fn panic(&self, message: &str, fields: &Fields) -> ! {
        self.emit(LogLevel::Panic, message, fields, Location::caller());
        panic!("{message}");
    }

    /// Flushes every destination.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error hit while flushing.
    pub fn sync(&self) -> io::Result<()> {
        self.destinations.flush()
    }

    /// Returns the sugared variant, which takes preformatted arguments.
    #[must_use]
    pub const fn sugar(&self) -> SugaredLogger<'_> {
        SugaredLogger { logger: self }
    }

    fn emit(&self, level: LogLevel, message: &str, fields: &Fields, location: &Location<'_>) {
        let caller = self.caller.then(|| display(location));
        let fields = (!fields.is_empty()).then(|| display(fields));
        let stacktrace = (self.stacktrace && level >= LogLevel::Error)
            .then(|| display(Backtrace::force_capture()));

        tracing::dispatcher::with_default(&self.dispatch, || {
            event_at!(level, caller, fields, stacktrace, "{message}");
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("destinations", &self.destinations)
            .field("caller", &self.caller)
            .field("stacktrace", &self.stacktrace)
            .finish_non_exhaustive()
    }
}

/// A logger taking free-form formatted arguments.
///
/// Obtained from [`Logger::sugar`]; use with `format_args!`.
#[derive(Debug, Clone, Copy)]
pub struct SugaredLogger<'a> {
    logger: &'a Logger,
}

impl SugaredLogger<'_> {
    /// Logs the formatted arguments at debug level.
    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Debug, args, Location::caller());
    }

    /// Logs the formatted arguments at info level.
    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args, Location::caller());
    }

    /// Logs the formatted arguments at warn level.
    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warn, args, Location::caller());
    }

    /// Logs the formatted arguments at error level.
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Error, args, Location::caller());
    }

    /// Logs the formatted arguments at error level and then panics with them.
    ///
    /// # Panics
    ///
    /// Always.
    #[track_caller]
    pub fn panic(&self, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        self.logger
            .emit(LogLevel::Panic, &message, &Fields::new(), Location::caller());
        panic!("{message}");
    }

    /// Logs the formatted arguments at error level, then writes the detailed
    /// representation of the root cause of `err` to every destination.
    ///
    /// Avoid putting `{:?}` of any error in `args`; the root detail is
    /// already written separately.
    #[track_caller]
    pub fn unwrapped_root_detail(&self, err: &(dyn Error + 'static), args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Error, args, Location::caller());

        let detail = crate::error::describe(err).root_detail;
        if let Err(e) = self.logger.destinations.write_block(format!("{detail}\n").as_bytes()) {
            eprintln!("failed to write root cause detail: {e}");
        }
    }

    fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>, location: &Location<'_>) {
        self.logger
            .emit(level, &args.to_string(), &Fields::new(), location);
    }
}
