//! Named strategies for reporting a fatal error before exiting.
//!
//! [`ExitHandler`] holds the active [`ExitStrategy`]. Reporting a fatal error
//! prints a message, runs the cleanup callbacks and returns a
//! [`FatalReport`]; only [`FatalReport::terminate`] ends the process.

use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use thiserror::Error;

use crate::console::Console;
use crate::time::{Clock, SystemClock};

use super::chain::describe;

/// A callback run before a fatal exit. Takes nothing and returns nothing.
pub type Cleanup<'a> = Box<dyn FnOnce() + 'a>;

/// Error type for exit handling configuration.
#[derive(Debug, Error)]
pub enum ExitError {
    /// The strategy name is not registered.
    #[error("unknown type of exit handling: {name}, only support {supported}")]
    UnknownStrategy {
        /// The rejected name
        name: String,
        /// Printable list of registered names
        supported: String,
    },
}

/// How much diagnostic detail a fatal report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExitStrategy {
    /// Only the short message of the error.
    Simple,
    /// The short message followed by the detail of the root cause.
    #[default]
    Detail,
}

impl ExitStrategy {
    /// Every registered strategy.
    pub const ALL: [Self; 2] = [Self::Simple, Self::Detail];

    /// Returns the configuration name of the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Detail => "detail",
        }
    }

    /// Returns a printable list of registered names, e.g. `"simple", "detail"`.
    #[must_use]
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|strategy| format!("\"{}\"", strategy.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders the user-facing text for `err`.
    #[must_use]
    pub fn render(self, err: &(dyn Error + 'static)) -> String {
        let description = describe(err);
        match self {
            Self::Simple => description.message,
            Self::Detail => format!("{}\n{}", description.message, description.root_detail),
        }
    }
}

impl fmt::Display for ExitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExitStrategy {
    type Err = ExitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ExitError::UnknownStrategy {
                name: s.to_string(),
                supported: Self::supported(),
            })
    }
}

/// The outcome of reporting a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalReport {
    message: String,
    failed_cleanups: usize,
}

impl FatalReport {
    /// Exit status used for every fatal error.
    pub const EXIT_CODE: i32 = 1;

    /// Returns the rendered message, without the console prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns how many cleanup callbacks panicked.
    #[must_use]
    pub const fn failed_cleanups(&self) -> usize {
        self.failed_cleanups
    }

    /// Ends the process with [`FatalReport::EXIT_CODE`].
    pub fn terminate(self) -> ! {
        std::process::exit(Self::EXIT_CODE)
    }
}

/// Reports fatal errors with the active strategy.
#[derive(Debug)]
pub struct ExitHandler<W = io::Stdout, C = SystemClock> {
    strategy: ExitStrategy,
    console: Console<W, C>,
}

impl ExitHandler {
    /// Creates a handler with the default strategy, printing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(Console::stdout())
    }
}

impl Default for ExitHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, C: Clock> ExitHandler<W, C> {
    /// Creates a handler with the default strategy, printing to `console`.
    pub fn with_console(console: Console<W, C>) -> Self {
        Self {
            strategy: ExitStrategy::default(),
            console,
        }
    }

    /// Returns the active strategy.
    pub const fn strategy(&self) -> ExitStrategy {
        self.strategy
    }

    /// Switches to the strategy registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ExitError::UnknownStrategy`] listing the registered names if
    /// `name` is unknown. The active strategy is left unchanged.
    pub fn set_strategy(&mut self, name: &str) -> Result<ExitStrategy, ExitError> {
        self.strategy = name.parse()?;
        Ok(self.strategy)
    }

    /// Reports `err` if there is one.
    ///
    /// With an error, prints the message of the active strategy, runs every
    /// cleanup in order and returns the report. A panicking cleanup does not
    /// stop the others. Without an error nothing is printed and no cleanup
    /// runs.
    pub fn handle_fatal(
        &mut self,
        err: Option<&(dyn Error + 'static)>,
        cleanups: Vec<Cleanup<'_>>,
    ) -> Option<FatalReport> {
        err.map(|err| self.report(err, cleanups))
    }

    /// Returns the value of `result`, or reports its error and exits.
    pub fn exit_on_err<T, E>(&mut self, result: Result<T, E>, cleanups: Vec<Cleanup<'_>>) -> T
    where
        E: Error + 'static,
    {
        match result {
            Ok(value) => value,
            Err(err) => self.report(&err, cleanups).terminate(),
        }
    }

    /// Returns the console the handler prints to.
    pub fn into_console(self) -> Console<W, C> {
        self.console
    }

    fn report(&mut self, err: &(dyn Error + 'static), cleanups: Vec<Cleanup<'_>>) -> FatalReport {
        let message = self.strategy.render(err);
        self.console
            .notice(format_args!("exit on fatal error: {message}"));

        let failed_cleanups = cleanups
            .into_iter()
            .map(|cleanup| panic::catch_unwind(AssertUnwindSafe(cleanup)))
            .filter(Result::is_err)
            .count();

        FatalReport {
            message,
            failed_cleanups,
        }
    }
}
