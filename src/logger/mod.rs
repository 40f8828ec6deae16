//! Logger setup from composable options.
//!
//! This module provides:
//! - Log options and their composition ([`LogOption`], [`ComposedOptions`])
//! - The base configuration options are applied to ([`LoggerConfig`])
//! - Logger initialization ([`init`], [`LoggerHandle`])
//! - The structured and sugared loggers ([`Logger`], [`SugaredLogger`])
//!
//! # Option semantics
//!
//! Options may be supplied in any order and may repeat. For every kind the
//! last option wins. Each surviving option is applied with the set of all
//! kinds supplied, which lets an option depend on another kind being present:
//! a log file is only added when both [`LogOption::EnableFile`] and
//! [`LogOption::FilePath`] are supplied.
//!
//! # Ownership
//!
//! [`init`] does not touch process-wide state. The returned handle owns the
//! logger; [`LoggerHandle::install`] makes it the default for `tracing` macros.
//! Run the [`Teardown`] before replacing the logger or exiting.

mod config;
mod error;
#[allow(clippy::module_inception)]
mod logger;
mod option;
mod sink;


pub use config::{LogLevel, LoggerConfig, Output};
pub use error::LoggerError;
pub use logger::{Fields, Logger, SugaredLogger};
pub use option::{ComposedOptions, LogOption, OptionKind, OptionKinds};
pub use sink::Teardown;

use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;

use sink::Destinations;

/// An initialized logger with the configuration it was built from.
#[derive(Debug)]
pub struct LoggerHandle {
    logger: Logger,
    teardown: Teardown,
    config: LoggerConfig,
}

impl LoggerHandle {
    /// Builds a logger from a final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::OpenOutput`] if an output cannot be opened.
    pub fn build(config: LoggerConfig) -> Result<Self, LoggerError> {
        let destinations = Destinations::open(&config.outputs)?;

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(destinations.clone())
            .with_target(false)
            .with_ansi(false);

        // The configured level is final; RUST_LOG is not consulted.
        let subscriber = tracing_subscriber::registry()
            .with(config.level.filter())
            .with(layer);
        let dispatch = Dispatch::new(subscriber);

        Ok(Self {
            logger: Logger::new(dispatch, destinations.clone(), &config),
            teardown: Teardown::new(destinations),
            config,
        })
    }

    /// Returns the logger.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Returns the teardown that releases the logger's outputs.
    #[must_use]
    pub const fn teardown(&self) -> &Teardown {
        &self.teardown
    }

    /// Returns the configuration the logger was built from.
    #[must_use]
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Makes this logger the process-wide default for `tracing` macros.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::AlreadyInstalled`] if a default was already set.
    pub fn install(&self) -> Result<(), LoggerError> {
        tracing::dispatcher::set_global_default(self.logger.dispatch().clone())
            .map_err(LoggerError::AlreadyInstalled)
    }

    /// Splits the handle into the logger and its teardown.
    #[must_use]
    pub fn into_parts(self) -> (Logger, Teardown) {
        (self.logger, self.teardown)
    }
}

/// Initializes a logger from an ordered sequence of options.
///
/// Starts from [`LoggerConfig::base`], composes the options and applies the
/// survivors against the set of all kinds supplied.
///
/// # Errors
///
/// Returns the first error raised while applying an option, or an error
/// from [`LoggerHandle::build`]. No logger is returned in either case.
pub fn init<I>(options: I) -> Result<LoggerHandle, LoggerError>
where
    I: IntoIterator<Item = LogOption>,
{
    let config = configure(options)?;
    LoggerHandle::build(config)
}

/// Computes the final configuration for `options` without building a logger.
///
/// # Errors
///
/// Returns the first error raised while applying an option.
pub fn configure<I>(options: I) -> Result<LoggerConfig, LoggerError>
where
    I: IntoIterator<Item = LogOption>,
{
    let mut config = LoggerConfig::base();
    ComposedOptions::compose(options).apply(&mut config)?;
    Ok(config)
}
