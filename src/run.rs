//! Subcommand execution.
//!
//! Runs the selected subcommand with an initialized logger. Errors returned
//! from here are fatal and go to the exit handler.

use std::io;

use clap::CommandFactory;
use thiserror::Error;

use cks::config::{Cli, Command, ValidatedConfig};
use cks::error::{Traced, WrapErr};
use cks::logger::{Fields, Logger};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for subcommand failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to print the usage text.
    #[error("Failed to print help: {0}")]
    Help(#[source] io::Error),
}

/// Executes `command`, printing the usage text when there is none.
///
/// # Errors
///
/// Returns an error if the usage text cannot be written.
pub fn execute(
    command: Option<&Command>,
    config: &ValidatedConfig,
    logger: &Logger,
) -> Result<(), RunError> {
    match command {
        None => Cli::command().print_help().map_err(RunError::Help),
        Some(Command::Dummy) => {
            dummy(config, logger);
            Ok(())
        }
    }
}

/// Exercises the logger: a debug record, one record per setting, and a
/// nested error reported with its root cause.
fn dummy(config: &ValidatedConfig, logger: &Logger) {
    logger.debug("dummy called", &Fields::new());

    for (name, value) in config.settings() {
        logger.info(
            "Flags accessible in dummy",
            &Fields::new().with("name", name).with("value", value),
        );
    }

    if let Err(e) = nested_failure() {
        logger
            .sugar()
            .unwrapped_root_detail(&e, format_args!("get error in dummy {e}"));
    }

    if let Err(e) = logger.sync() {
        eprintln!("failed to flush logs: {e}");
    }
}

fn failing_step() -> Result<(), Traced> {
    Err(Traced::new("error occurred in dummy step"))
}

fn nested_failure() -> Result<(), Traced> {
    failing_step().wrap_err("wrapped error in dummy")
}
