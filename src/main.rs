//! CKS: command-line skeleton with composable logger options and
//! pluggable fatal-error exit strategies.
//!
//! Entry point for the cks application.

use cks::config::{Cli, ValidatedConfig};
use cks::console::Console;
use cks::error::ExitHandler;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, init_err_handling, init_logger, print_config_hint};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    run_application(&cli, &config)
}

/// Sets up logging and exit handling, then runs the subcommand.
///
/// Fatal errors from here on end the process through the exit handler.
///
/// Excluded from coverage - exercised by the process-level tests.
#[cfg(not(tarpaulin_include))]
fn run_application(cli: &Cli, config: &ValidatedConfig) -> ExitCode {
    let mut console = Console::stdout();
    let mut handler = ExitHandler::new();

    // always first setup log system and then error handling
    let handle = init_logger(config, &mut console);
    let handle = handler.exit_on_err(handle, Vec::new());
    let teardown = handle.teardown().clone();

    let installed = handle.install();
    handler.exit_on_err(installed, vec![teardown.clone().into_cleanup()]);
    tracing::debug!("{config}");

    let strategy = init_err_handling(config, &mut handler, &mut console);
    handler.exit_on_err(strategy, vec![teardown.clone().into_cleanup()]);

    let result = run::execute(cli.command.as_ref(), config, handle.logger());
    handler.exit_on_err(result, vec![teardown.clone().into_cleanup()]);

    teardown.run();
    exit_code::SUCCESS
}
