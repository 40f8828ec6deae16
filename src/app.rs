//! Application startup and utilities.
//!
//! This module contains exit codes, the logger and exit handling setup,
//! and error hints that support the main entry point.

use std::io::Write;

use cks::config::{ConfigError, ValidatedConfig};
use cks::console::Console;
use cks::error::{ExitError, ExitHandler, ExitStrategy};
use cks::logger::{self, LoggerError, LoggerHandle};
use cks::time::Clock;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable config file, bad TOML, unknown log level.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } => {
            eprintln!("\nCheck the --config path; no default location is searched.");
        }
        ConfigError::TomlParse(_) => {
            eprintln!("\nAccepted sections are [log] (level, file, enable_file) and [errors] (handling).");
        }
        ConfigError::Logging(LoggerError::InvalidFilePath { .. }) => {
            eprintln!("\nThe log file path must name a file, e.g. --log-file /var/log/cks.log");
        }
        _ => {}
    }
}

/// Builds the logger from the configured options.
///
/// # Errors
///
/// Returns an error if an option is invalid or an output cannot be opened.
pub fn init_logger<W: Write, C: Clock>(
    config: &ValidatedConfig,
    console: &mut Console<W, C>,
) -> Result<LoggerHandle, LoggerError> {
    console.notice("start to init log system.");
    logger::init(config.log_options.iter().cloned())
}

/// Switches the exit handler to the configured strategy.
///
/// # Errors
///
/// Returns an error if the strategy name is not registered.
pub fn init_err_handling<W: Write, C: Clock>(
    config: &ValidatedConfig,
    handler: &mut ExitHandler<W, C>,
    console: &mut Console<W, C>,
) -> Result<ExitStrategy, ExitError> {
    console.notice("start to init error handling.");
    let strategy = handler.set_strategy(&config.err_handling)?;
    console.notice(format_args!("{strategy} information is enabled for exit handling."));
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cks::config::Cli;
    use cks::time::FixedClock;
    use std::time::{Duration, UNIX_EPOCH};

    fn config(args: &[&str]) -> ValidatedConfig {
        let mut full_args = vec!["cks"];
        full_args.extend(args);
        ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
    }

    fn test_console() -> Console<Vec<u8>, FixedClock> {
        Console::new(Vec::new(), FixedClock(UNIX_EPOCH + Duration::from_secs(1_592_224_496)))
    }

    #[test]
    fn init_logger_announces_and_builds() {
        let mut console = test_console();

        let handle = init_logger(&config(&["--log-level", "warn"]), &mut console).unwrap();

        assert_eq!(handle.config().level, cks::logger::LogLevel::Warn);
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            out,
            "Mon Jun 15 12:34:56.0000 UTC 2020 * * * * * * start to init log system.\n"
        );
    }

    #[test]
    fn init_err_handling_switches_strategy() {
        let mut console = test_console();
        let mut handler = ExitHandler::with_console(test_console());

        let strategy =
            init_err_handling(&config(&["--err-handling", "detail"]), &mut handler, &mut console)
                .unwrap();

        assert_eq!(strategy, ExitStrategy::Detail);
        assert_eq!(handler.strategy(), ExitStrategy::Detail);
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.contains("start to init error handling."));
        assert!(out.contains("detail information is enabled for exit handling."));
    }

    #[test]
    fn init_err_handling_rejects_unknown_name() {
        let mut console = test_console();
        let mut handler = ExitHandler::with_console(test_console());
        handler.set_strategy("simple").unwrap();

        let err = init_err_handling(&config(&["--err-handling", "bogus"]), &mut handler, &mut console)
            .unwrap_err();

        assert!(err.to_string().contains("bogus"));
        assert_eq!(handler.strategy(), ExitStrategy::Simple);
    }
}
