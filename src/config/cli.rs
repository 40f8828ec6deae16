//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CKS: a test Kubernetes distribution
///
/// Command-line skeleton with configurable logging and
/// fatal-error reporting.
#[derive(Debug, Parser)]
#[command(name = "cks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (support "debug", "info", "warn", "error", "panic")
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// How error information is given when exiting on a fatal error (support "simple", "detail")
    #[arg(long = "err-handling", value_name = "STRATEGY", global = true)]
    pub err_handling: Option<String>,

    /// Path of the local log file, used together with --enable-log-file
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Also write logs to the local log file
    #[arg(long = "enable-log-file", global = true)]
    pub enable_log_file: bool,
}

/// Subcommands for cks
#[derive(Debug, Subcommand)]
pub enum Command {
    /// A dummy subcommand for testing purpose
    #[command(alias = "dumy")]
    Dummy,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
