//! CKS: command-line skeleton with composable logging and fatal-error handling.
//!
//! The library holds everything the `cks` binary wires together:
//! - [`logger`]: logger initialization from composable options
//! - [`error`]: root-cause diagnostics and named exit strategies
//! - [`config`]: CLI and TOML settings
//! - [`console`]: timestamped printing outside the logger

pub mod config;
pub mod console;
pub mod error;
pub mod logger;
pub mod time;
