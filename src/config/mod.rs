//! Configuration layer for CKS.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Logging settings are not merged field by field. They are turned into one
//! ordered list of [`LogOption`](crate::logger::LogOption)s (defaults, then
//! TOML, then CLI) and the logger keeps the last option of each kind.
//!
//! # Boolean Flag Semantics
//!
//! `--enable-log-file` uses OR semantics: if set in either CLI or TOML, file
//! output is enabled. Flags only enable, never disable.
//!
//! The log file is written only when it is both enabled and given a path,
//! from any combination of sources.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{ErrorsSection, LogSection, TomlConfig};
pub use validated::ValidatedConfig;
