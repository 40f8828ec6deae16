//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. Log levels are validated during construction; the
//! exit handling name is validated when it is applied to the exit handler.

use std::fmt;
use std::path::PathBuf;

use crate::logger::{LogOption, configure};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::{LogSection, TomlConfig};

/// Configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Logger options in precedence order: defaults, TOML, then CLI
    pub log_options: Vec<LogOption>,

    /// Exit handling strategy name (CLI > TOML > default)
    pub err_handling: String,

    /// Path of the configuration file that was read, if any
    pub config_file: Option<PathBuf>,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self
            .log_options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let config_file = self
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ log_options: [{options}], err_handling: {}, config_file: {config_file} }}",
            self.err_handling,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if a log level from either source is not supported.
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let mut log_options = vec![LogOption::Level(defaults::LOG_LEVEL)];

        if let Some(toml) = toml {
            log_options.extend(Self::toml_log_options(&toml.log)?);
        }
        log_options.extend(Self::cli_log_options(cli)?);

        let err_handling = cli
            .err_handling
            .clone()
            .or_else(|| toml.and_then(|t| t.errors.handling.clone()))
            .unwrap_or_else(|| defaults::ERR_HANDLING.to_string());

        Ok(Self {
            log_options,
            err_handling,
            config_file: cli.config.clone(),
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Lists every effective setting as name/value pairs.
    #[must_use]
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        let config = configure(self.log_options.iter().cloned()).ok();
        let level = config
            .as_ref()
            .map_or_else(|| "invalid".to_string(), |c| c.level.to_string());
        let outputs = config.as_ref().map_or_else(
            || "invalid".to_string(),
            |c| {
                c.outputs
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            },
        );

        vec![
            ("log-level", level),
            ("log-outputs", outputs),
            ("err-handling", self.err_handling.clone()),
        ]
    }

    fn toml_log_options(section: &LogSection) -> Result<Vec<LogOption>, ConfigError> {
        let mut options = Vec::new();
        if let Some(ref level) = section.level {
            options.push(LogOption::level(level)?);
        }
        if section.enable_file {
            options.push(LogOption::enable_file());
        }
        if let Some(ref path) = section.file {
            options.push(LogOption::file_path(path));
        }
        Ok(options)
    }

    fn cli_log_options(cli: &Cli) -> Result<Vec<LogOption>, ConfigError> {
        let mut options = Vec::new();
        if let Some(ref level) = cli.log_level {
            options.push(LogOption::level(level)?);
        }
        if cli.enable_log_file {
            options.push(LogOption::enable_file());
        }
        if let Some(ref path) = cli.log_file {
            options.push(LogOption::file_path(path));
        }
        Ok(options)
    }
}
