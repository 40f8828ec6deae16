//! Log options and their composition.
//!
//! Options are supplied as an ordered sequence that may repeat or conflict.
//! [`ComposedOptions`] keeps the last option of each kind and records the set
//! of kinds that appeared, so an option can react to the presence of another
//! kind when it is applied.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use bitflags::bitflags;

use super::config::{LogLevel, LoggerConfig, Output};
use super::error::LoggerError;

bitflags! {
    /// Set of option kinds present in one initialization call.
    ///
    /// Every kind owns exactly one bit. A new kind must take an unused bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OptionKinds: u16 {
        /// The log level option
        const LOG_LEVEL = 1 << 0;
        /// The enable-file-output option
        const ENABLE_FILE = 1 << 1;
        /// The file-output-path option
        const FILE_PATH = 1 << 2;
    }
}

/// The kind of a [`LogOption`], independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKind {
    /// See [`LogOption::Level`]
    LogLevel,
    /// See [`LogOption::EnableFile`]
    EnableFile,
    /// See [`LogOption::FilePath`]
    FilePath,
}

impl OptionKind {
    /// Returns the bit this kind occupies in an [`OptionKinds`] set.
    #[must_use]
    pub const fn flag(self) -> OptionKinds {
        match self {
            Self::LogLevel => OptionKinds::LOG_LEVEL,
            Self::EnableFile => OptionKinds::ENABLE_FILE,
            Self::FilePath => OptionKinds::FILE_PATH,
        }
    }
}

/// A single logger configuration directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOption {
    /// Sets the minimum level that is written.
    Level(LogLevel),

    /// Enables file output.
    ///
    /// Inert on its own: a file is added only when a
    /// [`LogOption::FilePath`] is supplied in the same call.
    EnableFile,

    /// Names the log file.
    ///
    /// Inert unless [`LogOption::EnableFile`] is supplied in the same call.
    /// No rotation is done.
    FilePath(PathBuf),
}

impl LogOption {
    /// Creates a level option from its configuration name.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::UnknownLevel`] listing the accepted names if
    /// `level` is not one of them.
    pub fn level(level: &str) -> Result<Self, LoggerError> {
        level.parse().map(Self::Level)
    }

    /// Creates an option that enables file output.
    #[must_use]
    pub const fn enable_file() -> Self {
        Self::EnableFile
    }

    /// Creates an option naming the log file.
    #[must_use]
    pub fn file_path(path: impl Into<PathBuf>) -> Self {
        Self::FilePath(path.into())
    }

    /// Returns the kind of this option.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        match self {
            Self::Level(_) => OptionKind::LogLevel,
            Self::EnableFile => OptionKind::EnableFile,
            Self::FilePath(_) => OptionKind::FilePath,
        }
    }

    /// Applies this option to `config`.
    ///
    /// `active` is the set of every kind supplied in the same call, not only
    /// this option's kind. Each option touches a disjoint part of the
    /// configuration (outputs are only ever appended to), so the order in
    /// which distinct kinds are applied does not change the result.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidFilePath`] if a file path that would be
    /// added to the outputs is unusable.
    pub fn apply(&self, active: OptionKinds, config: &mut LoggerConfig) -> Result<(), LoggerError> {
        match self {
            Self::Level(level) => config.level = *level,
            // Only the path option can finally enable the file.
            Self::EnableFile => {}
            Self::FilePath(path) => {
                let required = OptionKinds::ENABLE_FILE | OptionKinds::FILE_PATH;
                if active.contains(required) {
                    validate_file_path(path)?;
                    config.outputs.push(Output::File(path.clone()));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for LogOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "level={level}"),
            Self::EnableFile => f.write_str("enable-file"),
            Self::FilePath(path) => write!(f, "file={}", path.display()),
        }
    }
}

fn validate_file_path(path: &Path) -> Result<(), LoggerError> {
    let reason = if path.as_os_str().is_empty() {
        "path is empty"
    } else if path.file_name().is_none() {
        "path does not name a file"
    } else {
        return Ok(());
    };

    Err(LoggerError::InvalidFilePath {
        path: path.to_path_buf(),
        reason,
    })
}

/// Options reduced to one per kind, plus the set of kinds supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedOptions {
    options: BTreeMap<OptionKind, LogOption>,
    active: OptionKinds,
}

impl ComposedOptions {
    /// Composes an ordered sequence of options.
    ///
    /// For every kind the last option supplied wins. Composition never
    /// fails; invalid values surface when the result is applied.
    pub fn compose<I>(options: I) -> Self
    where
        I: IntoIterator<Item = LogOption>,
    {
        let mut composed = Self::default();
        for option in options {
            let kind = option.kind();
            composed.active |= kind.flag();
            composed.options.insert(kind, option);
        }
        composed
    }

    /// Returns the set of kinds supplied.
    #[must_use]
    pub const fn active(&self) -> OptionKinds {
        self.active
    }

    /// Iterates over the surviving options in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &LogOption> {
        self.options.values()
    }

    /// Applies every surviving option to `config`.
    ///
    /// # Errors
    ///
    /// Stops at the first option that fails and returns its error.
    pub fn apply(&self, config: &mut LoggerConfig) -> Result<(), LoggerError> {
        self.iter()
            .try_for_each(|option| option.apply(self.active, config))
    }
}

impl FromIterator<LogOption> for ComposedOptions {
    fn from_iter<I: IntoIterator<Item = LogOption>>(iter: I) -> Self {
        Self::compose(iter)
    }
}
