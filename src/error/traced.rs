//! An error type that records where it was created.

use std::error::Error;
use std::fmt;
use std::panic::Location;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error with a message, the source location it was created at, and an
/// optional inner cause.
///
/// `Display` shows the message followed by the inner cause, if any.
/// `Debug` additionally shows the creation location of every link, which is
/// what the exit handler prints as root-cause detail.
pub struct Traced {
    message: String,
    location: &'static Location<'static>,
    source: Option<BoxError>,
}

impl Traced {
    /// Creates an error without an inner cause.
    #[track_caller]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
            source: None,
        }
    }

    /// Wraps `source` with a message giving context.
    #[track_caller]
    #[must_use]
    pub fn wrap<E>(source: E, message: impl Into<String>) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            message: message.into(),
            location: Location::caller(),
            source: Some(source.into()),
        }
    }

    /// Returns the message, without the inner cause.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns where the error was created.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {source}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl fmt::Debug for Traced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n    at {}", self.message, self.location)?;
        if let Some(source) = &self.source {
            write!(f, "\ncaused by: {source:?}")?;
        }
        Ok(())
    }
}

impl Error for Traced {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

/// Adds context to the error of a `Result`.
pub trait WrapErr<T> {
    /// Wraps the error with `message`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error if `self` is an error.
    fn wrap_err(self, message: impl Into<String>) -> Result<T, Traced>;

    /// Wraps the error with a lazily built message.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error if `self` is an error.
    fn wrap_err_with<M, F>(self, message: F) -> Result<T, Traced>
    where
        M: Into<String>,
        F: FnOnce() -> M;
}

impl<T, E> WrapErr<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn wrap_err(self, message: impl Into<String>) -> Result<T, Traced> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(Traced::wrap(e, message)),
        }
    }

    #[track_caller]
    fn wrap_err_with<M, F>(self, message: F) -> Result<T, Traced>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(Traced::wrap(e, message())),
        }
    }
}
