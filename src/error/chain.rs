//! Root-cause extraction over chains of wrapped errors.
//!
//! The inner cause of an error is its [`Error::source`]. Walks are iterative
//! and stop after [`MAX_CHAIN_DEPTH`] links, so a cyclic chain cannot hang
//! the caller; the last error reached is then treated as the root.

use std::error::Error;
use std::iter::FusedIterator;

/// Maximum number of links followed from the outermost error.
pub const MAX_CHAIN_DEPTH: usize = 64;

/// Iterator over an error and its inner causes, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
    remaining: usize,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.remaining > 0 {
            self.remaining -= 1;
            self.next = current.source();
        }
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Returns an iterator over `err` and its inner causes.
///
/// Yields at most `MAX_CHAIN_DEPTH + 1` errors.
#[must_use]
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain {
        next: Some(err),
        remaining: MAX_CHAIN_DEPTH,
    }
}

/// Returns the innermost cause of `err`, or `err` itself if it wraps nothing.
#[must_use]
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    chain(err).last().unwrap_or(err)
}

/// The two views of an error reported for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// Display form of the outermost error, including the context added
    /// while it was wrapped
    pub message: String,

    /// Debug form of the root cause, including where it was created when
    /// the error records that
    pub root_detail: String,
}

/// Splits `err` into its short message and the detail of its root cause.
///
/// Does no I/O; printing the result is up to the caller.
#[must_use]
pub fn describe(err: &(dyn Error + 'static)) -> Description {
    Description {
        message: err.to_string(),
        root_detail: format!("{:?}", root_cause(err)),
    }
}
