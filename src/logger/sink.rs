//! Output destinations and logger teardown.
//!
//! Every record is written to all destinations. Files are written through
//! as each record is formatted, so nothing is lost if the process ends
//! without a teardown.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use crate::error::Cleanup;

use super::config::Output;
use super::error::LoggerError;

/// The combined writer of one logger.
///
/// Cloning is cheap; clones write to the same destinations.
#[derive(Clone)]
pub(crate) struct Destinations {
    writer: Arc<BoxMakeWriter>,
    count: usize,
}

impl Destinations {
    /// Opens every output and fans records out to all of them.
    ///
    /// Nothing is kept open if any output fails.
    pub(crate) fn open(outputs: &[Output]) -> Result<Self, LoggerError> {
        let writer = outputs.iter().try_fold(None::<BoxMakeWriter>, |combined, output| {
            let next = match output {
                Output::Stdout => BoxMakeWriter::new(io::stdout),
                Output::File(path) => BoxMakeWriter::new(file_appender(path)?),
            };
            Ok::<_, LoggerError>(Some(match combined {
                Some(combined) => BoxMakeWriter::new(combined.and(next)),
                None => next,
            }))
        })?;

        Ok(Self {
            writer: Arc::new(writer.unwrap_or_else(|| BoxMakeWriter::new(io::sink))),
            count: outputs.len(),
        })
    }

    /// Writes a raw block to every destination.
    pub(crate) fn write_block(&self, buf: &[u8]) -> io::Result<()> {
        self.writer.make_writer().write_all(buf)
    }

    pub(crate) fn flush(&self) -> io::Result<()> {
        self.writer.make_writer().flush()
    }
}

impl fmt::Debug for Destinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Destinations").field(&self.count).finish()
    }
}

impl<'a> MakeWriter<'a> for Destinations {
    type Writer = <BoxMakeWriter as MakeWriter<'a>>::Writer;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer.make_writer()
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.writer.make_writer_for(meta)
    }
}

/// Opens `path` for appending, creating it and its parent directories.
fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggerError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggerError::InvalidFilePath {
            path: path.to_path_buf(),
            reason: "path does not name a file",
        })?;
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .map_err(|source| LoggerError::OpenOutput {
            path: path.to_path_buf(),
            source,
        })
}

/// Releases the resources of an initialized logger.
///
/// Running it flushes every destination. Running it more than once, or
/// running the [`Teardown::noop`] stand-in, is harmless. Files are closed
/// once the last clone of the logger is dropped.
#[derive(Clone, Default)]
pub struct Teardown {
    inner: Option<Arc<TeardownInner>>,
}

struct TeardownInner {
    destinations: Destinations,
    done: AtomicBool,
}

impl Teardown {
    pub(crate) fn new(destinations: Destinations) -> Self {
        Self {
            inner: Some(Arc::new(TeardownInner {
                destinations,
                done: AtomicBool::new(false),
            })),
        }
    }

    /// A teardown with nothing to release, for call sites where
    /// initialization never produced a logger.
    #[must_use]
    pub const fn noop() -> Self {
        Self { inner: None }
    }

    /// Flushes the destinations. Only the first call has effect.
    pub fn run(&self) {
        let Some(inner) = &self.inner else {
            return;
        };
        if inner.done.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = inner.destinations.flush() {
            eprintln!("failed to flush log outputs: {e}");
        }
    }

    /// Returns true once [`Teardown::run`] has been called.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.done.load(Ordering::SeqCst))
    }

    /// Converts the teardown into a cleanup callback for the exit handler.
    #[must_use]
    pub fn into_cleanup(self) -> Cleanup<'static> {
        Box::new(move || self.run())
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("noop", &self.inner.is_none())
            .field("done", &self.is_done())
            .finish()
    }
}
