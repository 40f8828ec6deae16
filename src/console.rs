//! Timestamped console printing.
//!
//! Used for start-up notices and fatal reports, which may be printed before
//! the logger exists or after it has been torn down.

use std::fmt;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use time::OffsetDateTime;
use time::macros::format_description;

use crate::time::{Clock, SystemClock};

/// Separator between the timestamp and the message.
const SEPARATOR: &str = "* * * * * *";

/// Writes `<timestamp> * * * * * * <message>` lines.
#[derive(Debug)]
pub struct Console<W = io::Stdout, C = SystemClock> {
    out: W,
    clock: C,
}

impl Console {
    /// Creates a console printing to stdout with the system clock.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), SystemClock)
    }
}

impl<W: Write, C: Clock> Console<W, C> {
    /// Creates a console over any writer and clock.
    pub const fn new(out: W, clock: C) -> Self {
        Self { out, clock }
    }

    /// Prints one stamped line.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying writer.
    pub fn println(&mut self, message: impl fmt::Display) -> io::Result<()> {
        let stamp = format_timestamp(self.clock.now());
        writeln!(self.out, "{stamp} {SEPARATOR} {message}")?;
        self.out.flush()
    }

    /// Prints one stamped line, reporting write failures on stderr.
    pub fn notice(&mut self, message: impl fmt::Display) {
        if let Err(e) = self.println(message) {
            eprintln!("failed to write to console: {e}");
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Formats an instant as `Mon Jan 2 15:04:05.0000 UTC 2006`.
///
/// Falls back to seconds since the Unix epoch if the instant is out of the
/// representable range.
#[must_use]
pub fn format_timestamp(instant: SystemTime) -> String {
    let format = format_description!(
        "[weekday repr:short] [month repr:short] [day padding:none] [hour]:[minute]:[second].[subsecond digits:4] UTC [year]"
    );

    OffsetDateTime::from(instant).format(format).unwrap_or_else(|_| {
        let secs = instant
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_secs());
        format!("{secs}s")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use std::time::Duration;

    /// 2020-06-15 12:34:56.789 UTC, a Monday.
    fn instant() -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(1_592_224_496_789)
    }

    #[test]
    fn timestamp_layout() {
        assert_eq!(
            format_timestamp(instant()),
            "Mon Jun 15 12:34:56.7890 UTC 2020"
        );
    }

    #[test]
    fn day_is_not_padded() {
        let instant = UNIX_EPOCH + Duration::from_secs(1_577_934_245); // 2020-01-02 03:04:05
        assert_eq!(
            format_timestamp(instant),
            "Thu Jan 2 03:04:05.0000 UTC 2020"
        );
    }

    #[test]
    fn println_prefixes_timestamp() {
        let mut console = Console::new(Vec::new(), FixedClock(instant()));
        console.println("start to init log system.").unwrap();
        console.println(format_args!("{} is enabled", "detail")).unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            out,
            "Mon Jun 15 12:34:56.7890 UTC 2020 * * * * * * start to init log system.\n\
             Mon Jun 15 12:34:56.7890 UTC 2020 * * * * * * detail is enabled\n"
        );
    }
}
