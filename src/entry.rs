//! The parsed representation of a single log-drain line.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed log entry: when the event happened and what was logged.
///
/// Entries are only produced by a successful parse and cannot be modified
/// afterwards; use [`LogEntry::into_parts`] to take ownership of the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogEntry {
    /// The event timestamp, normalized to UTC.
    time: DateTime<Utc>,
    /// The rendered message, `<APP-NAME>[<PROCID>]: <MSG>`.
    message: String,
}

impl LogEntry {
    pub(crate) fn new(time: DateTime<Utc>, message: String) -> Self {
        Self { time, message }
    }

    /// Get the event timestamp.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Get the rendered message.
    ///
    /// # Example
    ///
    /// ```rust
    /// let entry = drainlog::parse(
    ///     b"89 <45>1 2016-10-15T08:59:08.723822+00:00 host heroku web.1 - State changed from up to down",
    /// )?;
    /// assert_eq!(entry.message(), "heroku[web.1]: State changed from up to down");
    /// # Ok::<(), drainlog::Error>(())
    /// ```
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume the entry, returning its timestamp and message.
    pub fn into_parts(self) -> (DateTime<Utc>, String) {
        (self.time, self.message)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.message
        )
    }
}
