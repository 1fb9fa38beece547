//! Syslog header scanning for Heroku log-drain lines.

use crate::entry::LogEntry;
use crate::error::{Error, Result, Stage, TimestampError};
use crate::router::{self, ROUTER_PROCID};
use crate::scanner::ScanCursor;
use chrono::{DateTime, Timelike, Utc};
use std::borrow::Cow;

/// Trait for parsing a single raw log line into an entry.
///
/// Implemented by [`HerokuParser`] and by any closure with the signature
/// `Fn(&[u8]) -> Result<LogEntry>`, so ingestion code can accept either.
pub trait LineParser {
    /// Parse one raw, non newline-terminated line.
    fn parse_line(&self, line: &[u8]) -> Result<LogEntry>;
}

impl<F> LineParser for F
where
    F: Fn(&[u8]) -> Result<LogEntry>,
{
    fn parse_line(&self, line: &[u8]) -> Result<LogEntry> {
        self(line)
    }
}

/// The RFC5424 nil value.
const NIL: &[u8] = b"-";

/// Parser for syslog lines delivered by a Heroku HTTPS log drain.
///
/// Each line has the shape
///
/// ```text
/// <frame-len> <PRI>VERSION TIMESTAMP HOSTNAME APP-NAME PROCID MSGID MSG...
/// ```
///
/// Only TIMESTAMP, APP-NAME, PROCID and MSG are read; the other fields are
/// skipped by position. APP-NAME and PROCID must carry a value: an empty or
/// nil (`-`) word there means the header fields are shifted, and the line is
/// rejected. The resulting message is `<APP-NAME>[<PROCID>]: <MSG>`,
/// where MSG is normalized by [`router::normalize`] when PROCID is `router`.
///
/// # Example
///
/// ```rust
/// use drainlog::{HerokuParser, LineParser};
///
/// let line = b"89 <45>1 2016-10-15T08:59:08.723822+00:00 host heroku web.1 - State changed from up to down";
/// let entry = HerokuParser.parse_line(line)?;
/// assert_eq!(entry.message(), "heroku[web.1]: State changed from up to down");
/// # Ok::<(), drainlog::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HerokuParser;

impl HerokuParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    fn scan(cursor: &mut ScanCursor<'_>) -> Result<LogEntry> {
        cursor.skip(2).map_err(|e| e.at(Stage::SkipToTimestamp))?;

        let time = cursor
            .next_word()
            .and_then(parse_timestamp)
            .map_err(|e| e.at(Stage::ParseTimestamp))?;

        cursor.skip(1).map_err(|e| e.at(Stage::SkipToAppName))?;

        let app = cursor
            .next_word()
            .and_then(required)
            .map_err(|e| e.at(Stage::ReadAppName))?;
        let process = cursor
            .next_word()
            .and_then(required)
            .map_err(|e| e.at(Stage::ReadProcId))?;

        cursor.skip(1).map_err(|e| e.at(Stage::SkipToMessage))?;

        let app = String::from_utf8_lossy(app);
        let process = String::from_utf8_lossy(process);
        let body = String::from_utf8_lossy(cursor.rest());

        let msg = if process == ROUTER_PROCID {
            Cow::Owned(router::normalize(&body))
        } else {
            body
        };

        tracing::trace!(app = %app, process = %process, "parsed log-drain line");

        let message = format!("{}[{}]: {}", app, process, msg);
        Ok(LogEntry::new(time, message))
    }
}

impl LineParser for HerokuParser {
    fn parse_line(&self, line: &[u8]) -> Result<LogEntry> {
        let mut cursor = ScanCursor::new(line);
        Self::scan(&mut cursor).map_err(|e| {
            tracing::trace!(error = %e, "rejected log-drain line");
            e
        })
    }
}

/// Reject an empty or nil header word.
fn required(word: &[u8]) -> Result<&[u8]> {
    if word.is_empty() || word == NIL {
        return Err(Error::missing_field(String::from_utf8_lossy(word)));
    }
    Ok(word)
}

/// Parse a TIMESTAMP word as RFC3339 with optional fractional seconds.
///
/// Only uppercase `T`/`Z` designators are accepted, and leap seconds are not.
fn parse_timestamp(word: &[u8]) -> Result<DateTime<Utc>> {
    let text = String::from_utf8_lossy(word);
    if text.contains(&['t', 'z'][..]) {
        return Err(Error::invalid_timestamp(text, TimestampError::LowercaseDesignator));
    }

    let time = DateTime::parse_from_rfc3339(&text)
        .map_err(|e| Error::invalid_timestamp(&*text, e))?;
    // chrono encodes second 60 as an overflowing nanosecond value
    if time.nanosecond() >= 1_000_000_000 {
        return Err(Error::invalid_timestamp(text, TimestampError::LeapSecond));
    }

    Ok(time.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_message() {
        let entry = HerokuParser
            .parse_line(b"89 <45>1 2016-10-15T08:59:08.723822+00:00 host heroku web.1 - State changed from up to down")
            .unwrap();
        assert_eq!(entry.message(), "heroku[web.1]: State changed from up to down");
        assert_eq!(entry.time().nanosecond(), 723_822_000);
    }

    #[test]
    fn test_timestamp_offset_normalized_to_utc() {
        let entry = HerokuParser
            .parse_line(b"70 <45>1 2016-10-15T10:59:08.5+02:00 host app web.1 - hi")
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2016, 10, 15, 8, 59, 8).unwrap()
            + chrono::Duration::milliseconds(500);
        assert_eq!(entry.time(), expected);
    }

    #[test]
    fn test_nanosecond_precision() {
        let entry = HerokuParser
            .parse_line(b"1 <1>1 2020-01-01T00:00:00.123456789Z h a p - m")
            .unwrap();
        assert_eq!(entry.time().nanosecond(), 123_456_789);
    }

    #[test]
    fn test_empty_message() {
        let entry = HerokuParser
            .parse_line(b"1 <1>1 2020-01-01T00:00:00Z h app web.1 - ")
            .unwrap();
        assert_eq!(entry.message(), "app[web.1]: ");
    }

    #[test]
    fn test_hostname_and_msgid_not_inspected() {
        let entry = HerokuParser
            .parse_line(b"1 <1>1 2020-01-01T00:00:00Z - app worker.3 anything keep  double  spaces")
            .unwrap();
        assert_eq!(entry.message(), "app[worker.3]: keep  double  spaces");
    }

    #[test]
    fn test_router_message_normalized() {
        let entry = HerokuParser
            .parse_line(b"1 <40>1 2012-11-30T06:45:26+00:00 host heroku router - at=info method=GET host=x.com connect=2ms service=7ms status=200")
            .unwrap();
        assert_eq!(entry.message(), r#"heroku[router]: info GET "x.com" 2 7 200"#);
    }

    #[test]
    fn test_router_procid_is_exact() {
        let entry = HerokuParser
            .parse_line(b"1 <40>1 2012-11-30T06:45:26+00:00 host heroku routers - host=x.com")
            .unwrap();
        assert_eq!(entry.message(), "heroku[routers]: host=x.com");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let entry = HerokuParser
            .parse_line(b"1 <1>1 2020-01-01T00:00:00Z h app web.1 - bad \xff byte")
            .unwrap();
        assert_eq!(entry.message(), "app[web.1]: bad \u{FFFD} byte");
    }

    #[test]
    fn test_error_stages() {
        let cases: &[(&str, Stage, ErrorKind)] = &[
            ("", Stage::SkipToTimestamp, ErrorKind::UnexpectedEndOfInput),
            ("89 <45>1", Stage::SkipToTimestamp, ErrorKind::UnexpectedEndOfInput),
            ("89 <45>1 2016-10-15T08:59:08Z", Stage::ParseTimestamp, ErrorKind::UnexpectedEndOfInput),
            ("89 <45>1 yesterday host", Stage::ParseTimestamp, ErrorKind::InvalidTimestamp),
            ("89 <45>1 2016-10-15T08:59:08Z host", Stage::SkipToAppName, ErrorKind::UnexpectedEndOfInput),
            ("89 <45>1 2016-10-15T08:59:08Z host heroku", Stage::ReadAppName, ErrorKind::UnexpectedEndOfInput),
            ("89 <45>1 2016-10-15T08:59:08Z host heroku web.1", Stage::ReadProcId, ErrorKind::UnexpectedEndOfInput),
            ("89 <45>1 2016-10-15T08:59:08Z host heroku web.1 -", Stage::SkipToMessage, ErrorKind::UnexpectedEndOfInput),
            ("89 <45>1 2016-10-15T08:59:08Z heroku web.1 - State changed", Stage::ReadProcId, ErrorKind::MissingField),
            ("89 <45>1 2016-10-15T08:59:08Z host - web.1 - msg", Stage::ReadAppName, ErrorKind::MissingField),
            ("89 <45>1 2016-10-15T08:59:08Z host  web.1 - msg", Stage::ReadAppName, ErrorKind::MissingField),
        ];

        for (line, stage, kind) in cases {
            let err = HerokuParser.parse_line(line.as_bytes()).unwrap_err();
            assert_eq!(err.stage(), Some(*stage), "line {:?}", line);
            assert_eq!(err.kind(), *kind, "line {:?}", line);
        }
    }

    #[test]
    fn test_timestamp_profile_is_strict() {
        for ts in ["2016-10-15t08:59:08.5Z", "2016-10-15T08:59:08.5z", "2016-12-31T23:59:60Z"] {
            let line = format!("1 <1>1 {} h app web.1 - m", ts);
            let err = HerokuParser.parse_line(line.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTimestamp, "timestamp {}", ts);
        }
    }

    #[test]
    fn test_timestamp_without_offset_rejected() {
        let err = HerokuParser
            .parse_line(b"1 <1>1 2020-01-01T00:00:00 h app web.1 - m")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTimestamp);
    }

    #[test]
    fn test_closure_as_line_parser() {
        fn run(parser: &dyn LineParser, line: &[u8]) -> Result<LogEntry> {
            parser.parse_line(line)
        }

        let upper = |line: &[u8]| -> Result<LogEntry> {
            let entry = HerokuParser.parse_line(line)?;
            let (time, message) = entry.into_parts();
            Ok(LogEntry::new(time, message.to_uppercase()))
        };

        let entry = run(&upper, b"1 <1>1 2020-01-01T00:00:00Z h app web.1 - hello").unwrap();
        assert_eq!(entry.message(), "APP[WEB.1]: HELLO");
    }
}
