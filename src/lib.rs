//! # drainlog - Heroku Log-Drain Line Parser
//!
//! A Rust library for parsing the syslog lines that Heroku delivers through
//! HTTPS log drains (RFC5424-style framing, one entry per line).
//!
//! This library provides functionality to:
//! - Extract the timestamp and a readable message from a single drain line
//! - Rewrite Heroku router logs (`key=value` tokens) into a positional form
//! - Plug custom line parsers into ingestion code through the [`LineParser`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! let line = br#"1119 <40>1 2012-11-30T06:45:26+00:00 host heroku router - at=info method=GET path="/" host=example.com connect=1ms service=12ms status=200 bytes=512"#;
//!
//! let entry = drainlog::parse(line)?;
//! println!("{}", entry.time());
//! assert_eq!(
//!     entry.message(),
//!     r#"heroku[router]: info GET "/" "example.com" 1 12 200 512"#
//! );
//! # Ok::<(), drainlog::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Zero-copy Scanning**: header fields are located with a cursor over the borrowed input
//! - **All-or-nothing Results**: a line either yields a complete [`LogEntry`] or an [`Error`]
//!   naming the header stage that failed
//! - **Tracing**: rejected lines and pass-through router tokens are reported as `tracing` events
//! - **Optional Serde Support**: Serialize/deserialize entries when the `serde` feature is enabled

pub mod entry;
pub mod error;
pub mod parser;
pub mod router;

mod scanner;

// Re-export main types for convenience
pub use entry::LogEntry;
pub use error::{Error, ErrorKind, Result, Stage, TimestampError};
pub use parser::{HerokuParser, LineParser};

/// Parse a single Heroku log-drain line.
///
/// Shorthand for `HerokuParser.parse_line(line)`.
pub fn parse(line: &[u8]) -> Result<LogEntry> {
    HerokuParser.parse_line(line)
}
