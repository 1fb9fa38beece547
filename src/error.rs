//! Error types for the drainlog library.

use std::fmt;
use thiserror::Error;

/// Result type alias for drainlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing a log-drain line.
#[derive(Error, Debug)]
pub enum Error {
    /// A required space-delimited boundary was not found before the line ended.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// The TIMESTAMP field is not a valid RFC3339 timestamp.
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: TimestampError,
    },

    /// A header field that must carry a value is empty or the nil value `-`.
    #[error("field is empty or nil ('{value}')")]
    MissingField { value: String },

    /// A lower-level error annotated with the header stage that produced it.
    #[error("failed to {stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

/// Reasons a TIMESTAMP word is rejected.
#[derive(Error, Debug)]
pub enum TimestampError {
    /// The word does not match the RFC3339 grammar.
    #[error(transparent)]
    Format(#[from] chrono::ParseError),

    /// The `T` or `Z` designator is lowercase.
    #[error("lowercase 't' or 'z' designator")]
    LowercaseDesignator,

    /// The seconds field is 60.
    #[error("leap second is not accepted")]
    LeapSecond,
}

/// The class of an [`Error`], independent of any stage context around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::UnexpectedEndOfInput`].
    UnexpectedEndOfInput,
    /// See [`Error::InvalidTimestamp`].
    InvalidTimestamp,
    /// See [`Error::MissingField`].
    MissingField,
}

/// The header scanning steps, in the order they are performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Skipping the frame length and PRI/VERSION.
    SkipToTimestamp,
    /// Reading and parsing TIMESTAMP.
    ParseTimestamp,
    /// Skipping HOSTNAME.
    SkipToAppName,
    /// Reading APP-NAME.
    ReadAppName,
    /// Reading PROCID.
    ReadProcId,
    /// Skipping MSGID.
    SkipToMessage,
}

impl Stage {
    /// Human-readable description, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::SkipToTimestamp => "skip to TIMESTAMP",
            Stage::ParseTimestamp => "parse TIMESTAMP",
            Stage::SkipToAppName => "skip to APP-NAME",
            Stage::ReadAppName => "read APP-NAME",
            Stage::ReadProcId => "read PROCID",
            Stage::SkipToMessage => "skip to MSG",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Create a new invalid timestamp error.
    pub fn invalid_timestamp(value: impl Into<String>, source: impl Into<TimestampError>) -> Self {
        Self::InvalidTimestamp {
            value: value.into(),
            source: source.into(),
        }
    }

    /// Create a new missing field error.
    pub fn missing_field(value: impl Into<String>) -> Self {
        Self::MissingField {
            value: value.into(),
        }
    }

    /// Wrap this error with the stage it occurred in.
    pub fn at(self, stage: Stage) -> Self {
        Self::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The underlying error class, looking through any stage context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnexpectedEndOfInput => ErrorKind::UnexpectedEndOfInput,
            Error::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
            Error::MissingField { .. } => ErrorKind::MissingField,
            Error::Stage { source, .. } => source.kind(),
        }
    }

    /// The outermost stage this error was annotated with, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
