//! # Calculation Errors
//!
//! Every fallible operation in this crate returns [`NauticalError`]. Errors are
//! handed straight back to the caller; nothing is retried or replaced with a
//! default value inside the library.

use crate::units::UnitKind;
use std::fmt;
use thiserror::Error;

/// Alias for a `Result<T, NauticalError>`.
pub type Result<T> = std::result::Result<T, NauticalError>;

/// Which side of a conversion carried the unregistered unit tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitSide {
    From,
    To,
}

impl fmt::Display for UnitSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSide::From => f.write_str("from"),
            UnitSide::To => f.write_str("to"),
        }
    }
}

/// Errors produced by parsing, validation and conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NauticalError {
    /// A numeric value fell outside its documented bound
    #[error("{field} not in range ({min}, {max}): {value:.2}")]
    Range {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Point text did not split into 2 or 3 comma separated fields
    #[error("number of fields to parse should be 2 or 3: {count}")]
    Arity { count: usize },

    /// A text field was not a valid number
    #[error("invalid number: \"{text}\"")]
    NumberFormat { text: String },

    /// Unit tag not registered for the kind
    #[error("no matching {kind} units ({side}) for value: {tag}")]
    UnknownUnit {
        kind: UnitKind,
        side: UnitSide,
        tag: u8,
    },

    /// Area boundary needs at least two points
    #[error("boundary must contain at least 2 points: {count}")]
    DegenerateBoundary { count: usize },

    /// Separated meridiem token other than `am`/`pm`
    #[error("failed to find meridiem value: {token}")]
    BadMeridiem { token: String },

    /// Clock operation not allowed in the current format
    #[error("invalid clock format state: {reason}")]
    InvalidFormatState { reason: &'static str },

    /// Clock text without an `H:MM` prefix
    #[error("failed to parse time string: {text}")]
    MalformedTime { text: String },

    /// Stored timestamp not in `%Y-%m-%d %H:%M:%S` form
    #[error("timestamp parse failed: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Timestamp lies after the reference instant
    #[error("timestamp is in the future: {stamp}")]
    FutureTimestamp { stamp: String },
}

impl NauticalError {
    pub(crate) fn range(field: &'static str, min: f64, max: f64, value: f64) -> Self {
        NauticalError::Range {
            field,
            min,
            max,
            value,
        }
    }

    pub(crate) fn number_format(text: &str) -> Self {
        NauticalError::NumberFormat {
            text: text.to_string(),
        }
    }
}
