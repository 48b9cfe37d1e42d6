//! Error types for field parsing, validation, and derivation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a data error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Value does not match the required textual pattern.
    Format,
    /// Value parses but needs more decimal places than allowed.
    Precision,
    /// Value parses but is outside the permitted numeric range.
    Range,
    /// Two fields must be present together or absent together.
    Symmetry,
    /// Value exceeds the maximum character length for its column.
    Length,
    /// An indexed charge column has no partner column.
    MissingPair,
    /// An indexed charge column has an empty partner value.
    EmptyPair,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Format => "FormatError",
            Self::Precision => "PrecisionError",
            Self::Range => "RangeError",
            Self::Symmetry => "SymmetryError",
            Self::Length => "LengthError",
            Self::MissingPair => "MissingPairError",
            Self::EmptyPair => "EmptyPairError",
        };
        f.write_str(name)
    }
}

/// A problem with a single field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field}: {message}")]
    Format { field: String, message: String },

    #[error("{field}: value must have at most {max_decimals} decimal places")]
    Precision { field: String, max_decimals: u32 },

    #[error("{field}: value must be between {min} and {max}")]
    Range {
        field: String,
        min: String,
        max: String,
    },

    #[error("{first} and {second} must both be present if either is set")]
    Symmetry { first: String, second: String },

    #[error("{field}: value is {actual} characters, limit is {limit}")]
    Length {
        field: String,
        limit: usize,
        actual: usize,
    },

    #[error("{field} is set but its paired column {partner} is missing")]
    MissingPair { field: String, partner: String },

    #[error("{field} is set but its paired column {partner} is empty")]
    EmptyPair { field: String, partner: String },
}

impl FieldError {
    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::Precision { .. } => ErrorKind::Precision,
            Self::Range { .. } => ErrorKind::Range,
            Self::Symmetry { .. } => ErrorKind::Symmetry,
            Self::Length { .. } => ErrorKind::Length,
            Self::MissingPair { .. } => ErrorKind::MissingPair,
            Self::EmptyPair { .. } => ErrorKind::EmptyPair,
        }
    }

    /// Attach the CSV row number the value came from.
    pub fn at_row(self, row: usize) -> RowError {
        RowError { row, source: self }
    }
}

/// A field error located at a CSV row (header is row 1).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("CSV row {row}: {source}")]
pub struct RowError {
    pub row: usize,
    #[source]
    pub source: FieldError,
}

impl RowError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
