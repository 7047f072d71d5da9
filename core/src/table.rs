//! Reading and writing delimited tables.
//!
//! Tables are plain text, with one line per bin and one delimited field per condition. Missing
//! values are written as `NA`. An optional first line may hold a header, which is skipped when
//! reading.

use std::{fmt, io};

pub mod read;
pub use read::Reader;

pub mod write;
pub use write::Writer;

use crate::transform::ParseCellError;

/// The default delimiter between fields.
pub const DEFAULT_DELIMITER: char = '\t';

/// The minimum number of conditions in a row.
pub const MIN_CONDITIONS: usize = 2;

/// An error associated with reading a table.
#[derive(Debug)]
pub enum ReadError {
    /// An I/O error.
    Io(io::Error),
    /// A field could not be parsed.
    Parse {
        /// The one-based line number.
        line: usize,
        /// The underlying error.
        error: ParseCellError,
    },
    /// A line had an unexpected number of fields.
    FieldCount {
        /// The one-based line number.
        line: usize,
        /// The expected number of fields.
        expected: usize,
        /// The number of fields found.
        found: usize,
    },
    /// A line had fewer fields than required.
    TooFewFields {
        /// The one-based line number.
        line: usize,
        /// The minimum number of fields.
        min: usize,
        /// The number of fields found.
        found: usize,
    },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "{e}"),
            ReadError::Parse { line, error } => write!(f, "line {line}: {error}"),
            ReadError::FieldCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} fields, found {found} fields"
            ),
            ReadError::TooFewFields { line, min, found } => write!(
                f,
                "line {line}: expected at least {min} fields, found {found} fields"
            ),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::Parse { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
