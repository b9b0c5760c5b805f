//! Error types for gridbin operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridbin operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input shape or parameter (length mismatch, bad bin size,
    /// non-finite coordinates).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested grid would exceed the configured cell cap.
    #[error("Grid too large: {rows}x{cols} cells exceeds limit of {limit}")]
    GridTooLarge {
        /// Number of rows the axes would produce.
        rows: usize,
        /// Number of columns the axes would produce.
        cols: usize,
        /// Configured maximum cell count.
        limit: usize,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Returns true for [`Error::InvalidArgument`].
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
