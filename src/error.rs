//! Error types for N2K log operations.
//!
//! This module defines the [`Error`] enum which represents every failure that
//! can surface while writing or reading `.n2k` logs.
//!
//! Filtered frames (standard identifiers, remote requests) are never errors:
//! the writer logs them and moves on. Only I/O failures, malformed log rows
//! and out-of-range frame parts are reported through [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use n2k_log::{Error, N2kWriter, Result};
//!
//! fn open_log(path: &str) -> Result<()> {
//!     match N2kWriter::create(path) {
//!         Ok(_writer) => Ok(()),
//!         Err(Error::IOError(e)) => {
//!             eprintln!("Cannot open log: {}", e);
//!             Err(Error::IOError(e))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

/// Errors that can occur during N2K log operations.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while opening, writing or reading a log.
    IOError(std::io::Error),

    /// A row of a `.n2k` log could not be parsed.
    ParseError {
        /// 1-based line number of the offending row
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Frame parts exceed classic CAN limits.
    ///
    /// Raised by the fallible [`CanMessage`](crate::CanMessage) constructors
    /// when the identifier does not fit its format or the payload is longer
    /// than 8 bytes.
    InvalidFrame(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IOError(e) => write!(f, "I/O error: {e}"),
            Error::ParseError { line, reason } => {
                write!(f, "Malformed log row at line {line}: {reason}")
            }
            Error::InvalidFrame(s) => write!(f, "Invalid CAN frame: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for N2K log operations.
pub type Result<T> = core::result::Result<T, Error>;
