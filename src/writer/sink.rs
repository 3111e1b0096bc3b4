//! File sinks for the N2K writer.
//!
//! A path destination is resolved here, once, into an owned handle. The
//! handle is a [`LineWriter`] so each completed row reaches the file before
//! the next frame arrives and a failing write is reported for the row that
//! caused it.

use std::fs::{File, OpenOptions};
use std::io::LineWriter;
use std::path::Path;

use crate::Result;

/// The sink type used when the writer opens a path itself.
pub type FileSink = LineWriter<File>;

/// How an existing destination file is treated when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create or truncate the file. A header line is written.
    Truncate,
    /// Create the file if missing, otherwise add rows after existing content.
    /// No header line is written.
    Append,
}

impl OpenMode {
    /// Select the mode matching an `append` flag.
    #[inline]
    pub fn from_append(append: bool) -> Self {
        if append {
            OpenMode::Append
        } else {
            OpenMode::Truncate
        }
    }

    /// Whether a header line belongs at the start of the output.
    #[inline]
    pub fn writes_header(self) -> bool {
        matches!(self, OpenMode::Truncate)
    }
}

/// Open `path` for writing according to `mode`.
pub fn open_file<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<FileSink> {
    let mut options = OpenOptions::new();
    match mode {
        OpenMode::Truncate => options.write(true).create(true).truncate(true),
        OpenMode::Append => options.append(true).create(true),
    };
    let file = options.open(path.as_ref())?;
    log::debug!("Opened {} in {:?} mode", path.as_ref().display(), mode);
    Ok(LineWriter::new(file))
}
