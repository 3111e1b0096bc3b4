//! Builder pattern for N2kWriter configuration.

use std::io::Write;
use std::path::Path;

use super::sink::{FileSink, OpenMode};
use super::N2kWriter;

/// Configuration for N2kWriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct N2kWriterConfig {
    /// Add rows after existing content instead of truncating.
    /// No header line is written in append mode.
    /// Default: false
    pub append: bool,
}

impl N2kWriterConfig {
    /// The open mode this configuration selects.
    pub fn mode(&self) -> OpenMode {
        OpenMode::from_append(self.append)
    }
}

/// Builder for N2kWriter configuration.
#[derive(Debug, Clone, Default)]
pub struct N2kWriterBuilder {
    pub(super) config: N2kWriterConfig,
}

impl N2kWriterBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether rows are appended to an existing destination.
    ///
    /// Default: false (truncate and write a header line)
    pub fn append(mut self, enabled: bool) -> Self {
        self.config.append = enabled;
        self
    }

    /// Build a writer over an already open sink.
    ///
    /// The sink is used as given. In truncate mode the header is written to
    /// it immediately.
    pub fn build<W: Write>(self, sink: W) -> crate::Result<N2kWriter<W>> {
        N2kWriter::with_config(sink, self.config)
    }

    /// Build a writer that opens `path` itself.
    pub fn build_file<P: AsRef<Path>>(self, path: P) -> crate::Result<N2kWriter<FileSink>> {
        let sink = super::sink::open_file(path, self.config.mode())?;
        N2kWriter::with_config(sink, self.config)
    }
}
