//! NMEA 2000 frame log writer.
//!
//! This module provides [`N2kWriter`], which appends one comma separated row
//! per accepted CAN frame to a text sink.
//!
//! # Filtering
//!
//! NMEA 2000 only uses 29-bit identifiers and never answers remote requests
//! with logged data, so each frame is classified before it is written:
//!
//! | frame                      | result                          |
//! |----------------------------|---------------------------------|
//! | standard (11-bit) id       | notice logged, no row           |
//! | remote request             | notice logged, no row           |
//! | error frame                | notice logged, row still written |
//! | anything else              | row written                     |
//!
//! Filtered frames are never errors. Only sink failures are returned.
//!
//! # Example
//!
//! ```no_run
//! use n2k_log::{CanMessage, N2kWriter, Result};
//!
//! fn record() -> Result<()> {
//!     let mut writer = N2kWriter::create("bus.n2k")?;
//!     let msg = CanMessage::new_extended(
//!         1483389946.197,
//!         127251,
//!         &[0xFF, 0xFF, 0xE0, 0x6F, 0x43, 0xFF, 0xFF, 0x00],
//!     )?;
//!     writer.on_message_received(&msg)?;
//!     writer.finish()?;
//!     Ok(())
//! }
//! ```

mod builder;
pub mod sink;

pub use builder::{N2kWriterBuilder, N2kWriterConfig};
pub use sink::{FileSink, OpenMode};

use std::io::Write;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::format::{self, HEADER, LINE_TERMINATOR};
use crate::listener::Listener;
use crate::{CanMessage, Result};

/// What the writer does with a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDisposition {
    /// Written as a row.
    Write,
    /// Error frame: a notice is logged and the row is still written.
    WriteErrorFrame,
    /// 11-bit identifier, not valid on NMEA 2000. Skipped.
    SkipStandardId,
    /// Remote transmission request. Skipped.
    SkipRemote,
}

impl FrameDisposition {
    /// Whether a row is produced.
    #[inline]
    pub fn writes_row(self) -> bool {
        matches!(self, FrameDisposition::Write | FrameDisposition::WriteErrorFrame)
    }
}

/// Decide what happens to `msg`.
///
/// The checks run in a fixed order: identifier format first, then the remote
/// flag, then the error flag.
pub fn classify(msg: &CanMessage) -> FrameDisposition {
    if !msg.is_extended_id() {
        FrameDisposition::SkipStandardId
    } else if msg.is_remote_frame() {
        FrameDisposition::SkipRemote
    } else if msg.is_error_frame() {
        FrameDisposition::WriteErrorFrame
    } else {
        FrameDisposition::Write
    }
}

/// Counters kept by a writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WriterStats {
    /// Rows appended to the sink, error frames included.
    pub rows_written: usize,
    /// Frames dropped for carrying an 11-bit identifier.
    pub standard_id_frames: usize,
    /// Remote requests dropped.
    pub remote_frames: usize,
    /// Error frames seen (and written).
    pub error_frames: usize,
}

impl WriterStats {
    /// Total number of frames delivered to the writer.
    pub fn frames_seen(&self) -> usize {
        self.rows_written + self.standard_id_frames + self.remote_frames
    }
}

/// Writes NMEA 2000 frames to a `.n2k` text log.
///
/// The writer owns its sink for its whole lifetime. Dropping the writer
/// releases the sink; [`finish`](Self::finish) does the same but reports the
/// final flush error and hands the sink back.
pub struct N2kWriter<W: Write> {
    sink: W,
    /// Reused row buffer
    row: String,
    stats: WriterStats,
}

impl N2kWriter<FileSink> {
    /// Create a builder for writer configuration.
    pub fn builder() -> N2kWriterBuilder {
        N2kWriterBuilder::new()
    }

    /// Create or truncate `path` and write the header line.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, false)
    }

    /// Open `path`, truncating and writing a header unless `append` is set.
    pub fn open<P: AsRef<Path>>(path: P, append: bool) -> Result<Self> {
        N2kWriterBuilder::new().append(append).build_file(path)
    }
}

impl<W: Write> N2kWriter<W> {
    /// Wrap an already open sink.
    ///
    /// With `append == false` the header line is written immediately. With
    /// `append == true` nothing is written until the first accepted frame.
    pub fn from_writer(sink: W, append: bool) -> Result<Self> {
        Self::with_config(sink, N2kWriterConfig { append })
    }

    /// Wrap an already open sink using `config`.
    pub fn with_config(mut sink: W, config: N2kWriterConfig) -> Result<Self> {
        if config.mode().writes_header() {
            let mut header = String::with_capacity(HEADER.len() + 1);
            header.push_str(HEADER);
            header.push(LINE_TERMINATOR);
            sink.write_all(header.as_bytes())?;
        }
        Ok(Self {
            sink,
            row: String::with_capacity(64),
            stats: WriterStats::default(),
        })
    }

    /// Handle one observed frame.
    ///
    /// Standard-id and remote frames are logged and skipped. Error frames are
    /// logged and then written like any other frame. Returns an error only
    /// when the sink fails.
    pub fn on_message_received(&mut self, msg: &CanMessage) -> Result<()> {
        match classify(msg) {
            FrameDisposition::SkipStandardId => {
                log::warn!(
                    "Unexpected standard message ID {:#x}, frame not logged",
                    msg.arbitration_id()
                );
                self.stats.standard_id_frames += 1;
                return Ok(());
            }
            FrameDisposition::SkipRemote => {
                log::warn!(
                    "Ignoring remote request for {:#x}",
                    msg.arbitration_id()
                );
                self.stats.remote_frames += 1;
                return Ok(());
            }
            FrameDisposition::WriteErrorFrame => {
                log::warn!("Error frame at {:?}, written as a data row", msg.timestamp());
                self.stats.error_frames += 1;
            }
            FrameDisposition::Write => {}
        }

        self.row.clear();
        format::write_row(&mut self.row, msg);
        self.sink.write_all(self.row.as_bytes())?;
        self.stats.rows_written += 1;
        Ok(())
    }

    /// Counters for the frames handled so far.
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        self.sink.flush()?;
        log::debug!("Closing N2K log after {} rows", self.stats.rows_written);
        Ok(self.sink)
    }
}

impl<W: Write> Listener for N2kWriter<W> {
    fn on_message_received(&mut self, msg: &CanMessage) -> Result<()> {
        N2kWriter::on_message_received(self, msg)
    }

    fn stop(&mut self) -> Result<()> {
        self.flush()
    }
}
