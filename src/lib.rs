#![forbid(unsafe_code)]

//! # n2k-log
//!
//! A Rust library for logging NMEA 2000 CAN frames to the `.n2k` text format
//! and reading those logs back.
//!
//! A `.n2k` log is a comma separated text file with one line per raw CAN
//! frame. Fast-packet messages are not reassembled and payloads are not
//! decoded: each frame observed on the bus becomes exactly one row.
//!
//! ```text
//! timestamp,PGN,dlc,data
//! 1483389946.197,127251,8,FF FF E0 6F 43 FF FF 00
//! ```
//!
//! | column    | content                                            |
//! |-----------|----------------------------------------------------|
//! | timestamp | seconds since the epoch, written without rounding  |
//! | PGN       | the raw 29-bit arbitration identifier, in decimal  |
//! | dlc       | data length code                                   |
//! | data      | payload as space separated uppercase hex           |
//!
//! ## Quick Start
//!
//! ### Writing a log
//!
//! ```no_run
//! use n2k_log::{CanMessage, N2kWriter, Result};
//!
//! fn main() -> Result<()> {
//!     // `N2kWriter::open(path, true)` appends without a header instead.
//!     let mut writer = N2kWriter::create("bus.n2k")?;
//!
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
//!
//! ### Reading a log
//!
//! ```no_run
//! use n2k_log::{N2kReader, Result};
//!
//! fn main() -> Result<()> {
//!     for msg in N2kReader::open("bus.n2k")? {
//!         let msg = msg?;
//!         println!("{} {:#x} {:?}", msg.timestamp(), msg.arbitration_id(), msg.data());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`writer`] | [`N2kWriter`], frame filtering and file sinks |
//! | [`reader`] | [`N2kReader`] for parsing logs back |
//! | [`format`] | Row and field formatting |
//! | [`listener`] | The [`Listener`] seam frame sources deliver to |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Diagnostics
//!
//! Frames that are not NMEA 2000 application data (standard identifiers,
//! remote requests, error frames) are reported through the [`log`] facade.
//! Install any `log` implementation to see them.

pub mod error;
pub mod format;
pub mod listener;
pub mod reader;
pub mod writer;

mod message;

pub use error::{Error, Result};
pub use listener::{Listener, dispatch};
pub use message::{CanMessage, EXTENDED_ID_MAX, MAX_DATA_LEN, STANDARD_ID_MAX};
pub use reader::N2kReader;
pub use writer::{
    FrameDisposition, N2kWriter, N2kWriterBuilder, N2kWriterConfig, OpenMode, WriterStats,
    classify,
};
