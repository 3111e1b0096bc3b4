//! Row formatting for the `.n2k` text format.
//!
//! Every accepted frame becomes one line of four comma separated fields:
//!
//! ```text
//! timestamp,PGN,dlc,data
//! 1483389946.197,127251,8,FF FF E0 6F 43 FF FF 00
//! ```
//!
//! The timestamp uses the shortest representation that parses back to the
//! identical `f64`. The PGN column holds the raw arbitration identifier.

use core::fmt::Write;

use crate::CanMessage;

/// Header line written at the top of a freshly created log, without terminator.
pub const HEADER: &str = "timestamp,PGN,dlc,data";

/// Field separator.
pub const SEPARATOR: char = ',';

/// Row terminator.
pub const LINE_TERMINATOR: char = '\n';

/// Append the lossless text form of `timestamp` to `out`.
///
/// `Debug` on `f64` yields the shortest string that round-trips and always
/// keeps a fractional part or exponent (`1.0`, `1e20`, `1e-5`), unlike a
/// fixed precision display. Exponents carry no `+` sign and no zero padding.
#[inline]
pub fn write_timestamp(out: &mut String, timestamp: f64) {
    let _ = write!(out, "{timestamp:?}");
}

/// Append `data` as space separated, two digit uppercase hex to `out`.
pub fn write_hex_data(out: &mut String, data: &[u8]) {
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02X}");
    }
}

/// Render `data` as space separated uppercase hex.
pub fn hex_data(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    write_hex_data(&mut out, data);
    out
}

/// Append one complete row for `msg`, terminator included, to `out`.
///
/// Exactly `dlc` payload bytes are rendered; if the payload is shorter than
/// the DLC only the available bytes are.
pub fn write_row(out: &mut String, msg: &CanMessage) {
    write_timestamp(out, msg.timestamp());
    out.push(SEPARATOR);
    let _ = write!(out, "{}", msg.arbitration_id());
    out.push(SEPARATOR);
    let _ = write!(out, "{}", msg.dlc());
    out.push(SEPARATOR);
    let data = msg.data();
    let len = usize::from(msg.dlc()).min(data.len());
    write_hex_data(out, &data[..len]);
    out.push(LINE_TERMINATOR);
}

/// Render one complete row for `msg`, terminator included.
pub fn format_row(msg: &CanMessage) -> String {
    let mut out = String::with_capacity(64);
    write_row(&mut out, msg);
    out
}
