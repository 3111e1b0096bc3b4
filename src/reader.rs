//! Reader for `.n2k` text logs.
//!
//! [`N2kReader`] turns the rows produced by [`N2kWriter`](crate::N2kWriter)
//! back into [`CanMessage`]s. The header line is optional, so logs that were
//! only ever appended to read the same as fresh ones.
//!
//! The format does not record frame flags. Every message read back is an
//! extended, non-remote data frame; error frames cannot be told apart from
//! regular ones.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::format::{HEADER, SEPARATOR};
use crate::message::{EXTENDED_ID_MAX, MAX_DATA_LEN};
use crate::{CanMessage, Error, Result};

/// Iterator over the messages stored in a `.n2k` log.
pub struct N2kReader<R: BufRead> {
    source: R,
    line: String,
    line_no: usize,
}

impl N2kReader<BufReader<File>> {
    /// Open the log at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> N2kReader<R> {
    /// Read from an already open source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            line: String::new(),
            line_no: 0,
        }
    }

    /// Read every remaining message, stopping at the first error.
    pub fn read_all(self) -> Result<Vec<CanMessage>> {
        self.collect()
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for N2kReader<R> {
    type Item = Result<CanMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.source.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(Error::IOError(e))),
            }
            self.line_no += 1;

            let row = self.line.trim_end_matches(['\n', '\r']);
            if row.trim().is_empty() || row == HEADER {
                continue;
            }
            return Some(parse_row(row, self.line_no));
        }
    }
}

fn parse_error(line: usize, reason: String) -> Error {
    Error::ParseError { line, reason }
}

/// Parse a single data row (without terminator). `line` is used for errors.
pub fn parse_row(row: &str, line: usize) -> Result<CanMessage> {
    let fields: Vec<&str> = row.split(SEPARATOR).collect();
    if fields.len() != 4 {
        return Err(parse_error(
            line,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    }

    let timestamp: f64 = fields[0]
        .parse()
        .map_err(|_| parse_error(line, format!("invalid timestamp {:?}", fields[0])))?;

    let arbitration_id: u32 = fields[1]
        .parse()
        .map_err(|_| parse_error(line, format!("invalid PGN {:?}", fields[1])))?;
    if arbitration_id > EXTENDED_ID_MAX {
        return Err(parse_error(
            line,
            format!("PGN {arbitration_id} exceeds 29 bits"),
        ));
    }

    let dlc: u8 = fields[2]
        .parse()
        .map_err(|_| parse_error(line, format!("invalid dlc {:?}", fields[2])))?;
    if usize::from(dlc) > MAX_DATA_LEN {
        return Err(parse_error(line, format!("dlc {dlc} exceeds {MAX_DATA_LEN}")));
    }

    let data = parse_hex_data(fields[3]).map_err(|reason| parse_error(line, reason))?;
    if data.len() > usize::from(dlc) {
        return Err(parse_error(
            line,
            format!("{} data bytes for dlc {dlc}", data.len()),
        ));
    }

    let msg = CanMessage::new_extended(timestamp, arbitration_id, &data)
        .map_err(|e| parse_error(line, e.to_string()))?;
    Ok(msg.with_dlc(dlc))
}

fn parse_hex_data(field: &str) -> core::result::Result<Vec<u8>, String> {
    if field.is_empty() {
        return Ok(Vec::new());
    }
    let mut bytes = Vec::with_capacity(MAX_DATA_LEN);
    for token in field.split(' ') {
        if token.len() != 2 {
            return Err(format!("invalid data byte {token:?}"));
        }
        let byte = u8::from_str_radix(token, 16)
            .map_err(|_| format!("invalid data byte {token:?}"))?;
        bytes.push(byte);
    }
    if bytes.len() > MAX_DATA_LEN {
        return Err(format!("{} data bytes exceed {MAX_DATA_LEN}", bytes.len()));
    }
    Ok(bytes)
}
