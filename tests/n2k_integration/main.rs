//! N2K integration test module
//!
//! This module contains end-to-end tests for `.n2k` logging:
//! - `file_lifecycle`: header, truncate and append behaviour on real files
//! - `fake_driver`: frames delivered by a fake `embedded-can` driver
//! - `reader_roundtrip`: logs written and parsed back

mod reader_roundtrip;

use ::embedded_can::{ExtendedId, Frame, Id, StandardId};
use std::path::PathBuf;

/// A unique path in the temp dir, removed first if it exists.
pub fn temp_log(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("n2k_log_{}_{}.n2k", name, std::process::id()));
    if path.exists() {
        std::fs::remove_file(&path).unwrap();
    }
    path
}

/// A simple CAN frame implementation for testing
#[derive(Debug, Clone)]
pub struct MockCanFrame {
    id: Id,
    data: [u8; 8],
    dlc: usize,
    remote: bool,
}

impl MockCanFrame {
    pub fn new_extended(id: u32, data: &[u8]) -> Self {
        Frame::new(ExtendedId::new(id).unwrap(), data).unwrap()
    }

    pub fn new_standard(id: u16, data: &[u8]) -> Self {
        Frame::new(StandardId::new(id).unwrap(), data).unwrap()
    }
}

impl Frame for MockCanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let mut frame_data = [0u8; 8];
        frame_data[..data.len()].copy_from_slice(data);
        Some(Self {
            id: id.into(),
            data: frame_data,
            dlc: data.len(),
            remote: false,
        })
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }
        Some(Self {
            id: id.into(),
            data: [0u8; 8],
            dlc,
            remote: true,
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.remote
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    fn data(&self) -> &[u8] {
        if self.remote {
            &[]
        } else {
            &self.data[..self.dlc]
        }
    }
}

/// Build a 29-bit NMEA 2000 identifier from priority, PGN and source address.
pub fn n2k_id(priority: u8, pgn: u32, source: u8) -> u32 {
    (u32::from(priority) << 26) | (pgn << 8) | u32::from(source)
}

/// Simulates a masthead GPS that broadcasts NMEA 2000 frames
pub struct FakeGpsDevice {
    /// Source address on the bus
    pub source: u8,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Heading in radians
    pub heading: f64,
}

impl FakeGpsDevice {
    pub fn new(source: u8) -> Self {
        Self {
            source,
            latitude: 59.3293,
            longitude: 18.0686,
            heading: 1.0,
        }
    }

    /// PGN 129025, position rapid update
    pub fn position_frame(&self) -> MockCanFrame {
        let lat = ((self.latitude * 1e7) as i32).to_le_bytes();
        let lon = ((self.longitude * 1e7) as i32).to_le_bytes();
        MockCanFrame::new_extended(
            n2k_id(2, 129025, self.source),
            &[lat[0], lat[1], lat[2], lat[3], lon[0], lon[1], lon[2], lon[3]],
        )
    }

    /// PGN 127250, vessel heading
    pub fn heading_frame(&self) -> MockCanFrame {
        let raw = ((self.heading / 0.0001) as u16).to_le_bytes();
        MockCanFrame::new_extended(
            n2k_id(2, 127250, self.source),
            &[0xFF, raw[0], raw[1], 0xFF, 0x7F, 0xFF, 0x7F, 0xFC],
        )
    }

    pub fn step(&mut self, delta_s: f64) {
        self.latitude += 0.00001 * delta_s;
        self.longitude += 0.00002 * delta_s;
        self.heading = (self.heading + 0.01 * delta_s) % core::f64::consts::TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_can_frame() {
        let frame = MockCanFrame::new_extended(0x09F80103, &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(frame.is_extended());
        assert!(!frame.is_remote_frame());
        assert_eq!(frame.dlc(), 8);
        assert_eq!(frame.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);

        let remote = MockCanFrame::new_remote(ExtendedId::new(0x18EAFF00).unwrap(), 3).unwrap();
        assert!(remote.is_remote_frame());
        assert!(remote.data().is_empty());
    }

    #[test]
    fn test_n2k_id() {
        assert_eq!(n2k_id(2, 129025, 0x03), 0x09F80103);
        assert_eq!(n2k_id(0, 127251, 0), 127251 << 8);
    }
}
