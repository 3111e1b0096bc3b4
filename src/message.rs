//! The CAN frame record consumed by the writer and produced by the reader.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum payload length of a classic CAN frame in bytes.
pub const MAX_DATA_LEN: usize = 8;

/// Largest 11-bit (standard) identifier.
pub const STANDARD_ID_MAX: u32 = 0x7FF;

/// Largest 29-bit (extended) identifier.
pub const EXTENDED_ID_MAX: u32 = 0x1FFF_FFFF;

/// A timestamped classic CAN frame as observed on an NMEA 2000 bus.
///
/// The frame carries the flags the writer filters on: the identifier format,
/// the remote transmission request bit and the error frame marker. The
/// timestamp is kept as `f64` seconds since the epoch so that it can be
/// written back without loss.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CanMessageRepr"))]
pub struct CanMessage {
    timestamp: f64,
    arbitration_id: u32,
    dlc: u8,
    data: [u8; MAX_DATA_LEN],
    data_len: u8,
    is_extended_id: bool,
    is_remote_frame: bool,
    is_error_frame: bool,
}

/// Unchecked wire form of [`CanMessage`]. Deserialization goes through
/// [`TryFrom`] so out-of-range parts are rejected instead of stored.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CanMessageRepr {
    timestamp: f64,
    arbitration_id: u32,
    dlc: u8,
    data: [u8; MAX_DATA_LEN],
    data_len: u8,
    is_extended_id: bool,
    is_remote_frame: bool,
    is_error_frame: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<CanMessageRepr> for CanMessage {
    type Error = Error;

    fn try_from(repr: CanMessageRepr) -> Result<Self> {
        let id_max = if repr.is_extended_id {
            EXTENDED_ID_MAX
        } else {
            STANDARD_ID_MAX
        };
        if repr.arbitration_id > id_max {
            return Err(Error::InvalidFrame(format!(
                "identifier {:#x} exceeds {:#x}",
                repr.arbitration_id, id_max
            )));
        }
        if usize::from(repr.dlc) > MAX_DATA_LEN {
            return Err(Error::InvalidFrame(format!(
                "dlc {} exceeds {MAX_DATA_LEN}",
                repr.dlc
            )));
        }
        if usize::from(repr.data_len) > MAX_DATA_LEN {
            return Err(Error::InvalidFrame(format!(
                "data_len {} exceeds {MAX_DATA_LEN}",
                repr.data_len
            )));
        }
        if repr.is_remote_frame && repr.data_len != 0 {
            return Err(Error::InvalidFrame(String::from(
                "remote frame carries a payload",
            )));
        }
        Ok(Self {
            timestamp: repr.timestamp,
            arbitration_id: repr.arbitration_id,
            dlc: repr.dlc,
            data: repr.data,
            data_len: repr.data_len,
            is_extended_id: repr.is_extended_id,
            is_remote_frame: repr.is_remote_frame,
            is_error_frame: repr.is_error_frame,
        })
    }
}

impl CanMessage {
    /// Create a data frame with a 29-bit identifier, the only format NMEA 2000 uses.
    ///
    /// The DLC is taken from the payload length.
    pub fn new_extended(timestamp: f64, arbitration_id: u32, data: &[u8]) -> Result<Self> {
        if arbitration_id > EXTENDED_ID_MAX {
            return Err(Error::InvalidFrame(format!(
                "extended identifier {arbitration_id:#x} exceeds 29 bits"
            )));
        }
        Self::data_frame(timestamp, arbitration_id, data, true)
    }

    /// Create a data frame with an 11-bit identifier.
    pub fn new_standard(timestamp: f64, arbitration_id: u16, data: &[u8]) -> Result<Self> {
        let id = u32::from(arbitration_id);
        if id > STANDARD_ID_MAX {
            return Err(Error::InvalidFrame(format!(
                "standard identifier {id:#x} exceeds 11 bits"
            )));
        }
        Self::data_frame(timestamp, id, data, false)
    }

    /// Create a remote transmission request with an extended identifier.
    ///
    /// Remote frames carry a DLC but no payload.
    pub fn new_remote_request(timestamp: f64, arbitration_id: u32, dlc: u8) -> Result<Self> {
        if arbitration_id > EXTENDED_ID_MAX {
            return Err(Error::InvalidFrame(format!(
                "extended identifier {arbitration_id:#x} exceeds 29 bits"
            )));
        }
        if usize::from(dlc) > MAX_DATA_LEN {
            return Err(Error::InvalidFrame(format!("dlc {dlc} exceeds {MAX_DATA_LEN}")));
        }
        Ok(Self {
            timestamp,
            arbitration_id,
            dlc,
            data: [0u8; MAX_DATA_LEN],
            data_len: 0,
            is_extended_id: true,
            is_remote_frame: true,
            is_error_frame: false,
        })
    }

    fn data_frame(timestamp: f64, arbitration_id: u32, data: &[u8], extended: bool) -> Result<Self> {
        if data.len() > MAX_DATA_LEN {
            return Err(Error::InvalidFrame(format!(
                "payload of {} bytes exceeds {MAX_DATA_LEN}",
                data.len()
            )));
        }
        let mut frame_data = [0u8; MAX_DATA_LEN];
        frame_data[..data.len()].copy_from_slice(data);
        Ok(Self {
            timestamp,
            arbitration_id,
            dlc: data.len() as u8,
            data: frame_data,
            data_len: data.len() as u8,
            is_extended_id: extended,
            is_remote_frame: false,
            is_error_frame: false,
        })
    }

    /// Mark or unmark this frame as a bus error indication.
    pub fn with_error_flag(mut self, is_error_frame: bool) -> Self {
        self.is_error_frame = is_error_frame;
        self
    }

    /// Override the DLC. Used when a log row declares more bytes than it carries.
    pub(crate) fn with_dlc(mut self, dlc: u8) -> Self {
        self.dlc = dlc;
        self
    }

    /// Replace the timestamp.
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Timestamp in seconds since the epoch.
    #[inline]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Raw arbitration identifier, without any PGN extraction.
    #[inline]
    pub fn arbitration_id(&self) -> u32 {
        self.arbitration_id
    }

    /// Data length code.
    #[inline]
    pub fn dlc(&self) -> u8 {
        self.dlc
    }

    /// Payload bytes. Empty for remote frames.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data[..usize::from(self.data_len)]
    }

    #[inline]
    pub fn is_extended_id(&self) -> bool {
        self.is_extended_id
    }

    #[inline]
    pub fn is_remote_frame(&self) -> bool {
        self.is_remote_frame
    }

    #[inline]
    pub fn is_error_frame(&self) -> bool {
        self.is_error_frame
    }
}

#[cfg(feature = "can")]
mod embedded_can_impl {
    use super::{CanMessage, MAX_DATA_LEN};
    use embedded_can::{ExtendedId, Frame, Id, StandardId};

    impl CanMessage {
        /// Build a message from any `embedded-can` frame and a timestamp in seconds.
        pub fn from_frame<F: Frame>(timestamp: f64, frame: &F) -> Self {
            let (arbitration_id, is_extended_id) = match frame.id() {
                Id::Standard(id) => (u32::from(id.as_raw()), false),
                Id::Extended(id) => (id.as_raw(), true),
            };
            let payload = frame.data();
            let len = payload.len().min(MAX_DATA_LEN);
            let mut data = [0u8; MAX_DATA_LEN];
            data[..len].copy_from_slice(&payload[..len]);
            Self {
                timestamp,
                arbitration_id,
                dlc: frame.dlc().min(MAX_DATA_LEN) as u8,
                data,
                data_len: len as u8,
                is_extended_id,
                is_remote_frame: frame.is_remote_frame(),
                is_error_frame: false,
            }
        }
    }

    /// Frames created through the `embedded-can` constructors carry a zero
    /// timestamp; set one with [`CanMessage::with_timestamp`].
    impl Frame for CanMessage {
        fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
            match id.into() {
                Id::Standard(id) => CanMessage::new_standard(0.0, id.as_raw(), data).ok(),
                Id::Extended(id) => CanMessage::new_extended(0.0, id.as_raw(), data).ok(),
            }
        }

        fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
            if dlc > MAX_DATA_LEN {
                return None;
            }
            match id.into() {
                Id::Extended(id) => {
                    CanMessage::new_remote_request(0.0, id.as_raw(), dlc as u8).ok()
                }
                Id::Standard(id) => {
                    let mut msg = CanMessage::new_remote_request(0.0, 0, dlc as u8).ok()?;
                    msg.arbitration_id = u32::from(id.as_raw());
                    msg.is_extended_id = false;
                    Some(msg)
                }
            }
        }

        fn is_extended(&self) -> bool {
            self.is_extended_id
        }

        fn is_remote_frame(&self) -> bool {
            self.is_remote_frame
        }

        fn id(&self) -> Id {
            if self.is_extended_id {
                Id::Extended(ExtendedId::new(self.arbitration_id).unwrap_or(ExtendedId::ZERO))
            } else {
                let raw = (self.arbitration_id & super::STANDARD_ID_MAX) as u16;
                Id::Standard(StandardId::new(raw).unwrap_or(StandardId::ZERO))
            }
        }

        fn dlc(&self) -> usize {
            usize::from(self.dlc)
        }

        fn data(&self) -> &[u8] {
            CanMessage::data(self)
        }
    }
}
