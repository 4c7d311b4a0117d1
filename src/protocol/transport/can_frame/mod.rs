//! In-memory representation of a classic CAN or CAN-FD frame.
use embedded_can::{ExtendedId, Id, StandardId};

use crate::error::CanFrameError;

/// Payload capacity of a CAN-FD frame.
pub const MAX_FRAME_DATA: usize = 64;
/// Payload capacity of a classic CAN frame.
pub const CLASSIC_FRAME_DATA: usize = 8;

/// Widest 11-bit identifier.
const STANDARD_ID_MASK: u32 = 0x7FF;
/// Widest 29-bit identifier.
const EXTENDED_ID_MASK: u32 = 0x1FFF_FFFF;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw frame as exchanged with the bus driver.
///
/// The identifier is opaque to the segmentation protocol. Its format (IDE
/// bit) is carried separately in `extended`.
pub struct CanFrame {
    /// Identifier, copied verbatim into every frame of a transfer.
    pub id: u32,
    /// Identifier uses the 29-bit extended format.
    pub extended: bool,
    /// Payload buffer sized for the FD variant; classic frames use the first eight bytes.
    pub data: [u8; MAX_FRAME_DATA],
    /// Number of meaningful payload bytes (declared length).
    pub len: usize,
    /// Frame uses the CAN-FD payload budget.
    pub fd: bool,
}

impl Default for CanFrame {
    fn default() -> Self {
        Self {
            id: 0,
            extended: false,
            data: [0; MAX_FRAME_DATA],
            len: 0,
            fd: false,
        }
    }
}

impl CanFrame {
    /// Build a frame from an identifier and a payload slice.
    ///
    /// The FD flag is raised automatically when the payload exceeds eight bytes.
    /// Identifiers that do not fit in 11 bits use the extended format.
    pub fn from_parts(id: u32, payload: &[u8]) -> Result<Self, CanFrameError> {
        if id > EXTENDED_ID_MASK {
            return Err(CanFrameError::InvalidId { id });
        }
        if payload.len() > MAX_FRAME_DATA {
            return Err(CanFrameError::PayloadTooLong { len: payload.len() });
        }
        let mut data = [0; MAX_FRAME_DATA];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            extended: id > STANDARD_ID_MASK,
            data,
            len: payload.len(),
            fd: payload.len() > CLASSIC_FRAME_DATA,
        })
    }

    /// Meaningful payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len.min(MAX_FRAME_DATA)]
    }

    /// Segment index carried in the first payload byte.
    pub fn segment_index(&self) -> u8 {
        self.data[0]
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let (raw, extended) = match id.into() {
            Id::Standard(id) => (id.as_raw() as u32, false),
            Id::Extended(id) => (id.as_raw(), true),
        };
        let mut frame = Self::from_parts(raw, data).ok()?;
        frame.extended = extended;
        Some(frame)
    }

    /// Remote frames carry no payload and have no use in segmented transfers.
    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        self.extended
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    /// Bits above the declared identifier width are dropped.
    fn id(&self) -> Id {
        let standard = StandardId::new((self.id & STANDARD_ID_MASK) as u16);
        let extended = ExtendedId::new(self.id & EXTENDED_ID_MASK);
        match (self.extended, standard, extended) {
            (false, Some(id), _) => Id::Standard(id),
            (_, _, Some(id)) => Id::Extended(id),
            _ => Id::Extended(ExtendedId::ZERO),
        }
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
