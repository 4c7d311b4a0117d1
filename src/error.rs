//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (layout validation,
//! structure encoding/decoding, frame construction, bus transmission).
//!
//! The segmentation core itself never surfaces an error at runtime: stray
//! or malformed frames are dropped silently by the reassembler.
use thiserror_no_std::Error;

//==================================================================================LAYOUT_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Configuration errors raised while validating a transfer layout at runtime.
pub enum LayoutError {
    /// A zero-byte structure produces no segment and can never complete.
    #[error("Structure size must be at least one byte")]
    EmptyStructure,
    /// Frame budget outside the `1..=63` range supported by CAN-FD.
    #[error("Invalid frame budget: {budget}")]
    InvalidBudget { budget: usize },
    /// Structure needs more segments than a one-byte index can address.
    #[error("Structure of {size} bytes exceeds the {max} bytes addressable with this budget")]
    StructureTooLarge { size: usize, max: usize },
}

//==================================================================================CAN_FRAME_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while building a [`CanFrame`](crate::protocol::transport::can_frame::CanFrame).
pub enum CanFrameError {
    /// Payload longer than the 64-byte CAN-FD maximum.
    #[error("Payload of {len} bytes does not fit in a CAN-FD frame")]
    PayloadTooLong { len: usize },
    /// Identifier wider than 29 bits.
    #[error("Identifier {id:#X} does not fit in 29 bits")]
    InvalidId { id: u32 },
}

//================================================================================CODEC_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Issues encountered while encoding a structure into its byte image.
pub enum EncodeError {
    /// Field written past the end of the structure image.
    #[error("Attempted to write out of bounds -> asked: {asked}, available: {available}")]
    BufferTooSmall { asked: usize, available: usize },
    /// Field value cannot be represented in the wire layout.
    #[error("Invalid value for field {field}")]
    InvalidValue { field: &'static str },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while decoding a reassembled byte image into a structure.
pub enum DecodeError {
    /// Attempted to read past the end of the structure image.
    #[error("Attempted to read out of bounds -> asked: {asked}, available: {available}")]
    OutOfBounds { asked: usize, available: usize },
    /// Bytes read for a field do not map to a valid value.
    #[error("Invalid value for field {field}")]
    InvalidValue { field: &'static str },
}

//==================================================================================SEND_ERROR
#[derive(Debug, Error)]
/// Errors encountered when sending a segmented structure.
pub enum SendStructureError<E: core::fmt::Debug> {
    /// CAN layer refused or failed to send one of the frames.
    #[error("CAN bus send error: {0:?}")]
    Send(E),
}

//==================================================================================SERVICE_ERROR
#[derive(Debug, Error)]
/// Errors that stop a [`StructureRunner`](crate::protocol::service::StructureRunner).
pub enum ServiceError<E: core::fmt::Debug> {
    /// Receiving from the bus failed.
    #[error("CAN bus receive error: {0:?}")]
    Receive(E),
    /// Transmitting a queued structure failed.
    #[error("CAN bus send error: {0:?}")]
    Send(E),
}

impl<E: core::fmt::Debug> From<SendStructureError<E>> for ServiceError<E> {
    fn from(err: SendStructureError<E>) -> Self {
        match err {
            SendStructureError::Send(e) => ServiceError::Send(e),
        }
    }
}
