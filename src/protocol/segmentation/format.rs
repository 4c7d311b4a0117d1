//! Frame formats selectable at compile time: classic CAN (8-byte frames) and
//! CAN-FD (64-byte frames).
use super::MAX_SEGMENTS;

/// Data bytes carried by a classic CAN frame once the index byte is removed.
pub const CLASSIC_FRAME_BUDGET: usize = 7;
/// Data bytes carried by a CAN-FD frame once the index byte is removed.
pub const FD_FRAME_BUDGET: usize = 63;

/// Compile-time description of the frame flavour used by a segmenter /
/// reassembler pair. Both sides must agree on it.
pub trait FrameFormat {
    /// Data bytes per frame, excluding the segment index byte.
    const BUDGET: usize;
    /// Whether frames are flagged as CAN-FD on the bus.
    const FD: bool;
    /// Largest structure the one-byte index can address with this budget.
    const MAX_STRUCTURE_SIZE: usize = MAX_SEGMENTS * Self::BUDGET;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Classic CAN 2.0: 8-byte frames, 7 data bytes per segment.
pub struct Classic;

impl FrameFormat for Classic {
    const BUDGET: usize = CLASSIC_FRAME_BUDGET;
    const FD: bool = false;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// CAN-FD: 64-byte frames, 63 data bytes per segment.
pub struct Fd;

impl FrameFormat for Fd {
    const BUDGET: usize = FD_FRAME_BUDGET;
    const FD: bool = true;
}
