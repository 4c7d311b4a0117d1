//! Reassembly of segmented structures: accumulates indexed frames arriving in
//! any order and signals when every segment of the structure is present.
use core::marker::PhantomData;

use crate::protocol::segmentation::{
    format::{Classic, FrameFormat},
    layout::TransferLayout,
    MAX_SEGMENTS,
};
use crate::protocol::transport::can_frame::CanFrame;

//==================================================================================Enums and Structs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProcessResult {
    /// Frame discarded: index outside the transfer or payload too short.
    /// The context is left untouched.
    Ignored,
    /// Segment stored, others are still missing.
    SegmentStored,
    /// Last missing segment stored; the structure is available through
    /// [`Reassembler::unpacked`] and the context is empty again.
    StructureComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Resting states of a reassembly context. Completion is transient and
/// brings the context straight back to `Empty`.
pub enum ReassemblyState {
    /// No segment received for the current transfer.
    Empty,
    /// Some, but not all, segments received.
    Partial,
}

const WORD_BITS: usize = u32::BITS as usize;

/// One marker bit per segment index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SegmentSet([u32; MAX_SEGMENTS / WORD_BITS]);

impl SegmentSet {
    const fn new() -> Self {
        Self([0; MAX_SEGMENTS / WORD_BITS])
    }

    fn clear(&mut self) {
        self.0 = [0; MAX_SEGMENTS / WORD_BITS];
    }

    fn insert(&mut self, index: usize) {
        self.0[index / WORD_BITS] |= 1 << (index % WORD_BITS);
    }

    fn contains(&self, index: usize) -> bool {
        self.0[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    fn len(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    fn is_empty(&self) -> bool {
        self.0.iter().all(|word| *word == 0)
    }
}

/// Receiver side of a transfer for structures of `N` bytes.
///
/// Holds exactly one in-flight transfer. Frames are expected to belong to
/// that transfer; filtering by identifier is left to the caller.
#[derive(Debug, Clone)]
pub struct Reassembler<const N: usize, F: FrameFormat = Classic> {
    layout: TransferLayout,
    buffer: [u8; N],
    received: SegmentSet,
    unpacked: [u8; N],
    _format: PhantomData<F>,
}

impl<const N: usize, F: FrameFormat> Default for Reassembler<N, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, F: FrameFormat> Reassembler<N, F> {
    /// Layout shared with the matching [`Segmenter`](super::segmenter::Segmenter).
    /// Evaluating it fails the build when `N` cannot be addressed by `F`.
    ///
    /// ```
    /// use korri_canstruct::protocol::segmentation::{format::Fd, reassembler::Reassembler};
    ///
    /// let reassembler = Reassembler::<16128, Fd>::new();
    /// assert_eq!(reassembler.layout().segment_count(), 256);
    /// let reassembler = Reassembler::<1792>::new();
    /// assert_eq!(reassembler.layout().segment_count(), 256);
    /// ```
    ///
    /// ```compile_fail
    /// use korri_canstruct::protocol::segmentation::{format::Fd, reassembler::Reassembler};
    ///
    /// let _reassembler = Reassembler::<16129, Fd>::new();
    /// ```
    ///
    /// ```compile_fail
    /// use korri_canstruct::protocol::segmentation::reassembler::Reassembler;
    ///
    /// let _reassembler = Reassembler::<0>::new();
    /// ```
    pub const LAYOUT: TransferLayout = TransferLayout::checked(N, F::BUDGET);

    /// Create an empty reassembly context.
    pub const fn new() -> Self {
        Self {
            layout: Self::LAYOUT,
            buffer: [0; N],
            received: SegmentSet::new(),
            unpacked: [0; N],
            _format: PhantomData,
        }
    }

    /// Drop any partial transfer and clear the receive buffer.
    pub fn reset(&mut self) {
        self.buffer = [0; N];
        self.received.clear();
    }

    //==================================================================================Process Functions
    /// Feed one received frame. Returns `true` when it completed the structure.
    ///
    /// The declared length is not consulted: the full payload buffer is
    /// handed to [`Reassembler::process_payload`].
    pub fn accept(&mut self, frame: &CanFrame) -> bool {
        self.process_payload(&frame.data) == ProcessResult::StructureComplete
    }

    /// Feed the payload of one frame: `payload[0]` is the segment index,
    /// `payload[1..]` the segment data.
    ///
    /// A segment delivered twice overwrites the stored bytes.
    pub fn process_payload(&mut self, payload: &[u8]) -> ProcessResult {
        let Some((&index, data)) = payload.split_first() else {
            return ProcessResult::Ignored;
        };
        let index = index as usize;

        let Some(range) = self.layout.segment_range(index) else {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "Ignoring segment {} outside a {}-segment transfer",
                index,
                self.layout.segment_count()
            );
            return ProcessResult::Ignored;
        };

        let Some(chunk) = data.get(..range.len()) else {
            #[cfg(feature = "defmt")]
            defmt::debug!("Ignoring truncated segment {}", index);
            return ProcessResult::Ignored;
        };

        self.buffer[range].copy_from_slice(chunk);
        self.received.insert(index);

        if (0..self.layout.segment_count()).all(|i| self.received.contains(i)) {
            self.unpacked = self.buffer;
            self.reset();

            #[cfg(feature = "defmt")]
            defmt::debug!("Structure of {} bytes reassembled", N);

            ProcessResult::StructureComplete
        } else {
            ProcessResult::SegmentStored
        }
    }

    /// Last reassembled structure. All zeroes until a transfer completes.
    pub fn unpacked(&self) -> &[u8; N] {
        &self.unpacked
    }

    /// Current resting state of the context.
    pub fn state(&self) -> ReassemblyState {
        if self.received.is_empty() {
            ReassemblyState::Empty
        } else {
            ReassemblyState::Partial
        }
    }

    /// Number of distinct segments received for the current transfer.
    pub fn received_count(&self) -> usize {
        self.received.len()
    }

    /// Segment geometry of this transfer.
    pub fn layout(&self) -> TransferLayout {
        self.layout
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
