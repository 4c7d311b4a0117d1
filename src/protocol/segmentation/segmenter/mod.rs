//! Frame generator for segmented structures. Splits a fixed-size byte image
//! into an ordered sequence of indexed frames.
use core::marker::PhantomData;

use crate::protocol::segmentation::{
    format::{Classic, FrameFormat},
    layout::TransferLayout,
};
use crate::protocol::transport::can_frame::{CanFrame, MAX_FRAME_DATA};

/// Largest identifier emitted in the standard 11-bit format.
const STANDARD_ID_MAX: u32 = 0x7FF;

/// Filler for the unused tail of a short final segment.
const PADDING_BYTE: u8 = 0xFF;

#[derive(Debug, Clone, Copy)]
/// Sender side of a transfer for structures of `N` bytes.
///
/// Stateless across calls: each [`Segmenter::pack`] is independent.
pub struct Segmenter<const N: usize, F: FrameFormat = Classic> {
    id: u32,
    layout: TransferLayout,
    _format: PhantomData<F>,
}

impl<const N: usize, F: FrameFormat> Segmenter<N, F> {
    /// Layout shared with the matching [`Reassembler`](super::reassembler::Reassembler).
    /// Evaluating it fails the build when `N` cannot be addressed by `F`.
    ///
    /// 256 full segments is the largest accepted structure:
    ///
    /// ```
    /// use korri_canstruct::protocol::segmentation::{format::Fd, segmenter::Segmenter};
    ///
    /// assert_eq!(Segmenter::<1792>::new(1).layout().segment_count(), 256);
    /// assert_eq!(Segmenter::<16128, Fd>::new(1).layout().segment_count(), 256);
    /// ```
    ///
    /// One byte more does not build:
    ///
    /// ```compile_fail
    /// use korri_canstruct::protocol::segmentation::segmenter::Segmenter;
    ///
    /// let _segmenter = Segmenter::<1793>::new(1);
    /// ```
    ///
    /// Neither does an empty structure:
    ///
    /// ```compile_fail
    /// use korri_canstruct::protocol::segmentation::segmenter::Segmenter;
    ///
    /// let _segmenter = Segmenter::<0>::new(1);
    /// ```
    pub const LAYOUT: TransferLayout = TransferLayout::checked(N, F::BUDGET);

    /// Create a segmenter emitting frames with the identifier `id`.
    ///
    /// Identifiers above `0x7FF` are sent in the extended format and must fit in 29 bits.
    pub const fn new(id: u32) -> Self {
        Self {
            id,
            layout: Self::LAYOUT,
            _format: PhantomData,
        }
    }

    /// Identifier stamped on outgoing frames by [`Segmenter::pack`].
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Segment geometry of this transfer.
    pub fn layout(&self) -> TransferLayout {
        self.layout
    }

    /// Split `blob` into frames carrying the configured identifier.
    pub fn pack<'a>(&self, blob: &'a [u8; N]) -> FrameIterator<'a> {
        self.pack_with_id(self.id, blob)
    }

    /// Split `blob` into frames carrying `id` instead of the configured identifier.
    pub fn pack_with_id<'a>(&self, id: u32, blob: &'a [u8; N]) -> FrameIterator<'a> {
        FrameIterator {
            id,
            fd: F::FD,
            blob,
            layout: self.layout,
            next_index: 0,
        }
    }
}

/// Split an arbitrary slice according to a runtime-validated layout.
/// `fd` is copied into every frame.
///
/// Returns `None` when `blob` does not match `layout.total_size()`.
pub fn segment(
    id: u32,
    fd: bool,
    blob: &[u8],
    layout: TransferLayout,
) -> Option<FrameIterator<'_>> {
    if blob.len() != layout.total_size() {
        return None;
    }
    Some(FrameIterator {
        id,
        fd,
        blob,
        layout,
        next_index: 0,
    })
}

#[derive(Debug, Clone)]
/// Lazy iterator returning frames one by one in ascending segment order.
pub struct FrameIterator<'a> {
    id: u32,
    fd: bool,
    blob: &'a [u8],
    layout: TransferLayout,
    next_index: usize,
}

impl<'a> Iterator for FrameIterator<'a> {
    type Item = CanFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index;
        let range = self.layout.segment_range(index)?;

        let mut data = [PADDING_BYTE; MAX_FRAME_DATA];
        // Byte 0: segment index. The layout caps the count at 256, so it fits.
        data[0] = index as u8;
        // Bytes 1..: structure slice (full budget, or the remainder for the last one).
        let chunk = &self.blob[range];
        data[1..1 + chunk.len()].copy_from_slice(chunk);

        self.next_index += 1;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Packed segment {}/{} ({} bytes) for id {:#X}",
            index,
            self.layout.segment_count(),
            chunk.len(),
            self.id
        );

        Some(CanFrame {
            id: self.id,
            extended: self.id > STANDARD_ID_MAX,
            data,
            len: self.layout.frame_len(),
            fd: self.fd,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .layout
            .segment_count()
            .saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameIterator<'_> {}
