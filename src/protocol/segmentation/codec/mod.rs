//! Typed front-end pairing a [`Segmenter`] and a [`Reassembler`] for one
//! [`CanStructure`] type.
use crate::error::{DecodeError, EncodeError};
use crate::infra::codec::traits::CanStructure;
use crate::protocol::segmentation::{
    format::{Classic, FrameFormat},
    reassembler::Reassembler,
    segmenter::{FrameIterator, Segmenter},
};
use crate::protocol::transport::can_frame::CanFrame;

/// Packs outgoing values of `T` and unpacks incoming ones.
///
/// The send and receive paths share nothing but the type: the segmenter is
/// stateless and the reassembler only tracks the incoming transfer.
pub struct StructureCodec<T: CanStructure<N>, const N: usize, F: FrameFormat = Classic> {
    segmenter: Segmenter<N, F>,
    reassembler: Reassembler<N, F>,
    outgoing: [u8; N],
    unpacked: Option<T>,
}

impl<T: CanStructure<N>, const N: usize, F: FrameFormat> StructureCodec<T, N, F> {
    /// Create a codec emitting frames with the identifier `id`.
    pub fn new(id: u32) -> Self {
        Self {
            segmenter: Segmenter::new(id),
            reassembler: Reassembler::new(),
            outgoing: [0; N],
            unpacked: None,
        }
    }

    /// Encode `value` and return the frames carrying it.
    ///
    /// The image is kept inside the codec until the next call, which is why
    /// the iterator borrows `self`.
    pub fn pack(&mut self, value: &T) -> Result<FrameIterator<'_>, EncodeError> {
        self.outgoing = value.to_bytes()?;
        Ok(self.segmenter.pack(&self.outgoing))
    }

    /// Feed one received frame. Returns `Ok(true)` once a value has been
    /// reassembled and decoded.
    ///
    /// A completed image that fails to decode is reported as an error; the
    /// reassembly context is ready for the next transfer either way.
    pub fn unpack(&mut self, frame: &CanFrame) -> Result<bool, DecodeError> {
        if !self.reassembler.accept(frame) {
            return Ok(false);
        }
        self.unpacked = Some(T::from_bytes(self.reassembler.unpacked())?);
        Ok(true)
    }

    /// Last successfully decoded value.
    pub fn unpacked(&self) -> Option<&T> {
        self.unpacked.as_ref()
    }

    /// Abandon the incoming transfer in progress.
    pub fn reset(&mut self) {
        self.reassembler.reset();
    }

    /// Underlying segmenter, for callers sending raw images.
    pub fn segmenter(&self) -> &Segmenter<N, F> {
        &self.segmenter
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
