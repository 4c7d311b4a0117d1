//! `CanBus` extension transmitting a whole structure: it segments the byte
//! image and sends every frame in order with the appropriate inter-frame
//! delays.
//!
//! # Inter-frame delay
//!
//! When a structure spans multiple frames, [`SEGMENT_INTER_FRAME_DELAY_MS`]
//! is inserted between consecutive frames to prevent embedded CAN
//! controllers from saturating their TX buffers. No delay precedes the
//! first frame.
use crate::{
    error::SendStructureError,
    protocol::segmentation::{format::FrameFormat, segmenter::Segmenter},
    protocol::transport::traits::{can_bus::CanBus, korri_timer::KorriTimer},
    protocol::transport::SEGMENT_INTER_FRAME_DELAY_MS,
};

/// Trait extending `CanBus` with structure-sending helpers.
pub trait StructureSender: CanBus
where
    <Self as CanBus>::Error: core::fmt::Debug,
{
    /// Segment `blob` with `segmenter` and send the resulting frames.
    ///
    /// Frames carry the segmenter's identifier. Transmission stops at the
    /// first bus error; the receiver then simply never completes.
    ///
    /// # Errors
    ///
    /// - [`SendStructureError::Send`] when bus transmission fails
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use korri_canstruct::protocol::{
    ///     segmentation::segmenter::Segmenter,
    ///     transport::traits::structure_sender::StructureSender,
    /// };
    ///
    /// let segmenter = Segmenter::<24>::new(0x612);
    /// can_bus.send_structure(&segmenter, &image, &mut timer).await?;
    /// ```
    fn send_structure<'a, const N: usize, F: FrameFormat, T: KorriTimer>(
        &'a mut self,
        segmenter: &'a Segmenter<N, F>,
        blob: &'a [u8; N],
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<(), SendStructureError<Self::Error>>> + 'a;
}

impl<C: CanBus> StructureSender for C
where
    C::Error: core::fmt::Debug,
{
    fn send_structure<'a, const N: usize, F: FrameFormat, T: KorriTimer>(
        &'a mut self,
        segmenter: &'a Segmenter<N, F>,
        blob: &'a [u8; N],
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<(), SendStructureError<Self::Error>>> + 'a {
        async move {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "Sending {}-byte structure on id {:#X} in {} frames",
                N,
                segmenter.id(),
                segmenter.layout().segment_count()
            );

            for (index, frame) in segmenter.pack(blob).enumerate() {
                // Pause between frames, not before the first one.
                if index > 0 {
                    timer.delay_ms(SEGMENT_INTER_FRAME_DELAY_MS).await;
                }

                self.send(&frame).await.map_err(SendStructureError::Send)?;
            }

            Ok(())
        }
    }
}
