//! `CanBus` extension pulling frames off the bus into a [`Reassembler`]
//! until a structure is complete.
//!
//! The reassembly core never times out. [`StructureReceiver::receive_structure_within`]
//! is the recovery path for lost segments: it races the transfer against a
//! timer and abandons the partial transfer when the deadline expires.
use futures_util::future::{select, Either};
use futures_util::pin_mut;

use crate::protocol::segmentation::{format::FrameFormat, reassembler::Reassembler};
use crate::protocol::transport::traits::{can_bus::CanBus, korri_timer::KorriTimer};

/// Trait extending `CanBus` with structure-receiving helpers.
pub trait StructureReceiver: CanBus
where
    <Self as CanBus>::Error: core::fmt::Debug,
{
    /// Wait until a structure sent on `id` has been fully reassembled and
    /// return a copy of its image.
    ///
    /// Frames with another identifier, or with an FD flag that does not
    /// match `F`, are skipped. Bus errors are returned as-is; the partial
    /// transfer stays in the reassembler.
    fn receive_structure<'a, const N: usize, F: FrameFormat>(
        &'a mut self,
        reassembler: &'a mut Reassembler<N, F>,
        id: u32,
    ) -> impl core::future::Future<Output = Result<[u8; N], Self::Error>> + 'a;

    /// Same as [`StructureReceiver::receive_structure`] but gives up after
    /// `timeout_ms`, resetting the reassembler and returning `Ok(None)`.
    fn receive_structure_within<'a, const N: usize, F: FrameFormat, T: KorriTimer>(
        &'a mut self,
        reassembler: &'a mut Reassembler<N, F>,
        id: u32,
        timer: &'a mut T,
        timeout_ms: u32,
    ) -> impl core::future::Future<Output = Result<Option<[u8; N]>, Self::Error>> + 'a;
}

impl<C: CanBus> StructureReceiver for C
where
    C::Error: core::fmt::Debug,
{
    fn receive_structure<'a, const N: usize, F: FrameFormat>(
        &'a mut self,
        reassembler: &'a mut Reassembler<N, F>,
        id: u32,
    ) -> impl core::future::Future<Output = Result<[u8; N], Self::Error>> + 'a {
        async move {
            loop {
                let frame = self.recv().await?;

                if frame.id != id || frame.fd != F::FD {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Skipping frame id={:#X} fd={}", frame.id, frame.fd);
                    continue;
                }

                if reassembler.accept(&frame) {
                    return Ok(*reassembler.unpacked());
                }
            }
        }
    }

    fn receive_structure_within<'a, const N: usize, F: FrameFormat, T: KorriTimer>(
        &'a mut self,
        reassembler: &'a mut Reassembler<N, F>,
        id: u32,
        timer: &'a mut T,
        timeout_ms: u32,
    ) -> impl core::future::Future<Output = Result<Option<[u8; N]>, Self::Error>> + 'a {
        async move {
            let outcome = {
                let transfer = self.receive_structure(&mut *reassembler, id);
                let deadline = timer.delay_ms(timeout_ms);
                pin_mut!(transfer);
                pin_mut!(deadline);

                match select(transfer, deadline).await {
                    Either::Left((result, _)) => Some(result),
                    Either::Right(_) => None,
                }
            };

            match outcome {
                Some(result) => result.map(Some),
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "Transfer on id {:#X} timed out with {} segments received, abandoning",
                        id,
                        reassembler.received_count()
                    );
                    reassembler.reset();
                    Ok(None)
                }
            }
        }
    }
}
