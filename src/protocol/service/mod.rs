//! Structure link service: one task owns the bus and drives both directions
//! of a segmented link.
//!
//! Components, each optional on the channel side:
//!
//! * a transmission handle (`StructureHandle`) to queue structure images;
//! * a receiver (`ReceivedStructures`) yielding reassembled images;
//! * the runner (`StructureRunner`) that must be polled for anything to happen.
//!
//! Firmware decides which directions it needs by providing pre-allocated
//! [`embassy_sync::Channel`] instances. No allocation is performed by the
//! library and there is no dependency on a particular BSP.

use core::fmt::Debug;

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
};
use futures_util::{future::select, future::Either, pin_mut};

use crate::error::{DecodeError, EncodeError, ServiceError};
use crate::infra::codec::traits::CanStructure;
use crate::protocol::segmentation::{
    format::{Classic, FrameFormat},
    reassembler::Reassembler,
    segmenter::Segmenter,
};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{
    can_bus::CanBus, korri_timer::KorriTimer, structure_sender::StructureSender,
};

/// Channel type carrying structure images between tasks and the runner.
pub type StructureChannel<const N: usize, const CAP: usize> =
    Channel<CriticalSectionRawMutex, [u8; N], CAP>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Identifiers of the two directions of a link.
pub struct LinkConfig {
    /// Identifier stamped on outgoing frames.
    pub tx_id: u32,
    /// Identifier of the frames to reassemble; everything else is dropped.
    pub rx_id: u32,
}

/// Service assembling the link components.
pub struct StructureService<
    'a,
    C: CanBus,
    T: KorriTimer,
    const N: usize,
    const OUT_CAP: usize,
    const IN_CAP: usize,
    F: FrameFormat = Classic,
> where
    C::Error: Debug,
{
    bus: C,
    timer: T,
    config: LinkConfig,
    outbound: Option<&'a StructureChannel<N, OUT_CAP>>,
    inbound: Option<&'a StructureChannel<N, IN_CAP>>,
    _format: core::marker::PhantomData<F>,
}

impl<'a, C, T, const N: usize, const OUT_CAP: usize, const IN_CAP: usize, F>
    StructureService<'a, C, T, N, OUT_CAP, IN_CAP, F>
where
    C: CanBus,
    C::Error: Debug,
    T: KorriTimer,
    F: FrameFormat,
{
    /// Wrap a bus and a timer. `outbound` enables the transmission handle,
    /// `inbound` the reception of reassembled structures.
    pub fn new(
        bus: C,
        timer: T,
        config: LinkConfig,
        outbound: Option<&'a StructureChannel<N, OUT_CAP>>,
        inbound: Option<&'a StructureChannel<N, IN_CAP>>,
    ) -> Self {
        Self {
            bus,
            timer,
            config,
            outbound,
            inbound,
            _format: core::marker::PhantomData,
        }
    }

    /// Split into handle/receiver/runner components.
    pub fn into_parts(self) -> StructureServiceParts<'a, C, T, N, OUT_CAP, IN_CAP, F> {
        let handle = self.outbound.map(|channel| StructureHandle {
            sender: channel.sender(),
        });
        let structures = self.inbound.map(|channel| ReceivedStructures {
            receiver: channel.receiver(),
        });
        StructureServiceParts {
            handle,
            structures,
            runner: StructureRunner {
                bus: self.bus,
                timer: self.timer,
                rx_id: self.config.rx_id,
                segmenter: Segmenter::new(self.config.tx_id),
                reassembler: Reassembler::new(),
                outbound: self.outbound,
                inbound: self.inbound,
            },
        }
    }
}

/// Bundle returned by [`StructureService::into_parts`].
pub struct StructureServiceParts<
    'a,
    C,
    T,
    const N: usize,
    const OUT_CAP: usize,
    const IN_CAP: usize,
    F: FrameFormat,
> where
    C: CanBus,
    C::Error: Debug,
    T: KorriTimer,
{
    pub handle: Option<StructureHandle<'a, N, OUT_CAP>>,
    pub structures: Option<ReceivedStructures<'a, N, IN_CAP>>,
    pub runner: StructureRunner<'a, C, T, N, OUT_CAP, IN_CAP, F>,
}

/// Runner that drives the link loop.
pub struct StructureRunner<
    'a,
    C,
    T,
    const N: usize,
    const OUT_CAP: usize,
    const IN_CAP: usize,
    F: FrameFormat,
> where
    C: CanBus,
    C::Error: Debug,
    T: KorriTimer,
{
    bus: C,
    timer: T,
    rx_id: u32,
    segmenter: Segmenter<N, F>,
    reassembler: Reassembler<N, F>,
    outbound: Option<&'a StructureChannel<N, OUT_CAP>>,
    inbound: Option<&'a StructureChannel<N, IN_CAP>>,
}

impl<'a, C, T, const N: usize, const OUT_CAP: usize, const IN_CAP: usize, F>
    StructureRunner<'a, C, T, N, OUT_CAP, IN_CAP, F>
where
    C: CanBus,
    C::Error: Debug,
    T: KorriTimer,
    F: FrameFormat,
{
    /// Run forever, returning only on a bus error.
    pub async fn drive(mut self) -> Result<(), ServiceError<C::Error>> {
        let outbound = self.outbound;

        loop {
            match outbound {
                Some(out_ch) => {
                    let mut blob_to_send = None;
                    let mut frame_received = None;

                    {
                        let blob_future = out_ch.receive();
                        let recv_future = self.bus.recv();
                        pin_mut!(blob_future);
                        pin_mut!(recv_future);

                        match select(recv_future, blob_future).await {
                            Either::Left((result, pending_blob)) => {
                                frame_received = Some(result);
                                drop(pending_blob);
                            }
                            Either::Right((blob, pending_recv)) => {
                                blob_to_send = Some(blob);
                                drop(pending_recv);
                            }
                        }
                    }

                    if let Some(result) = frame_received {
                        let frame = result.map_err(ServiceError::Receive)?;
                        self.handle_frame(&frame).await;
                    }

                    if let Some(blob) = blob_to_send {
                        self.bus
                            .send_structure(&self.segmenter, &blob, &mut self.timer)
                            .await?;
                    }
                }
                None => {
                    let frame = self.bus.recv().await.map_err(ServiceError::Receive)?;
                    self.handle_frame(&frame).await;
                }
            }
        }
    }

    /// Feed a frame addressed to this link and forward completed images.
    async fn handle_frame(&mut self, frame: &CanFrame) {
        if frame.id != self.rx_id || frame.fd != F::FD {
            return;
        }
        if !self.reassembler.accept(frame) {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Structure received on id {:#X}", self.rx_id);

        if let Some(in_ch) = self.inbound {
            in_ch.send(*self.reassembler.unpacked()).await;
        }
    }
}

/// Transmission handle (optional).
pub struct StructureHandle<'a, const N: usize, const OUT_CAP: usize> {
    sender: Sender<'a, CriticalSectionRawMutex, [u8; N], OUT_CAP>,
}

impl<'a, const N: usize, const OUT_CAP: usize> StructureHandle<'a, N, OUT_CAP> {
    /// Queue a raw image for transmission.
    pub async fn send(&self, blob: [u8; N]) {
        self.sender.send(blob).await;
    }

    /// Encode a structure and queue its image.
    pub async fn send_structure<S: CanStructure<N>>(&self, value: &S) -> Result<(), EncodeError> {
        let blob = value.to_bytes()?;
        self.sender.send(blob).await;
        Ok(())
    }
}

/// Optional receiver returning reassembled images.
pub struct ReceivedStructures<'a, const N: usize, const IN_CAP: usize> {
    receiver: Receiver<'a, CriticalSectionRawMutex, [u8; N], IN_CAP>,
}

impl<'a, const N: usize, const IN_CAP: usize> ReceivedStructures<'a, N, IN_CAP> {
    /// Wait for the next reassembled image.
    pub async fn recv(&mut self) -> [u8; N] {
        self.receiver.receive().await
    }

    /// Wait for the next reassembled image and decode it.
    pub async fn recv_structure<S: CanStructure<N>>(&mut self) -> Result<S, DecodeError> {
        let blob = self.receiver.receive().await;
        S::from_bytes(&blob)
    }
}
