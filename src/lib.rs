//! `korri-canstruct` library: segmentation and reassembly of fixed-size
//! structures over classic CAN and CAN-FD frames in a `no_std` environment.
//! The crate exposes the boundary codec (structure <-> byte image), the
//! segmentation core, the bus abstractions, and an optional link service.
#![no_std]
//==================================================================================
/// Domain and low-level errors (layout validation, structure encoding,
/// frame construction, bus transmission).
pub mod error;
/// Conversion between application structures and the byte images carried
/// by the protocol.
pub mod infra;
/// Segmentation protocol: frame formats, segmenter, reassembler, bus
/// transport helpers, and the link service.
pub mod protocol;
//==================================================================================
