//! Segmentation of fixed-size structures into indexed CAN / CAN-FD frames and
//! their reassembly on the receiving side.
//!
//! Every frame carries a one-byte segment index followed by up to
//! [`FrameFormat::BUDGET`](format::FrameFormat::BUDGET) data bytes:
//!
//! ```text
//! ┌─────────────────┬────────────┬─────────────────────┐
//! │ Field           │ Size       │ Notes               │
//! ├─────────────────┼────────────┼─────────────────────┤
//! │ Segment index   │ 1 byte     │ 0..=255             │
//! │ Structure data  │ 7/63 bytes │ Classic / FD budget │
//! └─────────────────┴────────────┴─────────────────────┘
//! ```
//!
//! Sender and receiver never negotiate: both derive the same
//! [`TransferLayout`](layout::TransferLayout) from the structure size and the
//! frame format they were compiled against.

/// Largest number of segments addressable by the one-byte index.
pub const MAX_SEGMENTS: usize = 256;

pub mod codec;
pub mod format;
pub mod layout;
pub mod reassembler;
pub mod segmenter;
