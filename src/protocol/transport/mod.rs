//! Transport layer: frame representation, bus abstraction traits, and the
//! async helpers that move segmented structures over a bus.
//!
//! ## Timing
//!
//! [`SEGMENT_INTER_FRAME_DELAY_MS`] paces segmented transmissions on embedded
//! CAN controllers.

pub mod can_frame;
pub mod traits;

/// Recommended minimal delay between two frames of the same segmented structure (ms).
///
/// Back-to-back frames are legal, yet a short pause avoids saturating small
/// embedded TX mailboxes (notably ESP32 TWAI with a three-frame buffer) and
/// gives slower receivers time to drain their FIFO.
///
/// # Recommended Values
///
/// - **1 ms**: Minimum to avoid TX buffer saturation.
/// - **2 ms**: Suggested default for maximum compatibility.
/// - **5 ms**: Conservative choice for resource-constrained systems.
pub const SEGMENT_INTER_FRAME_DELAY_MS: u32 = 2;

