//! Boundary layer between application structures and the byte images the
//! segmentation core transports.
pub mod codec;
