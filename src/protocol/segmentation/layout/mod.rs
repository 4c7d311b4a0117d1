//! Transfer layout shared by both ends of a segmented transfer: how many
//! segments a structure needs and which byte range each segment covers.
use core::ops::Range;

use super::{format::FD_FRAME_BUDGET, MAX_SEGMENTS};
use crate::error::LayoutError;

//==================================================================================TRANSFER_LAYOUT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Segment geometry derived from a structure size and a frame budget.
///
/// Nothing here travels on the wire; both sides recompute it.
pub struct TransferLayout {
    total_size: usize,
    budget: usize,
    segment_count: usize,
}

impl TransferLayout {
    /// Validate a layout at runtime.
    ///
    /// Rejects empty structures, budgets outside `1..=63` and structures that
    /// need more than [`MAX_SEGMENTS`] segments.
    pub const fn new(total_size: usize, budget: usize) -> Result<Self, LayoutError> {
        if budget == 0 || budget > FD_FRAME_BUDGET {
            return Err(LayoutError::InvalidBudget { budget });
        }
        if total_size == 0 {
            return Err(LayoutError::EmptyStructure);
        }
        let max = MAX_SEGMENTS * budget;
        if total_size > max {
            return Err(LayoutError::StructureTooLarge {
                size: total_size,
                max,
            });
        }
        Ok(Self {
            total_size,
            budget,
            segment_count: total_size.div_ceil(budget),
        })
    }

    /// Same validation as [`TransferLayout::new`], evaluated in const context.
    ///
    /// Used from associated constants so that an oversized structure is a
    /// build failure instead of a runtime one.
    pub const fn checked(total_size: usize, budget: usize) -> Self {
        match Self::new(total_size, budget) {
            Ok(layout) => layout,
            Err(LayoutError::EmptyStructure) => {
                panic!("segmented structure must be at least one byte long")
            }
            Err(LayoutError::InvalidBudget { .. }) => {
                panic!("frame budget must lie in 1..=63 bytes")
            }
            Err(LayoutError::StructureTooLarge { .. }) => {
                panic!("structure needs more than 256 segments for this frame format")
            }
        }
    }

    /// Structure size in bytes.
    pub const fn total_size(&self) -> usize {
        self.total_size
    }

    /// Data bytes per frame, excluding the index byte.
    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// `ceil(total_size / budget)`.
    pub const fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Declared frame length: index byte plus a full budget, for every frame.
    pub const fn frame_len(&self) -> usize {
        self.budget + 1
    }

    /// Byte offset of segment `index` inside the structure.
    pub const fn segment_offset(&self, index: usize) -> usize {
        index * self.budget
    }

    /// Number of data bytes carried by segment `index`.
    ///
    /// Full budget for every segment but the last, which carries the
    /// remainder `total_size - (segment_count - 1) * budget`. Returns `0`
    /// for indices outside the transfer.
    pub const fn segment_len(&self, index: usize) -> usize {
        if index >= self.segment_count {
            0
        } else if index + 1 < self.segment_count {
            self.budget
        } else {
            self.total_size - (self.segment_count - 1) * self.budget
        }
    }

    /// Byte range of segment `index` inside the structure.
    pub fn segment_range(&self, index: usize) -> Option<Range<usize>> {
        if index >= self.segment_count {
            return None;
        }
        let start = self.segment_offset(index);
        Some(start..start + self.segment_len(index))
    }
}
