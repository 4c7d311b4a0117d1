//! # Quickstart Example
//!
//! Minimal example demonstrating the basics of korri-canstruct:
//! - Describe a structure's byte image with `CanStructure`
//! - Segment it into classic CAN frames
//! - Reassemble frames delivered out of order
//!
//! This example uses `std` for a quick trial run.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use korri_canstruct::error::{DecodeError, EncodeError};
use korri_canstruct::infra::codec::{
    cursor::{StructReader, StructWriter},
    traits::CanStructure,
};
use korri_canstruct::protocol::segmentation::{
    codec::StructureCodec, reassembler::Reassembler, segmenter::Segmenter,
};

/// Wheel suspension telemetry: one force and one angle per wheel.
#[derive(Debug, PartialEq)]
struct SuspensionState {
    forces: [f32; 4],
    angles: [f32; 4],
    status: u8,
}

impl CanStructure<33> for SuspensionState {
    fn encode(&self, writer: &mut StructWriter<'_>) -> Result<(), EncodeError> {
        for force in self.forces {
            writer.write_f32(force)?;
        }
        for angle in self.angles {
            writer.write_f32(angle)?;
        }
        writer.write_u8(self.status)
    }

    fn decode(reader: &mut StructReader<'_>) -> Result<Self, DecodeError> {
        let mut forces = [0.0; 4];
        for force in forces.iter_mut() {
            *force = reader.read_f32()?;
        }
        let mut angles = [0.0; 4];
        for angle in angles.iter_mut() {
            *angle = reader.read_f32()?;
        }
        Ok(Self {
            forces,
            angles,
            status: reader.read_u8()?,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== korri-canstruct Quickstart ===\n");

    // ======================================================================
    // 1. Segment a raw byte image
    // ======================================================================
    println!("1. Segmenting a 10-byte image over classic CAN");

    let image = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let segmenter = Segmenter::<10>::new(0x611);
    let frames: Vec<_> = segmenter.pack(&image).collect();
    for frame in &frames {
        println!(
            "   id={:#05X} index={} data={:02X?}",
            frame.id,
            frame.segment_index(),
            &frame.data[..frame.len]
        );
    }

    // ======================================================================
    // 2. Reassemble out of order
    // ======================================================================
    println!("\n2. Reassembling in reverse order");

    let mut reassembler = Reassembler::<10>::new();
    for frame in frames.iter().rev() {
        let completed = reassembler.accept(frame);
        println!("   segment {} -> completed: {}", frame.segment_index(), completed);
    }
    println!("   image: {:?}\n", reassembler.unpacked());

    // ======================================================================
    // 3. Typed structures
    // ======================================================================
    println!("3. Sending a typed structure");

    let state = SuspensionState {
        forces: [812.5, 790.0, 801.25, 820.0],
        angles: [0.12, 0.10, 0.11, 0.13],
        status: 0,
    };

    let mut sender = StructureCodec::<SuspensionState, 33>::new(0x1312);
    let mut receiver = StructureCodec::<SuspensionState, 33>::new(0x1312);

    let mut count = 0;
    for frame in sender.pack(&state).map_err(|e| format!("{e}"))? {
        count += 1;
        if receiver.unpack(&frame).map_err(|e| format!("{e}"))? {
            println!("   reassembled after {count} frames");
        }
    }
    println!("   decoded: {:?}", receiver.unpacked());
    assert_eq!(receiver.unpacked(), Some(&state));

    Ok(())
}
