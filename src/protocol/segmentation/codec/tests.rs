//! Tests for the typed structure codec.
use super::*;
use crate::infra::codec::cursor::{StructReader, StructWriter};
use crate::protocol::segmentation::format::Fd;

#[derive(Debug, Clone, PartialEq)]
/// Joint feedback: position and velocity of one arm joint, plus a fault flag.
struct JointFeedback {
    position: f32,
    velocity: f32,
    temperature: i16,
    fault: bool,
}

impl CanStructure<11> for JointFeedback {
    fn encode(&self, writer: &mut StructWriter<'_>) -> Result<(), EncodeError> {
        writer.write_f32(self.position)?;
        writer.write_f32(self.velocity)?;
        writer.write_i16(self.temperature)?;
        writer.write_bool(self.fault)
    }

    fn decode(reader: &mut StructReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            position: reader.read_f32()?,
            velocity: reader.read_f32()?,
            temperature: reader.read_i16()?,
            fault: reader.read_bool("fault")?,
        })
    }
}

fn sample() -> JointFeedback {
    JointFeedback {
        position: 1.25,
        velocity: -0.5,
        temperature: 42,
        fault: true,
    }
}

#[test]
/// A value packed by one codec is unpacked by another.
fn test_typed_roundtrip() {
    let mut sender = StructureCodec::<JointFeedback, 11>::new(0x613);
    let mut receiver = StructureCodec::<JointFeedback, 11>::new(0x613);

    let frames = sender.pack(&sample()).unwrap();
    assert_eq!(frames.len(), 2);

    let mut completions = 0;
    for frame in frames {
        assert_eq!(frame.id, 0x613);
        if receiver.unpack(&frame).unwrap() {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(receiver.unpacked(), Some(&sample()));
}

#[test]
/// Nothing is available before a transfer completes.
fn test_unpacked_none_before_completion() {
    let mut sender = StructureCodec::<JointFeedback, 11, Fd>::new(1);
    let mut receiver = StructureCodec::<JointFeedback, 11, Fd>::new(1);
    assert!(receiver.unpacked().is_none());

    // A single FD frame carries the whole structure
    let frame = sender.pack(&sample()).unwrap().next().unwrap();
    assert!(frame.fd);
    assert!(receiver.unpack(&frame).unwrap());
    assert_eq!(receiver.unpacked(), Some(&sample()));
}

#[test]
/// A completed image with an invalid field surfaces a decode error.
fn test_invalid_image_reported() {
    let mut image = sample().to_bytes().unwrap();
    image[10] = 7; // not a boolean

    let segmenter = Segmenter::<11>::new(2);
    let mut receiver = StructureCodec::<JointFeedback, 11>::new(2);
    let mut frames = segmenter.pack(&image);

    assert_eq!(receiver.unpack(&frames.next().unwrap()), Ok(false));
    assert_eq!(
        receiver.unpack(&frames.next().unwrap()),
        Err(DecodeError::InvalidValue { field: "fault" })
    );
    assert!(receiver.unpacked().is_none());
}
