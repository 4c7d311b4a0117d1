//! Reassembly tests covering ordering, stray indices, duplicates and reset.
// REASSEMBLER
use super::*;
use crate::protocol::segmentation::format::Fd;

fn frame(payload: &[u8]) -> CanFrame {
    CanFrame::from_parts(0x611, payload).unwrap()
}

#[test]
/// Frames delivered in reverse order still complete the structure.
fn test_reverse_order_reassembly() {
    let mut reassembler = Reassembler::<10>::new();

    let frame1 = frame(&[1, 8, 9, 10, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert!(!reassembler.accept(&frame1));
    assert_eq!(reassembler.state(), ReassemblyState::Partial);

    let frame0 = frame(&[0, 1, 2, 3, 4, 5, 6, 7]);
    assert!(reassembler.accept(&frame0));

    assert_eq!(reassembler.unpacked(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(reassembler.state(), ReassemblyState::Empty);
}

#[test]
/// An index beyond the transfer is dropped without touching the context.
fn test_out_of_range_index_ignored() {
    let mut reassembler = Reassembler::<20>::new();
    assert_eq!(reassembler.layout().segment_count(), 3);

    assert_eq!(
        reassembler.process_payload(&[0, 1, 1, 1, 1, 1, 1, 1]),
        ProcessResult::SegmentStored
    );
    let before = reassembler.clone();

    assert_eq!(
        reassembler.process_payload(&[250, 9, 9, 9, 9, 9, 9, 9]),
        ProcessResult::Ignored
    );
    assert_eq!(reassembler.buffer, before.buffer);
    assert_eq!(reassembler.received, before.received);
    assert_eq!(reassembler.received_count(), 1);
}

#[test]
/// Empty and truncated payloads are dropped.
fn test_short_payload_ignored() {
    let mut reassembler = Reassembler::<10>::new();
    assert_eq!(reassembler.process_payload(&[]), ProcessResult::Ignored);
    // Segment 0 needs seven data bytes
    assert_eq!(
        reassembler.process_payload(&[0, 1, 2, 3]),
        ProcessResult::Ignored
    );
    // Final segment only needs its three-byte remainder
    assert_eq!(
        reassembler.process_payload(&[1, 8, 9, 10]),
        ProcessResult::SegmentStored
    );
    assert_eq!(reassembler.state(), ReassemblyState::Partial);
}

#[test]
/// A duplicated segment overwrites silently and never completes on its own.
fn test_duplicate_segment_overwrites() {
    let mut reassembler = Reassembler::<14>::new();
    assert!(!reassembler.accept(&frame(&[0, 1, 1, 1, 1, 1, 1, 1])));
    assert!(!reassembler.accept(&frame(&[0, 2, 2, 2, 2, 2, 2, 2])));
    assert_eq!(reassembler.received_count(), 1);

    assert!(reassembler.accept(&frame(&[1, 3, 3, 3, 3, 3, 3, 3])));
    assert_eq!(
        reassembler.unpacked(),
        &[2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3]
    );
}

#[test]
/// After completion the context behaves like a fresh one.
fn test_context_reusable_after_completion() {
    let mut reassembler = Reassembler::<8>::new();
    assert!(!reassembler.accept(&frame(&[0, 1, 2, 3, 4, 5, 6, 7])));
    assert!(reassembler.accept(&frame(&[1, 8, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF])));
    assert_eq!(reassembler.unpacked(), &[1, 2, 3, 4, 5, 6, 7, 8]);

    // The previous transfer leaves no marker behind
    assert_eq!(reassembler.received_count(), 0);
    assert_eq!(reassembler.buffer, [0; 8]);
    assert!(!reassembler.accept(&frame(&[1, 9, 0, 0, 0, 0, 0, 0])));
    assert!(reassembler.accept(&frame(&[0, 10, 11, 12, 13, 14, 15, 16])));
    assert_eq!(reassembler.unpacked(), &[10, 11, 12, 13, 14, 15, 16, 9]);
}

#[test]
/// An explicit reset abandons a partial transfer.
fn test_reset_abandons_partial_transfer() {
    let mut reassembler = Reassembler::<10>::new();
    reassembler.accept(&frame(&[0, 1, 2, 3, 4, 5, 6, 7]));
    reassembler.reset();
    assert_eq!(reassembler.state(), ReassemblyState::Empty);
    // Segment 1 alone no longer completes anything
    assert!(!reassembler.accept(&frame(&[1, 8, 9, 10])));
}

#[test]
/// Nothing has been unpacked before the first completion.
fn test_unpacked_zeroed_initially() {
    let reassembler = Reassembler::<5>::default();
    assert_eq!(reassembler.unpacked(), &[0; 5]);
}

#[test]
/// FD contexts copy 63-byte segments.
fn test_fd_reassembly() {
    let mut reassembler = Reassembler::<70, Fd>::new();
    let mut first = [0x11u8; 64];
    first[0] = 0;
    let mut second = [0xFFu8; 64];
    second[0] = 1;
    second[1..8].copy_from_slice(&[0x22; 7]);

    assert!(!reassembler.accept(&CanFrame::from_parts(1, &second).unwrap()));
    assert!(reassembler.accept(&CanFrame::from_parts(1, &first).unwrap()));
    assert_eq!(&reassembler.unpacked()[..63], &[0x11; 63]);
    assert_eq!(&reassembler.unpacked()[63..], &[0x22; 7]);
}

#[test]
/// Marker set bookkeeping across word boundaries.
fn test_segment_set() {
    let mut set = SegmentSet::new();
    assert!(set.is_empty());
    set.insert(0);
    set.insert(31);
    set.insert(32);
    set.insert(255);
    assert!(set.contains(31) && set.contains(32) && set.contains(255));
    assert!(!set.contains(33));
    assert_eq!(set.len(), 4);
    set.clear();
    assert!(set.is_empty());
}
