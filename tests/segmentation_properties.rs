//! Property tests for the segmentation protocol: frame counts, byte coverage,
//! and order-independent reassembly.

use korri_canstruct::protocol::segmentation::{
    format::{Classic, Fd, FrameFormat, CLASSIC_FRAME_BUDGET, FD_FRAME_BUDGET},
    layout::TransferLayout,
    reassembler::{ReassemblyState, Reassembler},
    segmenter::{segment, Segmenter},
};
use korri_canstruct::protocol::transport::can_frame::CanFrame;
use proptest::prelude::*;

fn budget_and_size() -> impl Strategy<Value = (usize, usize)> {
    prop_oneof![Just(CLASSIC_FRAME_BUDGET), Just(FD_FRAME_BUDGET)]
        .prop_flat_map(|budget| (Just(budget), 1..=256 * budget))
}

/// Pack `blob`, deliver its frames in `order`, and check completion happens
/// exactly once, on the last delivered frame.
fn check_permutation<const N: usize, F: FrameFormat>(blob: &[u8; N], order: &[usize]) {
    let frames: Vec<CanFrame> = Segmenter::<N, F>::new(0x10).pack(blob).collect();
    assert_eq!(frames.len(), order.len());

    let mut reassembler = Reassembler::<N, F>::new();
    for (position, &index) in order.iter().enumerate() {
        let completed = reassembler.accept(&frames[index]);
        assert_eq!(completed, position == order.len() - 1);
    }
    assert_eq!(reassembler.unpacked(), blob);
    assert_eq!(reassembler.state(), ReassemblyState::Empty);
}

proptest! {
    #[test]
    fn pack_emits_ceil_frames_covering_the_blob(
        (budget, size) in budget_and_size(),
        seed in any::<u8>(),
    ) {
        let blob: Vec<u8> = (0..size).map(|i| (i as u8).wrapping_add(seed)).collect();
        let layout = TransferLayout::new(size, budget).unwrap();
        let frames: Vec<CanFrame> = segment(7, budget == FD_FRAME_BUDGET, &blob, layout)
            .unwrap()
            .collect();

        prop_assert_eq!(frames.len(), size.div_ceil(budget));

        let mut rebuilt = Vec::with_capacity(size);
        for (index, frame) in frames.iter().enumerate() {
            prop_assert_eq!(frame.segment_index() as usize, index);
            prop_assert_eq!(frame.len, budget + 1);
            let data_len = layout.segment_len(index);
            prop_assert!((1..=budget).contains(&data_len));
            rebuilt.extend_from_slice(&frame.data[1..1 + data_len]);
        }
        prop_assert_eq!(rebuilt, blob);
    }

    #[test]
    fn classic_reassembly_is_order_independent(
        blob in proptest::collection::vec(any::<u8>(), 100),
        order in Just((0..15).collect::<Vec<usize>>()).prop_shuffle(),
    ) {
        let blob: [u8; 100] = blob.try_into().unwrap();
        check_permutation::<100, Classic>(&blob, &order);
    }

    #[test]
    fn fd_reassembly_is_order_independent(
        blob in proptest::collection::vec(any::<u8>(), 1000),
        order in Just((0..16).collect::<Vec<usize>>()).prop_shuffle(),
    ) {
        let blob: [u8; 1000] = blob.try_into().unwrap();
        check_permutation::<1000, Fd>(&blob, &order);
    }

    #[test]
    fn stray_indices_never_mutate(index in 15u8..=255, filler in any::<u8>()) {
        let mut reassembler = Reassembler::<100>::new();
        let mut payload = [filler; 8];
        payload[0] = 0;
        reassembler.process_payload(&payload);

        let snapshot = reassembler.clone();
        payload[0] = index;
        prop_assert!(!reassembler.accept(&CanFrame::from_parts(1, &payload).unwrap()));
        prop_assert_eq!(reassembler.received_count(), snapshot.received_count());
        prop_assert_eq!(reassembler.state(), ReassemblyState::Partial);
    }
}
