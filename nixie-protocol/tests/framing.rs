//! Link framing properties over noisy input

use nixie_protocol::{crc8, Frame, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
use proptest::prelude::*;

/// Feed everything, collecting frames and skipping errors
fn decode_all(bytes: &[u8]) -> Vec<Frame> {
    let mut parser = FrameParser::new();
    bytes
        .iter()
        .filter_map(|&b| parser.feed(b).ok().flatten())
        .collect()
}

fn frame_strategy() -> impl Strategy<Value = Frame> {
    (
        any::<u8>(),
        prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
    )
        .prop_map(|(kind, payload)| Frame::new(kind, &payload).unwrap())
}

proptest! {
    /// A valid frame is recovered after any START-free line noise
    #[test]
    fn prop_decodes_after_noise(
        noise in prop::collection::vec(any::<u8>().prop_filter("no START", |b| *b != FRAME_START), 0..40),
        frame in frame_strategy(),
    ) {
        let mut bytes = noise;
        bytes.extend_from_slice(&frame.encode_to_vec().unwrap());

        prop_assert_eq!(decode_all(&bytes), vec![frame]);
    }

    /// Back-to-back frames all decode, in order
    #[test]
    fn prop_stream_of_frames(frames in prop::collection::vec(frame_strategy(), 1..8)) {
        let mut bytes = Vec::new();
        for frame in &frames {
            bytes.extend_from_slice(&frame.encode_to_vec().unwrap());
        }

        prop_assert_eq!(decode_all(&bytes), frames);
    }

    /// Arbitrary input never panics, and anything decoded carries a good CRC
    #[test]
    fn prop_arbitrary_input(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        for frame in decode_all(&bytes) {
            prop_assert!(frame.payload.len() <= MAX_PAYLOAD_SIZE);

            let encoded = frame.encode_to_vec().unwrap();
            let (crc, covered) = encoded[1..].split_last().unwrap();
            prop_assert_eq!(*crc, crc8(0, covered));
        }
    }
}

#[test]
fn corrupted_frame_costs_only_itself() {
    let first = Frame::new(0x03, b"09:15").unwrap();
    let second = Frame::new(0x03, b"09:16").unwrap();

    let mut bytes: Vec<u8> = first.encode_to_vec().unwrap().to_vec();
    // Flip a payload bit
    bytes[4] ^= 0x01;
    bytes.extend_from_slice(&second.encode_to_vec().unwrap());

    assert_eq!(decode_all(&bytes), vec![second]);
}
