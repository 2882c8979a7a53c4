//! Property tests for the codec and the fold engine.

use proptest::prelude::*;
use vtp::instruction::{MAX_LONG_TIME_OFFSET, MAX_PARAMETER, MAX_SHORT_TIME_OFFSET};
use vtp::{
    decode_instruction, encode_instruction, read_instruction_words, write_instruction_words,
    Accumulator, ErrorKind, Instruction,
};

/// Instructions whose fields fit their bit widths.
fn instruction() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (0..=MAX_LONG_TIME_OFFSET).prop_map(|time_offset| Instruction::IncrementTime { time_offset }),
        (any::<u8>(), 0..=MAX_SHORT_TIME_OFFSET, 0..=MAX_PARAMETER).prop_map(
            |(channel_select, time_offset, frequency)| Instruction::SetFrequency {
                channel_select,
                time_offset,
                frequency,
            }
        ),
        (any::<u8>(), 0..=MAX_SHORT_TIME_OFFSET, 0..=MAX_PARAMETER).prop_map(
            |(channel_select, time_offset, amplitude)| Instruction::SetAmplitude {
                channel_select,
                time_offset,
                amplitude,
            }
        ),
    ]
}

/// Instructions that address channels of a display with `channels` channels,
/// with time increments short enough to replay piecewise.
fn addressable_instruction(channels: u8) -> impl Strategy<Value = Instruction> {
    instruction().prop_map(move |instruction| match instruction {
        Instruction::IncrementTime { time_offset } => Instruction::IncrementTime {
            time_offset: time_offset % 2048,
        },
        Instruction::SetFrequency {
            channel_select,
            time_offset,
            frequency,
        } => Instruction::SetFrequency {
            channel_select: channel_select % (channels + 1),
            time_offset,
            frequency,
        },
        Instruction::SetAmplitude {
            channel_select,
            time_offset,
            amplitude,
        } => Instruction::SetAmplitude {
            channel_select: channel_select % (channels + 1),
            time_offset,
            amplitude,
        },
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(i in instruction()) {
        prop_assert_eq!(decode_instruction(encode_instruction(&i)), Ok(i));
    }

    #[test]
    fn encode_inverts_decode(opcode in 0u32..3, payload in 0u32..(1 << 28)) {
        let word = (opcode << 28) | payload;
        let instruction = decode_instruction(word).unwrap();
        prop_assert_eq!(encode_instruction(&instruction), word);
    }

    #[test]
    fn unknown_opcodes_are_rejected(opcode in 3u32..16, payload in 0u32..(1 << 28)) {
        let err = decode_instruction((opcode << 28) | payload).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidInstructionCode);
    }

    #[test]
    fn byte_framing_roundtrip(words in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut bytes = words;
        bytes.truncate(bytes.len() / 4 * 4);
        let read = read_instruction_words(&bytes).unwrap();
        prop_assert_eq!(read.len(), bytes.len() / 4);
        prop_assert_eq!(write_instruction_words(&read), bytes);
    }

    #[test]
    fn misaligned_buffers_are_rejected(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assume!(bytes.len() % 4 != 0);
        let err = read_instruction_words(&bytes).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidBufferLength);
    }

    #[test]
    fn elapsed_time_is_sum_of_offsets(
        channels in 1u8..8,
        stream in prop::collection::vec(addressable_instruction(7), 0..64),
    ) {
        let stream: Vec<Instruction> = stream
            .into_iter()
            .filter(|i| match *i {
                Instruction::SetFrequency { channel_select, .. }
                | Instruction::SetAmplitude { channel_select, .. } => channel_select <= channels,
                Instruction::IncrementTime { .. } => true,
            })
            .collect();

        let mut acc = Accumulator::new(usize::from(channels));
        let mut previous = 0;
        for instruction in &stream {
            acc.fold_single(instruction).unwrap();
            prop_assert!(acc.milliseconds_elapsed() >= previous);
            previous = acc.milliseconds_elapsed();
        }

        let expected: u64 = stream.iter().map(|i| u64::from(i.time_offset())).sum();
        prop_assert_eq!(acc.milliseconds_elapsed(), expected);
    }

    #[test]
    fn broadcast_sets_every_channel(channels in 1usize..32, amplitude in 0..=MAX_PARAMETER) {
        let mut acc = Accumulator::new(channels);
        acc.fold_single(&Instruction::SetAmplitude { channel_select: 0, time_offset: 0, amplitude }).unwrap();
        prop_assert!(acc.channels().iter().all(|c| c.amplitude == amplitude));
    }

    #[test]
    fn out_of_range_leaves_state_untouched(
        channels in 1u8..16,
        extra in 1u8..16,
        frequency in 0..=MAX_PARAMETER,
    ) {
        let mut acc = Accumulator::new(usize::from(channels));
        acc.fold_single(&Instruction::SetFrequency { channel_select: 0, time_offset: 3, frequency: 1 }).unwrap();
        let before = acc.clone();

        let err = acc
            .fold_single(&Instruction::SetFrequency {
                channel_select: channels + extra,
                time_offset: 5,
                frequency,
            })
            .unwrap_err();

        prop_assert_eq!(err.kind(), ErrorKind::ChannelOutOfRange);
        prop_assert_eq!(acc, before);
    }

    #[test]
    fn piecewise_fold_until_matches_fold(
        stream in prop::collection::vec(addressable_instruction(4), 0..64),
        step in 10u64..500,
    ) {
        let mut full = Accumulator::new(4);
        full.fold(&stream).unwrap();

        let mut piecewise = Accumulator::new(4);
        let mut cursor = 0;
        let mut bound = 0;
        while cursor < stream.len() {
            cursor += piecewise.fold_until(&stream[cursor..], bound).unwrap();
            prop_assert!(piecewise.milliseconds_elapsed() <= bound);
            bound += step;
        }

        prop_assert_eq!(piecewise, full);
    }
}
