//! Instruction stream generators for benchmarking and testing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vtp::instruction::{MAX_LONG_TIME_OFFSET, MAX_PARAMETER, MAX_SHORT_TIME_OFFSET};
use vtp::{Instruction, InstructionKind};

/// Seed used when none is given, so that output is reproducible by default.
const DEFAULT_SEED: u64 = 0x5654_5031;

#[derive(Debug, Clone, Copy)]
pub enum StreamPattern {
    /// Uniform mix of the requested instruction kinds
    Random,
    /// Single-channel amplitude pulses (on, then off)
    Pulses,
    /// Broadcast frequency sweep at a fixed step
    Sweep,
}

/// Options shared by every pattern.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Number of instructions to generate
    pub count: usize,
    /// Number of channels of the target display
    pub channels: usize,
    /// Largest time offset between two instructions
    pub max_gap_ms: u32,
    /// Random seed
    pub seed: Option<u64>,
    /// Kinds to draw from (`Random` only); empty means all kinds
    pub kinds: Vec<InstructionKind>,
}

/// Generate a valid instruction stream for a display with `options.channels` channels.
pub fn generate_stream(pattern: StreamPattern, options: &StreamOptions) -> Vec<Instruction> {
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed.unwrap_or(DEFAULT_SEED));
    match pattern {
        StreamPattern::Random => generate_random(&mut rng, options),
        StreamPattern::Pulses => generate_pulses(&mut rng, options),
        StreamPattern::Sweep => generate_sweep(options),
    }
}

/// Highest channel select that addresses an existing channel.
fn max_channel_select(channels: usize) -> u8 {
    channels.min(usize::from(u8::MAX)) as u8
}

fn short_gap(max_gap_ms: u32) -> u16 {
    max_gap_ms.min(u32::from(MAX_SHORT_TIME_OFFSET)) as u16
}

/// Uniform mix of instruction kinds
fn generate_random(rng: &mut ChaCha8Rng, options: &StreamOptions) -> Vec<Instruction> {
    let kinds: &[InstructionKind] = if options.kinds.is_empty() {
        &InstructionKind::ALL
    } else {
        &options.kinds
    };
    let max_select = max_channel_select(options.channels);
    let long_gap = options.max_gap_ms.min(MAX_LONG_TIME_OFFSET);
    let short_gap = short_gap(options.max_gap_ms);

    (0..options.count)
        .map(|_| match kinds[rng.gen_range(0..kinds.len())] {
            InstructionKind::IncrementTime => Instruction::IncrementTime {
                time_offset: rng.gen_range(0..=long_gap),
            },
            InstructionKind::SetFrequency => Instruction::SetFrequency {
                channel_select: rng.gen_range(0..=max_select),
                time_offset: rng.gen_range(0..=short_gap),
                frequency: rng.gen_range(0..=MAX_PARAMETER),
            },
            InstructionKind::SetAmplitude => Instruction::SetAmplitude {
                channel_select: rng.gen_range(0..=max_select),
                time_offset: rng.gen_range(0..=short_gap),
                amplitude: rng.gen_range(0..=MAX_PARAMETER),
            },
        })
        .collect()
}

/// Amplitude pulses on random channels
fn generate_pulses(rng: &mut ChaCha8Rng, options: &StreamOptions) -> Vec<Instruction> {
    let max_select = max_channel_select(options.channels).max(1);
    let gap = short_gap(options.max_gap_ms).max(1);
    let mut out = Vec::with_capacity(options.count);

    while out.len() < options.count {
        let channel_select = rng.gen_range(1..=max_select);
        out.push(Instruction::SetAmplitude {
            channel_select,
            time_offset: rng.gen_range(0..=gap),
            amplitude: rng.gen_range(MAX_PARAMETER / 2..=MAX_PARAMETER),
        });
        if out.len() < options.count {
            out.push(Instruction::SetAmplitude {
                channel_select,
                time_offset: rng.gen_range(1..=gap),
                amplitude: 0,
            });
        }
    }

    out
}

/// Broadcast frequency sweep; the first instruction sets a fixed amplitude
fn generate_sweep(options: &StreamOptions) -> Vec<Instruction> {
    let step = short_gap(options.max_gap_ms);
    let mut out = Vec::with_capacity(options.count);

    if options.count > 0 {
        out.push(Instruction::SetAmplitude {
            channel_select: 0,
            time_offset: 0,
            amplitude: MAX_PARAMETER * 3 / 4,
        });
    }

    let mut frequency: u16 = 0;
    while out.len() < options.count {
        out.push(Instruction::SetFrequency {
            channel_select: 0,
            time_offset: step,
            frequency,
        });
        frequency = (frequency + 8) % (MAX_PARAMETER + 1);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtp::Accumulator;

    fn options(count: usize) -> StreamOptions {
        StreamOptions {
            count,
            channels: 4,
            max_gap_ms: 100,
            seed: Some(7),
            kinds: Vec::new(),
        }
    }

    #[test]
    fn test_streams_have_requested_length() {
        for pattern in [StreamPattern::Random, StreamPattern::Pulses, StreamPattern::Sweep] {
            assert_eq!(generate_stream(pattern, &options(0)).len(), 0);
            assert_eq!(generate_stream(pattern, &options(101)).len(), 101);
        }
    }

    #[test]
    fn test_streams_fold_cleanly() {
        for pattern in [StreamPattern::Random, StreamPattern::Pulses, StreamPattern::Sweep] {
            let stream = generate_stream(pattern, &options(500));
            let mut acc = Accumulator::new(4);
            acc.fold(&stream).unwrap();
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_stream(StreamPattern::Random, &options(64));
        let b = generate_stream(StreamPattern::Random, &options(64));
        assert_eq!(a, b);
    }

    #[test]
    fn test_kind_filter() {
        let opts = StreamOptions {
            kinds: vec![InstructionKind::IncrementTime],
            ..options(50)
        };
        let stream = generate_stream(StreamPattern::Random, &opts);
        assert!(stream
            .iter()
            .all(|i| i.kind() == InstructionKind::IncrementTime));
    }
}
