//! Uniform-interval replay of an instruction stream.
//!
//! A [`Sampler`] maps an instruction stream onto a sampling-like interface: it
//! repeatedly calls [`Accumulator::fold_until`] with a bound that grows by a
//! fixed interval, and yields a snapshot of every channel at each bound.
//!
//! ```
//! use vtp::{Instruction, Sampler, SamplerConfig};
//!
//! let stream = [
//!     Instruction::SetAmplitude { channel_select: 0, time_offset: 0, amplitude: 512 },
//!     Instruction::SetAmplitude { channel_select: 1, time_offset: 20, amplitude: 0 },
//! ];
//!
//! let config = SamplerConfig::new(2).with_interval_ms(10);
//! let amplitudes: Vec<(u64, u16)> = Sampler::new(&stream, &config)
//!     .map(|sample| sample.map(|s| (s.at_ms, s.channels[0].amplitude)))
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(amplitudes, vec![(0, 512), (10, 512), (20, 0)]);
//! # Ok::<(), vtp::Error>(())
//! ```

mod config;

pub use config::SamplerConfig;

use alloc::vec::Vec;
use core::iter::FusedIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fold::{Accumulator, ChannelState};
use crate::instruction::Instruction;

/// Snapshot of every channel at a logical point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Sample {
    /// Logical time of the sample in milliseconds.
    pub at_ms: u64,
    /// State of each channel, 0-indexed.
    pub channels: Vec<ChannelState>,
}

/// Iterator over samples of an instruction stream.
///
/// The sampler ends after the first sample taken once every instruction has
/// been applied. If an instruction fails to apply, the error is yielded once
/// and the sampler ends; the accumulator then holds every instruction applied
/// before the failing one.
#[derive(Clone, Debug)]
pub struct Sampler<'a> {
    instructions: &'a [Instruction],
    accumulator: Accumulator,
    /// Number of instructions applied so far
    position: usize,
    next_sample_ms: u64,
    interval_ms: u64,
    finished: bool,
}

impl<'a> Sampler<'a> {
    /// Create a sampler over `instructions` with a fresh accumulator.
    ///
    /// A zero interval is treated as 1 ms so that sampling always progresses.
    pub fn new(instructions: &'a [Instruction], config: &SamplerConfig) -> Self {
        Self::with_accumulator(
            instructions,
            Accumulator::new(config.channel_count),
            config.start_ms,
            config.interval_ms,
        )
    }

    /// Create a sampler that continues from an existing accumulator.
    pub fn with_accumulator(
        instructions: &'a [Instruction],
        accumulator: Accumulator,
        start_ms: u64,
        interval_ms: u64,
    ) -> Self {
        Self {
            instructions,
            accumulator,
            position: 0,
            next_sample_ms: start_ms,
            interval_ms: interval_ms.max(1),
            finished: false,
        }
    }

    /// The accumulator in its current state.
    #[inline]
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Number of instructions applied so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Instructions not yet applied.
    #[inline]
    pub fn remaining(&self) -> &'a [Instruction] {
        &self.instructions[self.position..]
    }

    /// Consume the sampler, returning its accumulator.
    pub fn into_accumulator(self) -> Accumulator {
        self.accumulator
    }
}

impl Iterator for Sampler<'_> {
    type Item = Result<Sample, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let at_ms = self.next_sample_ms;
        let remaining = &self.instructions[self.position..];
        match self.accumulator.fold_until(remaining, at_ms) {
            Ok(applied) => self.position += applied,
            Err(err) => {
                self.finished = true;
                return Some(Err(err));
            }
        }

        if self.position >= self.instructions.len() || at_ms == u64::MAX {
            self.finished = true;
        }
        self.next_sample_ms = at_ms.saturating_add(self.interval_ms);

        Some(Ok(Sample {
            at_ms,
            channels: self.accumulator.channels().to_vec(),
        }))
    }
}

impl FusedIterator for Sampler<'_> {}
