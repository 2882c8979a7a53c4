//! The fold engine: replaying instructions onto display state.
//!
//! An [`Accumulator`] holds the reconstructed state of every channel of a
//! display plus the logical time elapsed so far. Folding applies instructions
//! to it left to right, in place.
//!
//! ## Time
//!
//! Each instruction adds its time offset to
//! [`Accumulator::milliseconds_elapsed`] after its channel writes. Offsets are
//! unsigned, so elapsed time never decreases. It saturates at `u64::MAX`.
//! The clock is logical: nothing here waits on a wall clock.
//!
//! ## Channel Select
//!
//! - `0` writes every channel
//! - `1..=channel_count` writes exactly channel `channel_select - 1`
//! - anything larger fails with [`Error::ChannelOutOfRange`] and writes nothing
//!
//! ## Errors
//!
//! A failing instruction leaves the accumulator exactly as it was before that
//! instruction, including its elapsed time. Instructions applied before it in
//! the same fold stay applied; callers needing all-or-nothing semantics clone
//! the accumulator first.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::instruction::Instruction;

/// State of a single channel (actuator) of the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelState {
    /// Current amplitude (nominally 0-1023).
    pub amplitude: u16,
    /// Current frequency (nominally 0-1023).
    pub frequency: u16,
}

impl ChannelState {
    /// Create a channel state.
    pub const fn new(amplitude: u16, frequency: u16) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }
}

/// Running state of a display after a prefix of an instruction stream.
///
/// The channel count is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Accumulator {
    channels: Vec<ChannelState>,
    milliseconds_elapsed: u64,
}

impl Accumulator {
    /// Create an accumulator with `channel_count` zeroed channels at time zero.
    pub fn new(channel_count: usize) -> Self {
        Self {
            channels: vec![ChannelState::default(); channel_count],
            milliseconds_elapsed: 0,
        }
    }

    /// Rebuild an accumulator from previously captured state.
    pub fn from_parts(channels: Vec<ChannelState>, milliseconds_elapsed: u64) -> Self {
        Self {
            channels,
            milliseconds_elapsed,
        }
    }

    /// Current state of every channel, 0-indexed.
    #[inline]
    pub fn channels(&self) -> &[ChannelState] {
        &self.channels
    }

    /// Number of channels.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Logical milliseconds elapsed over every instruction applied so far.
    #[inline]
    pub fn milliseconds_elapsed(&self) -> u64 {
        self.milliseconds_elapsed
    }

    /// Decompose into channels and elapsed time.
    pub fn into_parts(self) -> (Vec<ChannelState>, u64) {
        (self.channels, self.milliseconds_elapsed)
    }

    /// Apply a single instruction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] if a set instruction selects a
    /// channel this display does not have. The accumulator is left untouched.
    pub fn fold_single(&mut self, instruction: &Instruction) -> Result<(), Error> {
        match *instruction {
            Instruction::IncrementTime { .. } => {}
            Instruction::SetAmplitude {
                channel_select,
                amplitude,
                ..
            } => {
                for channel in self.select_channels(channel_select)? {
                    channel.amplitude = amplitude;
                }
            }
            Instruction::SetFrequency {
                channel_select,
                frequency,
                ..
            } => {
                for channel in self.select_channels(channel_select)? {
                    channel.frequency = frequency;
                }
            }
        }

        self.milliseconds_elapsed = self
            .milliseconds_elapsed
            .saturating_add(u64::from(instruction.time_offset()));
        Ok(())
    }

    /// Apply every instruction in order, stopping at the first error.
    pub fn fold(&mut self, instructions: &[Instruction]) -> Result<(), Error> {
        for instruction in instructions {
            self.fold_single(instruction)?;
        }
        Ok(())
    }

    /// Apply instructions from the start of `instructions` for as long as doing
    /// so keeps the elapsed time at or below `until_ms`.
    ///
    /// Returns the number of instructions applied. Callers replaying a stream
    /// piecewise advance their own cursor by this count and call again with a
    /// later bound:
    ///
    /// ```
    /// use vtp::{Accumulator, Instruction};
    ///
    /// let stream = [
    ///     Instruction::SetAmplitude { channel_select: 0, time_offset: 0, amplitude: 100 },
    ///     Instruction::IncrementTime { time_offset: 40 },
    ///     Instruction::SetAmplitude { channel_select: 0, time_offset: 0, amplitude: 0 },
    /// ];
    ///
    /// let mut acc = Accumulator::new(2);
    /// let mut cursor = 0;
    ///
    /// cursor += acc.fold_until(&stream[cursor..], 20)?;
    /// assert_eq!(cursor, 1);
    /// assert_eq!(acc.channels()[0].amplitude, 100);
    ///
    /// cursor += acc.fold_until(&stream[cursor..], 40)?;
    /// assert_eq!(cursor, 3);
    /// assert_eq!(acc.channels()[0].amplitude, 0);
    /// assert_eq!(acc.milliseconds_elapsed(), 40);
    /// # Ok::<(), vtp::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`fold_single`](Self::fold_single).
    /// Instructions applied before it stay applied.
    pub fn fold_until(&mut self, instructions: &[Instruction], until_ms: u64) -> Result<usize, Error> {
        let mut applied = 0;

        for instruction in instructions {
            let would_be = self
                .milliseconds_elapsed
                .checked_add(u64::from(instruction.time_offset()));
            match would_be {
                Some(at_ms) if at_ms <= until_ms => {}
                _ => break,
            }
            self.fold_single(instruction)?;
            applied += 1;
        }

        Ok(applied)
    }

    /// Resolve a channel select into the channels it writes.
    fn select_channels(&mut self, channel_select: u8) -> Result<&mut [ChannelState], Error> {
        if channel_select == 0 {
            return Ok(&mut self.channels[..]);
        }

        let index = usize::from(channel_select) - 1;
        if index >= self.channels.len() {
            return Err(Error::ChannelOutOfRange {
                channel_select,
                channel_count: self.channels.len(),
            });
        }

        Ok(&mut self.channels[index..=index])
    }
}

/// Create an accumulator with `channel_count` zeroed channels.
///
/// Equivalent to [`Accumulator::new`].
pub fn create_accumulator(channel_count: usize) -> Accumulator {
    Accumulator::new(channel_count)
}

/// Apply a single instruction to `accumulator`.
///
/// Equivalent to [`Accumulator::fold_single`].
pub fn fold_single(accumulator: &mut Accumulator, instruction: &Instruction) -> Result<(), Error> {
    accumulator.fold_single(instruction)
}

/// Apply every instruction to `accumulator`, stopping at the first error.
///
/// Equivalent to [`Accumulator::fold`].
pub fn fold(accumulator: &mut Accumulator, instructions: &[Instruction]) -> Result<(), Error> {
    accumulator.fold(instructions)
}

/// Apply instructions while the elapsed time stays within `until_ms`.
///
/// Equivalent to [`Accumulator::fold_until`].
pub fn fold_until(
    accumulator: &mut Accumulator,
    instructions: &[Instruction],
    until_ms: u64,
) -> Result<usize, Error> {
    accumulator.fold_until(instructions, until_ms)
}
