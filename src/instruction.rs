//! Structured VTP instructions.
//!
//! An [`Instruction`] is the decoded form of a single 32-bit instruction word.
//! Every instruction carries a time offset: the number of milliseconds elapsed
//! since the previous instruction in the stream, never an absolute time.
//!
//! ## Word Layout
//!
//! | Bits  | `IncrementTime` | `SetFrequency` / `SetAmplitude` |
//! |-------|-----------------|---------------------------------|
//! | 31-28 | opcode `0`      | opcode `1` / `2`                |
//! | 27-20 | `time_offset`   | `channel_select`                |
//! | 19-10 | `time_offset`   | `time_offset`                   |
//! | 9-0   | `time_offset`   | `frequency` / `amplitude`       |

use alloc::string::ToString;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Opcode of [`Instruction::IncrementTime`].
pub const OPCODE_INCREMENT_TIME: u8 = 0;
/// Opcode of [`Instruction::SetFrequency`].
pub const OPCODE_SET_FREQUENCY: u8 = 1;
/// Opcode of [`Instruction::SetAmplitude`].
pub const OPCODE_SET_AMPLITUDE: u8 = 2;

/// Largest time offset an `IncrementTime` instruction can carry (28 bits).
pub const MAX_LONG_TIME_OFFSET: u32 = (1 << 28) - 1;
/// Largest time offset a set instruction can carry (10 bits).
pub const MAX_SHORT_TIME_OFFSET: u16 = (1 << 10) - 1;
/// Largest amplitude or frequency value (10 bits).
pub const MAX_PARAMETER: u16 = (1 << 10) - 1;

/// A decoded VTP instruction.
///
/// `channel_select` addresses channels 1-indexed; `0` broadcasts to every
/// channel of the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all_fields = "camelCase")
)]
pub enum Instruction {
    /// Advance time without touching any channel.
    IncrementTime {
        /// Milliseconds since the previous instruction (28 bits).
        time_offset: u32,
    },

    /// Set the frequency of the selected channel(s).
    SetFrequency {
        /// Target channel, 1-indexed; `0` for all channels.
        channel_select: u8,
        /// Milliseconds since the previous instruction (10 bits).
        time_offset: u16,
        /// New frequency (10 bits).
        frequency: u16,
    },

    /// Set the amplitude of the selected channel(s).
    SetAmplitude {
        /// Target channel, 1-indexed; `0` for all channels.
        channel_select: u8,
        /// Milliseconds since the previous instruction (10 bits).
        time_offset: u16,
        /// New amplitude (10 bits).
        amplitude: u16,
    },
}

impl Instruction {
    /// The discriminant of this instruction.
    #[inline]
    pub fn kind(&self) -> InstructionKind {
        match self {
            Self::IncrementTime { .. } => InstructionKind::IncrementTime,
            Self::SetFrequency { .. } => InstructionKind::SetFrequency,
            Self::SetAmplitude { .. } => InstructionKind::SetAmplitude,
        }
    }

    /// Milliseconds elapsed since the previous instruction in the stream.
    #[inline]
    pub fn time_offset(&self) -> u32 {
        match *self {
            Self::IncrementTime { time_offset } => time_offset,
            Self::SetFrequency { time_offset, .. } | Self::SetAmplitude { time_offset, .. } => {
                u32::from(time_offset)
            }
        }
    }
}

/// Renders the one-line listing form, e.g. `freq +50ms ch2 456` or `time +2000ms`.
impl core::fmt::Display for Instruction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (mnemonic, channel_select, time_offset, value) = match *self {
            Self::IncrementTime { time_offset } => return write!(f, "time +{}ms", time_offset),
            Self::SetFrequency {
                channel_select,
                time_offset,
                frequency,
            } => ("freq", channel_select, time_offset, frequency),
            Self::SetAmplitude {
                channel_select,
                time_offset,
                amplitude,
            } => ("amp", channel_select, time_offset, amplitude),
        };

        write!(f, "{}", mnemonic)?;
        if time_offset > 0 {
            write!(f, " +{}ms", time_offset)?;
        }
        if channel_select == 0 {
            write!(f, " ch* {}", value)
        } else {
            write!(f, " ch{} {}", channel_select, value)
        }
    }
}

/// The discriminant of an [`Instruction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InstructionKind {
    /// See [`Instruction::IncrementTime`].
    IncrementTime,
    /// See [`Instruction::SetFrequency`].
    SetFrequency,
    /// See [`Instruction::SetAmplitude`].
    SetAmplitude,
}

impl InstructionKind {
    /// All instruction kinds, in opcode order.
    pub const ALL: [InstructionKind; 3] = [
        InstructionKind::IncrementTime,
        InstructionKind::SetFrequency,
        InstructionKind::SetAmplitude,
    ];

    /// Returns the 4-bit opcode of this kind.
    #[must_use]
    pub const fn opcode(self) -> u8 {
        match self {
            Self::IncrementTime => OPCODE_INCREMENT_TIME,
            Self::SetFrequency => OPCODE_SET_FREQUENCY,
            Self::SetAmplitude => OPCODE_SET_AMPLITUDE,
        }
    }

    /// Parses a kind from its opcode.
    #[must_use]
    pub const fn from_opcode(code: u8) -> Option<Self> {
        match code {
            OPCODE_INCREMENT_TIME => Some(Self::IncrementTime),
            OPCODE_SET_FREQUENCY => Some(Self::SetFrequency),
            OPCODE_SET_AMPLITUDE => Some(Self::SetAmplitude),
            _ => None,
        }
    }

    /// The canonical type name, as used in serialized instructions.
    pub const fn name(self) -> &'static str {
        match self {
            Self::IncrementTime => "IncrementTime",
            Self::SetFrequency => "SetFrequency",
            Self::SetAmplitude => "SetAmplitude",
        }
    }
}

impl core::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the canonical names and their kebab-case forms (`set-amplitude`).
impl FromStr for InstructionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IncrementTime" | "increment-time" => Ok(Self::IncrementTime),
            "SetFrequency" | "set-frequency" => Ok(Self::SetFrequency),
            "SetAmplitude" | "set-amplitude" => Ok(Self::SetAmplitude),
            _ => Err(Error::InvalidInstructionType {
                name: s.to_string(),
            }),
        }
    }
}
