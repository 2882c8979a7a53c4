//! Bit-exact translation between instruction words and [`Instruction`] values.
//!
//! Decoding rejects unknown opcodes. Encoding never fails: every field is
//! masked to its declared bit width, so out-of-range values wrap silently
//! instead of being rejected. The wire format depends on this.

use alloc::vec::Vec;

use crate::error::Error;
use crate::instruction::{
    Instruction, InstructionKind, OPCODE_INCREMENT_TIME, OPCODE_SET_AMPLITUDE,
    OPCODE_SET_FREQUENCY,
};

const OPCODE_SHIFT: u32 = 28;
const OPCODE_MASK: u32 = 0xF;

const LONG_TIME_OFFSET_MASK: u32 = 0x0FFF_FFFF;

const CHANNEL_SELECT_SHIFT: u32 = 20;
const CHANNEL_SELECT_MASK: u32 = 0xFF;
const SHORT_TIME_OFFSET_SHIFT: u32 = 10;
const SHORT_TIME_OFFSET_MASK: u32 = 0x3FF;
const PARAMETER_MASK: u32 = 0x3FF;

/// Fields shared by the two set instructions.
struct SetFields {
    channel_select: u8,
    time_offset: u16,
    parameter: u16,
}

#[inline]
fn unpack_set_fields(word: u32) -> SetFields {
    SetFields {
        channel_select: ((word >> CHANNEL_SELECT_SHIFT) & CHANNEL_SELECT_MASK) as u8,
        time_offset: ((word >> SHORT_TIME_OFFSET_SHIFT) & SHORT_TIME_OFFSET_MASK) as u16,
        parameter: (word & PARAMETER_MASK) as u16,
    }
}

#[inline]
fn pack_set_fields(channel_select: u8, time_offset: u16, parameter: u16) -> u32 {
    ((u32::from(channel_select) & CHANNEL_SELECT_MASK) << CHANNEL_SELECT_SHIFT)
        | ((u32::from(time_offset) & SHORT_TIME_OFFSET_MASK) << SHORT_TIME_OFFSET_SHIFT)
        | (u32::from(parameter) & PARAMETER_MASK)
}

/// Extracts the opcode (bits 31-28) of an instruction word.
#[inline]
pub fn opcode_of(word: u32) -> u8 {
    ((word >> OPCODE_SHIFT) & OPCODE_MASK) as u8
}

/// Decodes a VTP instruction word.
///
/// # Errors
///
/// Returns [`Error::InvalidInstructionCode`] if the opcode is not one of the
/// three defined instructions.
///
/// # Examples
///
/// ```
/// use vtp::{decode_instruction, Instruction};
///
/// assert_eq!(
///     decode_instruction(0x1020C9C8)?,
///     Instruction::SetFrequency { channel_select: 2, time_offset: 50, frequency: 456 }
/// );
/// assert!(decode_instruction(0xFE00_0000).is_err());
/// # Ok::<(), vtp::Error>(())
/// ```
pub fn decode_instruction(word: u32) -> Result<Instruction, Error> {
    let code = opcode_of(word);
    let kind = InstructionKind::from_opcode(code).ok_or(Error::InvalidInstructionCode { code })?;

    let instruction = match kind {
        InstructionKind::IncrementTime => Instruction::IncrementTime {
            time_offset: word & LONG_TIME_OFFSET_MASK,
        },
        InstructionKind::SetFrequency => {
            let fields = unpack_set_fields(word);
            Instruction::SetFrequency {
                channel_select: fields.channel_select,
                time_offset: fields.time_offset,
                frequency: fields.parameter,
            }
        }
        InstructionKind::SetAmplitude => {
            let fields = unpack_set_fields(word);
            Instruction::SetAmplitude {
                channel_select: fields.channel_select,
                time_offset: fields.time_offset,
                amplitude: fields.parameter,
            }
        }
    };

    Ok(instruction)
}

/// Encodes an instruction into its VTP word.
///
/// Fields wider than their slot are truncated to the low bits.
///
/// # Examples
///
/// ```
/// use vtp::{encode_instruction, Instruction};
///
/// let word = encode_instruction(&Instruction::IncrementTime { time_offset: 2000 });
/// assert_eq!(word, 0x0000_07D0);
/// ```
pub fn encode_instruction(instruction: &Instruction) -> u32 {
    let (code, payload) = match *instruction {
        Instruction::IncrementTime { time_offset } => {
            (OPCODE_INCREMENT_TIME, time_offset & LONG_TIME_OFFSET_MASK)
        }
        Instruction::SetFrequency {
            channel_select,
            time_offset,
            frequency,
        } => (
            OPCODE_SET_FREQUENCY,
            pack_set_fields(channel_select, time_offset, frequency),
        ),
        Instruction::SetAmplitude {
            channel_select,
            time_offset,
            amplitude,
        } => (
            OPCODE_SET_AMPLITUDE,
            pack_set_fields(channel_select, time_offset, amplitude),
        ),
    };

    (u32::from(code) << OPCODE_SHIFT) | payload
}

/// Decodes a sequence of words, stopping at the first invalid one.
pub fn decode_instructions(words: &[u32]) -> Result<Vec<Instruction>, Error> {
    words.iter().map(|&word| decode_instruction(word)).collect()
}

/// Encodes a sequence of instructions.
pub fn encode_instructions(instructions: &[Instruction]) -> Vec<u32> {
    instructions.iter().map(encode_instruction).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn check_codec(word: u32, instruction: Instruction) {
        assert_eq!(decode_instruction(word), Ok(instruction));
        assert_eq!(encode_instruction(&instruction), word);
    }

    #[test]
    fn test_increment_time() {
        check_codec(
            0x056789AB,
            Instruction::IncrementTime {
                time_offset: 0x56789AB,
            },
        );
        check_codec(
            0x0CCCCCCD,
            Instruction::IncrementTime {
                time_offset: 0xCCCCCCD,
            },
        );
    }

    #[test]
    fn test_set_amplitude() {
        check_codec(
            0x2AACCD6B,
            Instruction::SetAmplitude {
                channel_select: 0xAA,
                time_offset: 0x333,
                amplitude: 0x16B,
            },
        );
    }

    #[test]
    fn test_set_frequency() {
        check_codec(
            0x1AC56BBA,
            Instruction::SetFrequency {
                channel_select: 0xAC,
                time_offset: 0x15A,
                frequency: 0x3BA,
            },
        );
    }

    #[test]
    fn test_invalid_instruction_code() {
        let err = decode_instruction(0xFE000000).unwrap_err();
        assert_eq!(err, Error::InvalidInstructionCode { code: 0xF });
        assert_eq!(err.kind(), ErrorKind::InvalidInstructionCode);

        for code in 3u32..16 {
            assert_eq!(
                decode_instruction(code << 28),
                Err(Error::InvalidInstructionCode { code: code as u8 })
            );
        }
    }

    #[test]
    fn test_encode_truncates_wide_fields() {
        // 10-bit slots keep only their low bits
        let word = encode_instruction(&Instruction::SetAmplitude {
            channel_select: 1,
            time_offset: 0x7FF,
            amplitude: 0x401,
        });
        assert_eq!(
            decode_instruction(word),
            Ok(Instruction::SetAmplitude {
                channel_select: 1,
                time_offset: 0x3FF,
                amplitude: 0x001,
            })
        );

        // 28-bit time offset must not leak into the opcode
        let word = encode_instruction(&Instruction::IncrementTime {
            time_offset: 0xFFFF_FFFF,
        });
        assert_eq!(word, 0x0FFF_FFFF);
        assert_eq!(opcode_of(word), 0);
    }

    #[test]
    fn test_decode_instructions_stops_at_first_error() {
        let words = [0x100000ea, 0x3000_0000, 0xF000_0000];
        assert_eq!(
            decode_instructions(&words),
            Err(Error::InvalidInstructionCode { code: 3 })
        );
    }

    #[test]
    fn test_encode_instructions_preserves_order() {
        let words = [0x100000ea, 0x2000007b, 0x10200159];
        let instructions = decode_instructions(&words).unwrap();
        assert_eq!(encode_instructions(&instructions), words);
    }
}
