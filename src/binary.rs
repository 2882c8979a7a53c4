//! Binary framing of instruction streams.
//!
//! A persisted or transmitted VTP stream is nothing but whole 4-byte words,
//! each stored big-endian (most significant byte first). There is no header,
//! length prefix or checksum.

use alloc::vec::Vec;

use crate::codec::{decode_instructions, encode_instruction};
use crate::error::Error;
use crate::instruction::Instruction;

/// Size of one instruction word in bytes.
pub const WORD_BYTES: usize = 4;

/// Reads big-endian instruction words from a byte buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidBufferLength`] if `bytes.len()` is not a multiple of 4.
///
/// # Examples
///
/// ```
/// use vtp::read_instruction_words;
///
/// let words = read_instruction_words(&[0x10, 0x00, 0x00, 0xEA, 0x00, 0x00, 0x07, 0xD0])?;
/// assert_eq!(words, vec![0x1000_00EA, 0x0000_07D0]);
///
/// assert!(read_instruction_words(&[0u8; 7]).is_err());
/// # Ok::<(), vtp::Error>(())
/// ```
pub fn read_instruction_words(bytes: &[u8]) -> Result<Vec<u32>, Error> {
    if bytes.len() % WORD_BYTES != 0 {
        return Err(Error::InvalidBufferLength { len: bytes.len() });
    }

    let words = bytes
        .chunks_exact(WORD_BYTES)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(words)
}

/// Writes instruction words as big-endian bytes, in order.
///
/// This is the exact inverse of [`read_instruction_words`].
pub fn write_instruction_words(words: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * WORD_BYTES);
    for &word in words {
        out.extend_from_slice(&word.to_be_bytes());
    }
    out
}

/// Reads and decodes a whole instruction stream.
pub fn read_instructions(bytes: &[u8]) -> Result<Vec<Instruction>, Error> {
    let words = read_instruction_words(bytes)?;
    decode_instructions(&words)
}

/// Encodes a whole instruction stream to bytes.
pub fn write_instructions(instructions: &[Instruction]) -> Vec<u8> {
    let mut out = Vec::with_capacity(instructions.len() * WORD_BYTES);
    for instruction in instructions {
        out.extend_from_slice(&encode_instruction(instruction).to_be_bytes());
    }
    out
}
