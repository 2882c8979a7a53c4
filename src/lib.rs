//! # VTP
//!
//! Codec and fold engine for the VTP vibrotactile instruction protocol.
//!
//! A vibrotactile display is driven by a stream of 32-bit instruction words.
//! Each word either advances time or sets the amplitude/frequency of one or all
//! channels. This crate translates between words and structured instructions,
//! and replays instruction streams onto an [`Accumulator`] to reconstruct the
//! display state at any logical point in time.
//!
//! ## Module Organization
//!
//! - [`instruction`] - The [`Instruction`] sum type and its discriminant
//! - [`codec`] - Bit-exact word <-> instruction translation
//! - [`binary`] - Big-endian framing between byte buffers and instruction words
//! - [`fold`] - The [`Accumulator`] and the fold operations
//! - [`sampler`] - Uniform-interval replay built on [`Accumulator::fold_until`]
//! - [`error`] - The crate-wide [`Error`] type
//!
//! ## Quick Start
//!
//! ```
//! use vtp::{read_instructions, Accumulator};
//!
//! // freq ch* 234, amp ch* 123, freq ch2 345
//! let bytes = [
//!     0x10, 0x00, 0x00, 0xEA, 0x20, 0x00, 0x00, 0x7B, 0x10, 0x20, 0x01, 0x59,
//! ];
//! let instructions = read_instructions(&bytes)?;
//!
//! let mut acc = Accumulator::new(3);
//! acc.fold(&instructions)?;
//!
//! assert_eq!(acc.channels()[0].frequency, 234);
//! assert_eq!(acc.channels()[1].frequency, 345);
//! assert_eq!(acc.channels()[2].amplitude, 123);
//! assert_eq!(acc.milliseconds_elapsed(), 0);
//! # Ok::<(), vtp::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Implements `std::error::Error` for [`Error`]
//! - `serde` - Enable serialization/deserialization support
//! - `cli` - Build the `vtp` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Core modules
// =============================================================================

/// Instruction values and their discriminants.
pub mod instruction;

/// Bit-level encoding and decoding of instruction words.
pub mod codec;

/// Byte buffer framing for instruction words.
pub mod binary;

/// Accumulator state and the fold engine.
pub mod fold;

/// Uniform-interval sampling over an instruction stream.
pub mod sampler;

/// Error types.
pub mod error;

// =============================================================================
// Public re-exports
// =============================================================================

pub use binary::{
    read_instruction_words, read_instructions, write_instruction_words, write_instructions,
};
pub use codec::{decode_instruction, decode_instructions, encode_instruction, encode_instructions};
pub use error::{Error, ErrorKind};
pub use fold::{create_accumulator, fold, fold_single, fold_until, Accumulator, ChannelState};
pub use instruction::{Instruction, InstructionKind};
pub use sampler::{Sample, Sampler, SamplerConfig};
