//! Errors surfaced by the codec and the fold engine.
//!
//! Every error aborts the operation that raised it. Nothing is retried and
//! nothing is logged; presenting the error is left to the caller.

use alloc::string::String;

/// Error raised by a VTP operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A word carried an opcode outside `0..=2`.
    InvalidInstructionCode {
        /// The offending opcode (bits 31-28 of the word).
        code: u8,
    },

    /// An instruction type name did not match any known instruction.
    InvalidInstructionType {
        /// The offending type name.
        name: String,
    },

    /// A byte buffer's length is not a multiple of 4.
    InvalidBufferLength {
        /// The offending buffer length in bytes.
        len: usize,
    },

    /// A channel select exceeds the number of channels of the accumulator.
    ChannelOutOfRange {
        /// The offending channel select value (1-indexed).
        channel_select: u8,
        /// Number of channels the accumulator has.
        channel_count: usize,
    },
}

impl Error {
    /// The kind of this error, without its detail.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInstructionCode { .. } => ErrorKind::InvalidInstructionCode,
            Self::InvalidInstructionType { .. } => ErrorKind::InvalidInstructionType,
            Self::InvalidBufferLength { .. } => ErrorKind::InvalidBufferLength,
            Self::ChannelOutOfRange { .. } => ErrorKind::ChannelOutOfRange,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidInstructionCode { code } => {
                write!(f, "invalid instruction code: {}", code)
            }
            Self::InvalidInstructionType { name } => {
                write!(f, "invalid instruction type: {:?}", name)
            }
            Self::InvalidBufferLength { len } => {
                write!(
                    f,
                    "invalid buffer length: {} bytes is not a multiple of 4",
                    len
                )
            }
            Self::ChannelOutOfRange {
                channel_select,
                channel_count,
            } => write!(
                f,
                "channel out of range: {} (display has {} channels)",
                channel_select, channel_count
            ),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for Error {}

/// The enumerated kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidInstructionCode`].
    InvalidInstructionCode,
    /// See [`Error::InvalidInstructionType`].
    InvalidInstructionType,
    /// See [`Error::InvalidBufferLength`].
    InvalidBufferLength,
    /// See [`Error::ChannelOutOfRange`].
    ChannelOutOfRange,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidInstructionCode => write!(f, "invalid instruction code"),
            Self::InvalidInstructionType => write!(f, "invalid instruction type"),
            Self::InvalidBufferLength => write!(f, "invalid buffer length"),
            Self::ChannelOutOfRange => write!(f, "channel out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            Error::InvalidInstructionCode { code: 15 }.kind(),
            ErrorKind::InvalidInstructionCode
        );
        assert_eq!(
            Error::InvalidInstructionType {
                name: "FooBar".into()
            }
            .kind(),
            ErrorKind::InvalidInstructionType
        );
        assert_eq!(
            Error::InvalidBufferLength { len: 7 }.kind(),
            ErrorKind::InvalidBufferLength
        );
        assert_eq!(
            Error::ChannelOutOfRange {
                channel_select: 23,
                channel_count: 3
            }
            .kind(),
            ErrorKind::ChannelOutOfRange
        );
    }

    #[test]
    fn test_display_carries_detail() {
        let msg = Error::InvalidInstructionCode { code: 15 }.to_string();
        assert!(msg.contains("15"));

        let msg = Error::ChannelOutOfRange {
            channel_select: 23,
            channel_count: 3,
        }
        .to_string();
        assert!(msg.contains("23"));
        assert!(msg.contains("3 channels"));

        let msg = Error::InvalidBufferLength { len: 7 }.to_string();
        assert!(msg.contains("7 bytes"));
    }
}
