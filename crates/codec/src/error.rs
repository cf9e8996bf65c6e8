//! Binary decode faults
//!
//! Encoding cannot fail; everything here is a decode-side condition. All
//! variants indicate data that does not match the wire contract, not a
//! programming bug, so they are surfaced as errors rather than panics.

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Faults raised while decoding a binary frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Read attempted with nothing left in the buffer
    #[error("end of buffer: no data left to decode")]
    EndOfBuffer,

    /// A frame declared more bytes than the buffer still holds
    #[error("unexpected end of buffer: frame needs {needed} bytes but only {remaining} remain")]
    UnexpectedEof {
        /// Bytes the frame header declared
        needed: usize,
        /// Bytes actually remaining in the buffer
        remaining: usize,
    },

    /// A varint header could not be parsed
    #[error("could not parse length or numeric varint")]
    NoLength,

    /// A boolean byte held something other than 0 or 1
    #[error("could not parse {0:#04x} as boolean")]
    ParseBoolean(u8),

    /// A string frame held invalid UTF-8
    #[error("string frame is not valid utf-8")]
    ParseString,

    /// A decoded varint does not fit the requested integer width
    #[error("varint overflows the requested integer type")]
    Overflow,
}
