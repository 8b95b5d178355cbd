//! Errors surfaced by the key codec.
//!
//! All failures are values returned to the caller; nothing is recovered
//! internally. Truncation inside a varint or string body is reported at the
//! innermost call site with enough context to locate the damage.

use snafu::Snafu;

/// Errors that can occur while encoding or decoding keys.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum KeyError {
    /// The input ended before a complete element could be read.
    #[snafu(display("expected {expected} bytes at position {position}, but only {remaining} remain"))]
    Truncated {
        /// Number of additional bytes the decoder needed.
        expected: usize,
        /// Byte offset at which the shortfall was detected.
        position: usize,
        /// Number of bytes actually remaining.
        remaining: usize,
    },

    /// Unknown kind byte at an element boundary.
    #[snafu(display("bad kind byte 0x{kind:02X} at offset {offset}; key corrupt?"))]
    BadKind {
        /// The offending byte.
        kind: u8,
        /// Byte offset of the kind byte.
        offset: usize,
    },

    /// A TEXT element's payload is not valid UTF-8.
    #[snafu(display("invalid UTF-8 in text element at offset {offset}: {source}"))]
    InvalidUtf8 {
        /// Byte offset of the element's kind byte.
        offset: usize,
        /// The underlying UTF-8 error.
        source: std::string::FromUtf8Error,
    },

    /// A UUID element's payload did not decode to exactly 16 bytes.
    #[snafu(display("uuid element decoded to {len} bytes, expected 16"))]
    BadUuidLength {
        /// Number of bytes actually decoded.
        len: usize,
    },

    /// A decoded integer magnitude does not fit the 64-bit value type.
    #[snafu(display("integer magnitude {magnitude} overflows the value range"))]
    IntegerOverflow {
        /// The decoded magnitude.
        magnitude: u64,
    },

    /// A decoded composite timestamp falls outside the supported calendar.
    #[snafu(display("composite timestamp {ts} is outside the supported calendar range"))]
    TimeOutOfRange {
        /// The composite millisecond-and-offset scalar.
        ts: i64,
    },

    /// `unpack` was handed an input shorter than the expected prefix.
    #[snafu(display("input is {input_len} bytes, shorter than the {prefix_len}-byte prefix"))]
    InputShorterThanPrefix {
        /// Length of the input.
        input_len: usize,
        /// Length of the expected prefix.
        prefix_len: usize,
    },

    /// An offset table was built from positions that do not ascend from zero.
    #[snafu(display("offset table positions must ascend from zero (violated at index {index})"))]
    UnorderedOffset {
        /// Index of the first out-of-order position.
        index: usize,
    },

    /// The allocator refused to grow the output buffer.
    #[snafu(display("failed to reserve {bytes} bytes for the output buffer"))]
    OutOfMemory {
        /// Size of the reservation that failed.
        bytes: usize,
    },
}
