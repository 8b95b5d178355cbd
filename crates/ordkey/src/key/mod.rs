//! Order-preserving key encoding.
//!
//! This module serializes heterogeneous tuples of primitive values into
//! compact byte strings whose unsigned lexicographic byte order reproduces
//! the natural ordering of the original values, so the output can be used
//! directly as the key of an ordered key-value store.
//!
//! # Design Goals
//!
//! 1. **Lexicographic ordering**: packed bytes sort in the same order as the
//!    original tuple elements, enabling efficient range scans.
//!
//! 2. **Kind-tagged encoding**: each element is prefixed with a kind byte,
//!    allowing heterogeneous tuples and unambiguous decoding.
//!
//! 3. **Self-delimiting**: no element carries a length header; the decoder
//!    advances exactly as many bytes as the encoder wrote.
//!
//! # Kind Bytes (frozen at format version 1)
//!
//! | Byte | Kind | Payload |
//! |------|------|---------|
//! | 0x0F | Null | none |
//! | 0x14 | negative integer | varint of the magnitude |
//! | 0x15 | integer | varint of the value |
//! | 0x1E | boolean | varint 0 or 1 |
//! | 0x28 | blob | bit-stuffed byte string |
//! | 0x32 | text | bit-stuffed UTF-8 bytes |
//! | 0x3C | negative timestamp | varint of the composite magnitude |
//! | 0x3D | timestamp | varint of the composite value |
//! | 0x5A | uuid | bit-stuffed 16 raw bytes |
//! | 0x66 | separator | none; key boundary inside a packed list |
//!
//! The numeric assignments order NULL < negative integers < integers <
//! booleans < blobs < text < timestamps < UUIDs < the list separator, so a
//! plain `memcmp` of two packed keys decides their order even across kinds.
//!
//! # Integer Encoding
//!
//! Non-negative integers use a 1-9 byte prefix-coded varint: values up to
//! 240 are a single byte, and every longer encoding starts with a byte that
//! is strictly larger than any shorter encoding's first byte, with
//! big-endian payloads. Larger values therefore always compare greater.
//!
//! Negative integers write the 0x14 kind byte and the varint of the
//! magnitude. All negatives sort before all non-negatives by kind byte, but
//! *within* negatives the byte order is the reverse of numeric order
//! (`-1` sorts after `-2`). This is a wart of the on-disk format, kept
//! byte-for-byte for compatibility with existing databases; see
//! [`Value::cmp`](enum.Value.html) for the semantic order.
//!
//! # String Encoding
//!
//! Blobs, text, and UUIDs are re-coded at seven payload bits per body
//! byte: every body byte has its high bit set, a non-zero carry is flushed
//! as one final sub-0x80 byte, and a single 0x00 terminates the stream. A
//! string therefore always sorts before any extension of itself, and
//! strings of equal length compare exactly like their raw bytes.
//!
//! Across unequal lengths the format has a second wart: if the first
//! difference between two strings falls entirely below the seven bits a
//! body byte emits, and the shorter string ends at that byte, the shorter
//! string's carry (or terminator) byte is below 0x80 while the longer
//! string's next body byte is above it, so the shorter string sorts first
//! no matter which way the low bits differ. `[0x61]` packs below
//! `[0x60, 0xFF]`. Like the negative-integer ordering, this is frozen into
//! the format.
//!
//! # Example
//!
//! ```
//! use ordkey::{pack, unpack, Key};
//!
//! let key = Key::new().push("users").push(42i64);
//! let bytes = pack(b"idx:", &key).unwrap();
//!
//! assert!(bytes.starts_with(b"idx:"));
//! assert_eq!(unpack(b"idx:", &bytes).unwrap(), Some(key));
//! ```

mod decoding;
mod element;
mod encoding;
pub(crate) mod time;


pub use element::Key;
pub use element::Value;

pub(crate) use decoding::read_key;
pub(crate) use decoding::read_varint;
pub(crate) use encoding::write_key;
pub(crate) use encoding::write_varint;

/// Kind byte for a null element.
pub(crate) const KIND_NULL: u8 = 0x0F;

/// Kind byte for a negative integer; payload is the magnitude.
pub(crate) const KIND_NEG_INTEGER: u8 = 0x14;

/// Kind byte for a non-negative integer.
pub(crate) const KIND_INTEGER: u8 = 0x15;

/// Kind byte for a boolean.
pub(crate) const KIND_BOOL: u8 = 0x1E;

/// Kind byte for a raw byte string.
pub(crate) const KIND_BLOB: u8 = 0x28;

/// Kind byte for UTF-8 text.
pub(crate) const KIND_TEXT: u8 = 0x32;

/// Kind byte for a timestamp whose composite scalar is negative.
pub(crate) const KIND_NEG_TIME: u8 = 0x3C;

/// Kind byte for a timestamp.
pub(crate) const KIND_TIME: u8 = 0x3D;

/// Kind byte for a UUID.
pub(crate) const KIND_UUID: u8 = 0x5A;

/// Separator between successive keys inside a packed list.
pub(crate) const KIND_SEP: u8 = 0x66;
