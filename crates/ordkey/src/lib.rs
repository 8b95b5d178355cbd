//! Order-preserving key codec for ordered key-value stores.
//!
//! `ordkey` serializes heterogeneous tuples of primitive values into compact
//! byte strings whose unsigned lexicographic byte order reproduces the
//! natural ordering of the original tuples. The output is meant to be used
//! verbatim as the key of an ordered key-value store: database indexes can
//! then answer range and prefix queries with plain `memcmp`-ordered scans.
//!
//! # Supported kinds
//!
//! Null, signed 64-bit integers, booleans, byte strings, UTF-8 text,
//! millisecond-precision timestamps with a fixed UTC offset, and UUIDs.
//! See the [`key`] module docs for the wire format and the frozen kind-byte
//! table.
//!
//! # Packing and unpacking
//!
//! Every packed key starts with a caller-supplied opaque prefix that scopes
//! a namespace; the codec writes it verbatim and matches it on decode.
//!
//! ```
//! use ordkey::{pack, pack_many, unpack, unpack_many, Key};
//!
//! let key = Key::new().push(1i64).push("hi");
//! let bytes = pack(b"abc", &key).unwrap();
//! assert_eq!(unpack(b"abc", &bytes).unwrap(), Some(key.clone()));
//!
//! // Wrong prefix: no match, not an error.
//! assert_eq!(unpack(b"xyz", &bytes).unwrap(), None);
//!
//! // Batches share one prefix and are separator-delimited on the wire.
//! let batch = vec![key.clone(), Key::new().push(2i64)];
//! let bytes = pack_many(b"abc", &batch).unwrap();
//! assert_eq!(unpack_many(b"abc", &bytes).unwrap(), Some(batch));
//! ```
//!
//! # Ordering guarantee
//!
//! For keys of the same shape, `a < b` implies `pack(p, a) < pack(p, b)`
//! under unsigned byte comparison, with two documented exceptions:
//!
//! - within negative integers (and negative timestamps) the byte order is
//!   reversed relative to numeric order;
//! - blob and text strings of unequal length can swap: when the first
//!   difference between two strings sits entirely below the seven bits an
//!   encoded body byte carries and the shorter string ends at that byte,
//!   the shorter one sorts first even where its diverging byte is the
//!   larger (see the [`key`] module docs).
//!
//! Existing databases depend on those bytes, so both quirks are frozen
//! into format version 1 rather than fixed.

mod error;
mod io;
pub mod key;
mod keyspace;
mod offsets;

pub use error::KeyError;
pub use key::Key;
pub use key::Value;
pub use keyspace::Keyspace;
pub use offsets::decode_offsets;
pub use offsets::encode_offsets;

use tracing::trace;

use crate::io::{Reader, Writer};
use crate::key::{read_key, write_key, write_varint};

/// Version of the wire format produced by this crate.
///
/// The kind-byte assignment and all bit-level framing are frozen per
/// version; bumping it is a breaking change for every key already written.
pub const FORMAT_VERSION: u32 = 1;

/// Pack one key: `prefix` verbatim, then each value in order.
///
/// The end of the key is implicit at the end of the output; no separator or
/// length field is written.
pub fn pack(prefix: &[u8], key: &Key) -> Result<Vec<u8>, KeyError> {
    let mut wtr = Writer::with_capacity(prefix.len() + 20)?;
    wtr.put_bytes(prefix)?;
    write_key(&mut wtr, key)?;
    Ok(wtr.finalize())
}

/// Pack a batch of keys sharing one prefix.
///
/// Successive keys are separated by one separator byte; there is no
/// trailing separator. An empty batch packs to the bare prefix.
///
/// A key with no values contributes no bytes of its own, so a *trailing*
/// empty key cannot be told apart from its absence and does not survive a
/// round trip through [`unpack_many`]. Empty keys elsewhere in a batch are
/// preserved by the separators around them.
pub fn pack_many(prefix: &[u8], keys: &[Key]) -> Result<Vec<u8>, KeyError> {
    let mut wtr = Writer::with_capacity(prefix.len() + 20 * keys.len().max(1))?;
    wtr.put_bytes(prefix)?;
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            wtr.put_byte(key::KIND_SEP)?;
        }
        write_key(&mut wtr, key)?;
    }
    trace!(keys = keys.len(), bytes = wtr.len(), "packed key batch");
    Ok(wtr.finalize())
}

/// Pack a bare non-negative integer: `prefix`, then one varint, no kind
/// byte.
///
/// Used by the storage layer for counters and internal bookkeeping keys.
pub fn pack_int(prefix: &[u8], v: u64) -> Result<Vec<u8>, KeyError> {
    let mut wtr = Writer::with_capacity(prefix.len() + 9)?;
    wtr.put_bytes(prefix)?;
    write_varint(&mut wtr, v)?;
    Ok(wtr.finalize())
}

/// Unpack one key from `bytes`.
///
/// Returns `None` when `bytes` does not begin with `prefix`. Decodes values
/// until end of input or a list separator (which is consumed); trailing
/// bytes beyond the first key are ignored. An input shorter than the prefix
/// is an error, not a mismatch.
pub fn unpack(prefix: &[u8], bytes: &[u8]) -> Result<Option<Key>, KeyError> {
    let Some(rest) = strip_prefix(prefix, bytes)? else {
        return Ok(None);
    };
    let mut rdr = Reader::new(rest);
    Ok(Some(read_key(&mut rdr)?))
}

/// Unpack every key from a packed batch.
///
/// Same prefix gate as [`unpack`]; then keys are decoded until the input is
/// exhausted. Key boundaries are separator bytes or end of input, so a
/// batch whose last key was empty decodes without it (see [`pack_many`]).
pub fn unpack_many(prefix: &[u8], bytes: &[u8]) -> Result<Option<Vec<Key>>, KeyError> {
    let Some(rest) = strip_prefix(prefix, bytes)? else {
        return Ok(None);
    };
    let mut rdr = Reader::new(rest);
    let mut keys = Vec::new();
    while rdr.has_remaining() {
        keys.push(read_key(&mut rdr)?);
    }
    trace!(keys = keys.len(), "unpacked key batch");
    Ok(Some(keys))
}

/// Wrap a bare value in a single-value [`Key`].
///
/// Scalars and keys pack differently (`(1,)` is not `1` on the wire); this
/// is the canonical way to lift a scalar to the key it packs as.
pub fn tuplize(value: impl Into<Value>) -> Key {
    Key::from(value.into())
}

fn strip_prefix<'a>(prefix: &[u8], bytes: &'a [u8]) -> Result<Option<&'a [u8]>, KeyError> {
    if bytes.len() < prefix.len() {
        return Err(KeyError::InputShorterThanPrefix {
            input_len: bytes.len(),
            prefix_len: prefix.len(),
        });
    }
    Ok(bytes.strip_prefix(prefix))
}
