use snafu::ResultExt;

use super::time;
use super::{KIND_BLOB, KIND_BOOL, KIND_INTEGER, KIND_NEG_INTEGER, KIND_NEG_TIME};
use super::{KIND_NULL, KIND_SEP, KIND_TEXT, KIND_TIME, KIND_UUID};
use super::{Key, Value};
use crate::error::{InvalidUtf8Snafu, KeyError};
use crate::io::Reader;

// =============================================================================
// Varint
// =============================================================================

/// Read one prefix-coded varint.
///
/// The first byte decides the total length; truncation inside the payload is
/// reported with the full payload size still expected at that point.
pub(crate) fn read_varint(rdr: &mut Reader<'_>) -> Result<u64, KeyError> {
    let first = next_byte(rdr)?;
    match first {
        0..=240 => Ok(u64::from(first)),
        241..=248 => {
            rdr.ensure(1)?;
            let low = next_byte(rdr)?;
            Ok(240 + 256 * u64::from(first - 241) + u64::from(low))
        }
        249 => {
            rdr.ensure(2)?;
            let high = next_byte(rdr)?;
            let low = next_byte(rdr)?;
            Ok(2288 + 256 * u64::from(high) + u64::from(low))
        }
        250..=255 => {
            let payload_len = (first - 250) as usize + 3;
            rdr.ensure(payload_len)?;
            let mut v = 0u64;
            for &b in rdr.take_raw(payload_len)? {
                v = (v << 8) | u64::from(b);
            }
            Ok(v)
        }
    }
}

// =============================================================================
// Strings
// =============================================================================

/// Read one bit-stuffed byte string, up to and including its terminator.
///
/// Data-carrying bytes always have the high bit set; the carry byte flushed
/// at the end of a stream never does. When the terminator arrives while a
/// data byte is still in hand, its remaining low bits are zero by
/// construction and the byte is completed with zero fill.
pub(crate) fn read_string(rdr: &mut Reader<'_>) -> Result<Vec<u8>, KeyError> {
    let mut out = Vec::new();
    let mut lb = next_byte(rdr)?;
    if lb == 0 {
        return Ok(out);
    }

    let mut shift = 1u32;
    loop {
        let cb = next_byte(rdr)?;
        if cb == 0 {
            if lb & 0x80 != 0 {
                out.push(lb << shift);
            }
            break;
        }

        out.push((lb << shift) | ((cb & 0x7F) >> (7 - shift)));
        if shift < 7 {
            shift += 1;
            lb = cb;
        } else {
            shift = 1;
            lb = next_byte(rdr)?;
            if lb == 0 {
                break;
            }
        }
    }
    Ok(out)
}

// =============================================================================
// Values and keys
// =============================================================================

/// Decode the value whose kind byte has already been consumed.
fn read_value(rdr: &mut Reader<'_>, kind: u8, offset: usize) -> Result<Value, KeyError> {
    match kind {
        KIND_NULL => Ok(Value::Null),
        KIND_INTEGER => {
            let magnitude = read_varint(rdr)?;
            let v = i64::try_from(magnitude)
                .map_err(|_| KeyError::IntegerOverflow { magnitude })?;
            Ok(Value::Int(v))
        }
        KIND_NEG_INTEGER => Ok(Value::Int(read_negative(rdr)?)),
        KIND_BOOL => {
            let v = read_varint(rdr)?;
            Ok(Value::Bool(v != 0))
        }
        KIND_BLOB => Ok(Value::Blob(read_string(rdr)?)),
        KIND_TEXT => {
            let bytes = read_string(rdr)?;
            let s = String::from_utf8(bytes).context(InvalidUtf8Snafu { offset })?;
            Ok(Value::Text(s))
        }
        KIND_UUID => {
            let bytes = read_string(rdr)?;
            let raw: [u8; 16] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| KeyError::BadUuidLength { len: bytes.len() })?;
            Ok(Value::Uuid(uuid::Uuid::from_bytes(raw)))
        }
        KIND_TIME => {
            let magnitude = read_varint(rdr)?;
            let ts = i64::try_from(magnitude)
                .map_err(|_| KeyError::IntegerOverflow { magnitude })?;
            Ok(Value::Time(time::from_composite(ts)?))
        }
        KIND_NEG_TIME => Ok(Value::Time(time::from_composite(read_negative(rdr)?)?)),
        _ => Err(KeyError::BadKind { kind, offset }),
    }
}

/// Read a varint magnitude and negate it, allowing the full `i64::MIN`.
fn read_negative(rdr: &mut Reader<'_>) -> Result<i64, KeyError> {
    let magnitude = read_varint(rdr)?;
    if magnitude > i64::MAX as u64 + 1 {
        return Err(KeyError::IntegerOverflow { magnitude });
    }
    if magnitude == i64::MAX as u64 + 1 {
        return Ok(i64::MIN);
    }
    Ok(-(magnitude as i64))
}

/// Decode one key: values until end of input or a list separator.
///
/// A separator is consumed but does not belong to the key, so a caller
/// looping over a packed list resumes at the next key's first kind byte.
pub(crate) fn read_key(rdr: &mut Reader<'_>) -> Result<Key, KeyError> {
    let mut key = Key::new();
    while rdr.has_remaining() {
        let offset = rdr.position();
        let kind = next_byte(rdr)?;
        if kind == KIND_SEP {
            break;
        }
        key.elements.push(read_value(rdr, kind, offset)?);
    }
    Ok(key)
}

fn next_byte(rdr: &mut Reader<'_>) -> Result<u8, KeyError> {
    rdr.get().ok_or(KeyError::Truncated {
        expected: 1,
        position: rdr.position(),
        remaining: 0,
    })
}
