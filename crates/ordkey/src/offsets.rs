//! Delta-compressed offset tables.
//!
//! The storage layer records where each record in a batch begins by storing
//! a count followed by varint deltas between successive positions. Decoding
//! recovers the absolute positions and reports how many bytes the table
//! occupied, so the caller can locate the payload region that follows it.

use tracing::trace;

use crate::error::KeyError;
use crate::io::{Reader, Writer};
use crate::key::{read_varint, write_varint};

/// Decode a delta-encoded offset table.
///
/// The input starts with a varint count, then `count` varints, each the
/// delta from the previous absolute position (the first delta is from 0).
/// Returns the `count + 1` absolute positions `[0, d0, d0+d1, ...]` and the
/// number of bytes consumed.
///
/// # Example
///
/// ```
/// use ordkey::{decode_offsets, encode_offsets};
///
/// let table = encode_offsets(&[0, 5, 12, 30]).unwrap();
/// let (positions, consumed) = decode_offsets(&table).unwrap();
/// assert_eq!(positions, vec![0, 5, 12, 30]);
/// assert_eq!(consumed, table.len());
/// ```
pub fn decode_offsets(data: &[u8]) -> Result<(Vec<u64>, usize), KeyError> {
    let mut rdr = Reader::new(data);
    let count = read_varint(&mut rdr)?;

    // Each delta takes at least one byte, so a count beyond the remaining
    // input is a truncated table.
    if count > rdr.remaining() as u64 {
        return Err(KeyError::Truncated {
            expected: count as usize,
            position: rdr.position(),
            remaining: rdr.remaining(),
        });
    }

    let mut positions = Vec::with_capacity(count as usize + 1);
    positions.push(0u64);
    let mut pos = 0u64;
    for _ in 0..count {
        let delta = read_varint(&mut rdr)?;
        pos = pos
            .checked_add(delta)
            .ok_or(KeyError::IntegerOverflow { magnitude: delta })?;
        positions.push(pos);
    }

    trace!(count, consumed = rdr.position(), "decoded offset table");
    Ok((positions, rdr.position()))
}

/// Encode an offset table from absolute positions.
///
/// `positions` must be the full absolute list as [`decode_offsets`] returns
/// it: ascending, with a leading 0. Positions that do not ascend from zero
/// are rejected.
pub fn encode_offsets(positions: &[u64]) -> Result<Vec<u8>, KeyError> {
    if positions.first() != Some(&0) {
        return Err(KeyError::UnorderedOffset { index: 0 });
    }

    let mut wtr = Writer::with_capacity(1 + positions.len() * 2)?;
    write_varint(&mut wtr, (positions.len() - 1) as u64)?;
    for (index, pair) in positions.windows(2).enumerate() {
        let delta = pair[1]
            .checked_sub(pair[0])
            .ok_or(KeyError::UnorderedOffset { index: index + 1 })?;
        write_varint(&mut wtr, delta)?;
    }
    Ok(wtr.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table() {
        let table = encode_offsets(&[0]).unwrap();
        assert_eq!(table, vec![0x00]);
        let (positions, consumed) = decode_offsets(&table).unwrap();
        assert_eq!(positions, vec![0]);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn positions_accumulate_deltas() {
        // count=3, deltas 5, 7, 300 (300 needs a two-byte varint).
        let table = encode_offsets(&[0, 5, 12, 312]).unwrap();
        assert_eq!(&table[..3], &[3, 5, 7]);
        let (positions, consumed) = decode_offsets(&table).unwrap();
        assert_eq!(positions, vec![0, 5, 12, 312]);
        assert_eq!(consumed, table.len());
    }

    #[test]
    fn trailing_payload_is_not_consumed() {
        let mut data = encode_offsets(&[0, 9, 10]).unwrap();
        let table_len = data.len();
        data.extend_from_slice(b"record bytes");
        let (positions, consumed) = decode_offsets(&data).unwrap();
        assert_eq!(positions, vec![0, 9, 10]);
        assert_eq!(consumed, table_len);
        assert_eq!(&data[consumed..], b"record bytes");
    }

    #[test]
    fn truncated_table_is_an_error() {
        // Claims 4 deltas but provides none.
        let err = decode_offsets(&[4]).unwrap_err();
        assert!(matches!(err, KeyError::Truncated { expected: 4, .. }));
    }

    #[test]
    fn unordered_positions_are_rejected() {
        assert!(matches!(
            encode_offsets(&[0, 10, 5]).unwrap_err(),
            KeyError::UnorderedOffset { index: 2 }
        ));
        assert!(matches!(
            encode_offsets(&[3, 10]).unwrap_err(),
            KeyError::UnorderedOffset { index: 0 }
        ));
    }
}
