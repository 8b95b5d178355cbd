//! Composite timestamp scalar.
//!
//! A timestamp is folded into one signed 64-bit scalar so the varint codec
//! can transport it:
//!
//! ```text
//! composite = (wall_clock_millis << 7) | offset_bits
//! ```
//!
//! where `wall_clock_millis` treats the timestamp's own calendar fields as
//! if they were UTC (sub-millisecond precision is truncated), and
//! `offset_bits = 64 + utc_offset / 15min`, clamped to `[0, 127]`. One unit
//! is 15 minutes; 64 is UTC. Packing the offset into the low bits keeps the
//! scalar monotonic in the wall clock, which is what the key order of a
//! calendar-sorted index wants.

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::TimeZone;
use snafu::OptionExt;

use crate::error::{KeyError, TimeOutOfRangeSnafu};

/// Offset-bit value representing UTC.
const OFFSET_BIAS: i32 = 64;

/// Seconds per offset unit (15 minutes).
const OFFSET_UNIT_SECS: i32 = 900;

/// Number of low bits holding the offset.
const OFFSET_BITS: u32 = 7;

/// Fold a timestamp into its composite scalar.
pub(crate) fn composite(dt: &DateTime<FixedOffset>) -> i64 {
    let wall_millis = dt.naive_local().and_utc().timestamp_millis();
    let units = dt.offset().local_minus_utc() / OFFSET_UNIT_SECS;
    let bits = (OFFSET_BIAS + units).clamp(0, 127) as i64;
    (wall_millis << OFFSET_BITS) | bits
}

/// Rebuild a timestamp from its composite scalar.
pub(crate) fn from_composite(ts: i64) -> Result<DateTime<FixedOffset>, KeyError> {
    let bits = (ts & 0x7F) as i32;
    // Arithmetic shift, so negative scalars floor toward earlier times.
    let wall_millis = ts >> OFFSET_BITS;

    let offset_secs = (bits - OFFSET_BIAS) * OFFSET_UNIT_SECS;
    let offset = FixedOffset::east_opt(offset_secs).context(TimeOutOfRangeSnafu { ts })?;

    let secs = wall_millis.div_euclid(1000);
    let millis = wall_millis.rem_euclid(1000) as u32;
    let wall = DateTime::from_timestamp(secs, millis * 1_000_000)
        .context(TimeOutOfRangeSnafu { ts })?
        .naive_utc();

    offset
        .from_local_datetime(&wall)
        .single()
        .context(TimeOutOfRangeSnafu { ts })
}
