use std::cmp::Ordering;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Utc;
use uuid::Uuid;

use super::time;
use super::{KIND_BLOB, KIND_BOOL, KIND_INTEGER, KIND_NEG_INTEGER, KIND_NEG_TIME};
use super::{KIND_NULL, KIND_TEXT, KIND_TIME, KIND_UUID};
use crate::error::KeyError;
use crate::io::{Reader, Writer};

// =============================================================================
// Value Type
// =============================================================================

/// A single element within a key.
///
/// Values are typed and can be compared for ordering; the comparison below
/// follows the semantic order of the payload. Packed bytes sort the same
/// way except for the two frozen format quirks: negative integers and
/// negative timestamps sort in reverse within their kind, and blob or text
/// strings of unequal length can swap when their first difference sits
/// below an encoded byte's seven payload bits (see the module docs).
#[derive(Debug, Clone)]
pub enum Value {
    /// Null (sorts first).
    Null,

    /// Signed 64-bit integer.
    Int(i64),

    /// Boolean value.
    Bool(bool),

    /// Raw byte string.
    Blob(Vec<u8>),

    /// UTF-8 text.
    Text(String),

    /// Timestamp with a fixed UTC offset, millisecond precision.
    Time(DateTime<FixedOffset>),

    /// UUID, encoded as its 16 raw bytes.
    Uuid(Uuid),
}

impl Value {
    /// The kind byte this value encodes with.
    ///
    /// Signed kinds pick their tag from the sign, so the tag alone decides
    /// order between negative and non-negative values.
    pub(crate) fn kind(&self) -> u8 {
        match self {
            Value::Null => KIND_NULL,
            Value::Int(v) if *v < 0 => KIND_NEG_INTEGER,
            Value::Int(_) => KIND_INTEGER,
            Value::Bool(_) => KIND_BOOL,
            Value::Blob(_) => KIND_BLOB,
            Value::Text(_) => KIND_TEXT,
            Value::Time(t) if time::composite(t) < 0 => KIND_NEG_TIME,
            Value::Time(_) => KIND_TIME,
            Value::Uuid(_) => KIND_UUID,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            // Timestamps compare by the composite scalar the codec
            // transports, so equality lines up with encoded bytes.
            (Value::Time(a), Value::Time(b)) => time::composite(a).cmp(&time::composite(b)),
            (Value::Uuid(a), Value::Uuid(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Int(n as i64)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Time(t)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t.fixed_offset())
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

// =============================================================================
// Key Type
// =============================================================================

/// An ordered sequence of typed values that packs into bytes.
///
/// Keys are the unit the codec transports. When packed, they produce bytes
/// that sort lexicographically in the same order as the original values; a
/// key that is a strict prefix of another sorts before it.
///
/// # Example
///
/// ```
/// use ordkey::Key;
///
/// let k1 = Key::new().push("users").push(1i64);
/// let k2 = Key::new().push("users").push(2i64);
///
/// assert!(k1.pack().unwrap() < k2.pack().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Key {
    pub(crate) elements: Vec<Value>,
}

impl Key {
    /// Create a new empty key.
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Create a key with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Push a value onto the key (builder pattern).
    pub fn push<V: Into<Value>>(mut self, value: V) -> Self {
        self.elements.push(value.into());
        self
    }

    /// Push a value onto the key (mutating).
    pub fn push_mut<V: Into<Value>>(&mut self, value: V) {
        self.elements.push(value.into());
    }

    /// Number of values in the key.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the key has no values.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get a value by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    /// Iterate over the values.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter()
    }

    /// Pack the key into bytes.
    ///
    /// The resulting bytes sort lexicographically in the same order as the
    /// original values (with the ordering caveats documented on the
    /// module).
    pub fn pack(&self) -> Result<Vec<u8>, KeyError> {
        let mut wtr = Writer::with_capacity(self.elements.len() * 8)?;
        super::write_key(&mut wtr, self)?;
        Ok(wtr.finalize())
    }

    /// Unpack one key from bytes.
    ///
    /// Consumes values until end of input or a list separator; the
    /// separator, if present, is consumed but not part of the key.
    pub fn unpack(data: &[u8]) -> Result<Self, KeyError> {
        let mut rdr = Reader::new(data);
        super::read_key(&mut rdr)
    }

    /// Half-open byte range covering every packed key that extends this one.
    ///
    /// Returns `(start, end)` where `start` is the packed key and `end` is
    /// the packed key with 0xFF appended. Every kind byte is below 0xFF, so
    /// the bound is exclusive and tight.
    pub fn range(&self) -> Result<(Vec<u8>, Vec<u8>), KeyError> {
        let start = self.pack()?;
        let mut end = start.clone();
        end.push(0xFF);
        Ok((start, end))
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Self { elements: vec![value] }
    }
}

impl From<Vec<Value>> for Key {
    fn from(elements: Vec<Value>) -> Self {
        Self { elements }
    }
}

impl FromIterator<Value> for Key {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Key {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
