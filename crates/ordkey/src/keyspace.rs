//! Prefix-scoped namespaces.
//!
//! A [`Keyspace`] wraps the opaque byte prefix the surrounding storage
//! layer uses to scope a collection or index, so callers can pack and
//! unpack keys inside one namespace without threading the prefix through
//! every call. The prefix is never interpreted by the codec; it only
//! participates in byte comparison.
//!
//! # Example
//!
//! ```
//! use ordkey::{Key, Keyspace};
//!
//! let users = Keyspace::new(&b"u:"[..]);
//! let key = users.pack(&Key::new().push("alice")).unwrap();
//!
//! assert!(users.contains(&key));
//! assert_eq!(users.unpack(&key).unwrap(), Some(Key::new().push("alice")));
//! ```

use crate::error::KeyError;
use crate::key::Key;
use crate::{pack, pack_int, pack_many, unpack, unpack_many};

/// A namespace within the key-value store.
///
/// All keys packed through a keyspace share its byte prefix, which makes
/// range scans over the namespace a single contiguous sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: Vec<u8>,
}

impl Keyspace {
    /// Create a keyspace with the given raw prefix.
    pub fn new(prefix: impl Into<Vec<u8>>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// The raw byte prefix.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Derive a nested keyspace by appending more prefix bytes.
    pub fn keyspace(&self, suffix: &[u8]) -> Self {
        let mut prefix = self.prefix.clone();
        prefix.extend_from_slice(suffix);
        Self { prefix }
    }

    /// Pack a key within this keyspace.
    pub fn pack(&self, key: &Key) -> Result<Vec<u8>, KeyError> {
        pack(&self.prefix, key)
    }

    /// Pack a batch of keys within this keyspace, separator-delimited.
    pub fn pack_many(&self, keys: &[Key]) -> Result<Vec<u8>, KeyError> {
        pack_many(&self.prefix, keys)
    }

    /// Pack a bare non-negative integer within this keyspace.
    pub fn pack_int(&self, v: u64) -> Result<Vec<u8>, KeyError> {
        pack_int(&self.prefix, v)
    }

    /// Unpack one key from this keyspace.
    ///
    /// Returns `None` if the bytes do not start with this keyspace's prefix.
    pub fn unpack(&self, bytes: &[u8]) -> Result<Option<Key>, KeyError> {
        unpack(&self.prefix, bytes)
    }

    /// Unpack every key from a packed batch in this keyspace.
    pub fn unpack_many(&self, bytes: &[u8]) -> Result<Option<Vec<Key>>, KeyError> {
        unpack_many(&self.prefix, bytes)
    }

    /// Whether a packed key belongs to this keyspace.
    pub fn contains(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(&self.prefix)
    }

    /// Half-open byte range covering every key in this keyspace.
    ///
    /// The start is inclusive and the end is exclusive; every kind byte is
    /// below 0xFF, so appending 0xFF to the prefix bounds the namespace.
    pub fn range(&self) -> (Vec<u8>, Vec<u8>) {
        let start = self.prefix.clone();
        let mut end = self.prefix.clone();
        end.push(0xFF);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_keys_carry_the_prefix() {
        let ks = Keyspace::new(&b"orders/"[..]);
        let bytes = ks.pack(&Key::new().push(7i64)).unwrap();
        assert!(bytes.starts_with(b"orders/"));
        assert_eq!(ks.unpack(&bytes).unwrap(), Some(Key::new().push(7i64)));
    }

    #[test]
    fn foreign_keys_do_not_match() {
        let orders = Keyspace::new(&b"orders/"[..]);
        let users = Keyspace::new(&b"users/"[..]);
        let bytes = users.pack(&Key::new().push(1i64)).unwrap();
        assert!(!orders.contains(&bytes));
        assert_eq!(orders.unpack(&bytes).unwrap(), None);
    }

    #[test]
    fn nested_keyspace_extends_the_prefix() {
        let root = Keyspace::new(&b"a"[..]);
        let child = root.keyspace(b"b");
        assert_eq!(child.prefix(), b"ab");
        let bytes = child.pack(&Key::new().push(true)).unwrap();
        assert!(root.contains(&bytes));
        assert!(child.contains(&bytes));
    }

    #[test]
    fn range_bounds_the_namespace() {
        let ks = Keyspace::new(&b"k"[..]);
        let (start, end) = ks.range();
        let inside = ks.pack(&Key::new().push("zzz")).unwrap();
        assert!(start <= inside && inside < end);
    }

    #[test]
    fn batch_roundtrip() {
        let ks = Keyspace::new(&b"batch"[..]);
        let keys = vec![Key::new().push(1i64), Key::new().push(2i64)];
        let bytes = ks.pack_many(&keys).unwrap();
        assert_eq!(ks.unpack_many(&bytes).unwrap(), Some(keys));
    }
}
