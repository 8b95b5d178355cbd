//! End-to-end ordering checks over the public API: packed keys must sort the
//! way an ordered key-value store would need them to.

use chrono::{FixedOffset, TimeZone};
use ordkey::{pack, pack_int, unpack, Key, Keyspace, Value};
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[test]
fn sorted_keys_survive_a_shuffle() {
    let utc = FixedOffset::east_opt(0).unwrap();
    let expected: Vec<Key> = vec![
        Key::new().push(()),
        Key::new().push(-300i64),
        Key::new().push(0i64),
        Key::new().push(1i64),
        Key::new().push(2288i64),
        Key::new().push(false),
        Key::new().push(true),
        Key::new().push(&b"\x00"[..]),
        Key::new().push(&b"bytes"[..]),
        Key::new().push(""),
        Key::new().push("a"),
        Key::new().push("ab"),
        Key::new().push("b"),
        Key::new().push(utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()),
        Key::new().push(utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
    ];

    let mut packed: Vec<Vec<u8>> = expected
        .iter()
        .map(|k| pack(b"scan:", k).unwrap())
        .collect();

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    packed.shuffle(&mut rng);
    packed.sort();

    let decoded: Vec<Key> = packed
        .iter()
        .map(|bytes| unpack(b"scan:", bytes).unwrap().unwrap())
        .collect();
    assert_eq!(decoded, expected);
}

#[test]
fn compound_keys_sort_element_wise() {
    let rows = [
        ("alice", 1i64),
        ("alice", 2),
        ("bob", 1),
        ("bob", 10),
        ("carol", -5),
    ];
    let packed: Vec<Vec<u8>> = rows
        .iter()
        .map(|(name, n)| pack(b"", &Key::new().push(*name).push(*n)).unwrap())
        .collect();
    for pair in packed.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn counters_interleave_with_nothing() {
    // Bare varint keys used for internal counters are just prefix + varint.
    let a = pack_int(b"meta:", 5).unwrap();
    let b = pack_int(b"meta:", 500).unwrap();
    assert!(a < b);
    assert_eq!(&a[..5], b"meta:");
}

#[test]
fn keyspace_scan_bounds_cover_only_that_keyspace() {
    let users = Keyspace::new(&b"u/"[..]);
    let other = Keyspace::new(&b"v/"[..]);
    let (start, end) = users.range();

    let inside = users.pack(&Key::new().push("zoe").push(9i64)).unwrap();
    let outside = other.pack(&Key::new().push("aaa")).unwrap();

    assert!(start <= inside && inside < end);
    assert!(!(start <= outside && outside < end));
}

#[test]
fn values_expose_their_decoded_form() {
    let key = Key::new().push("name").push(42i64).push(true);
    let bytes = pack(b"", &key).unwrap();
    let decoded = unpack(b"", &bytes).unwrap().unwrap();

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.get(0), Some(&Value::Text("name".to_string())));
    assert_eq!(decoded.get(1), Some(&Value::Int(42)));
    assert_eq!(decoded.get(2), Some(&Value::Bool(true)));
}
