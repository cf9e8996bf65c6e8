//! Fixed-width versioned keys
//!
//! A key embeds the object identifier (and optional collection identifier)
//! followed by the version scalar in big-endian form, so that for a fixed
//! object the byte-lexicographic order of keys equals version order. The
//! last key in an object-prefixed forward scan is therefore always the
//! latest stored version.
//!
//! Layout:
//!
//! ```text
//! [version byte][object id 16][collection id 16?][vid u64 BE][pid u32 BE]
//! ```
//!
//! 29 bytes without a collection, 45 with one.

use byteorder::{BigEndian, ByteOrder};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Current key layout version byte
pub const KEY_VERSION: u8 = 0x1;

/// Total length of an object-only key
pub const OBJECT_KEY_SIZE: usize = 1 + 16 + 8 + 4;

/// Total length of a collection-scoped key
pub const COLLECTION_KEY_SIZE: usize = 1 + 16 + 16 + 8 + 4;

/// A fixed-width versioned storage key
///
/// Accessors require a key that passes [`Key::check`]; calling them on an
/// invalid key is a programming-contract violation and panics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Vec<u8>);

impl Key {
    /// Build a key for one version of an object.
    ///
    /// `scalar == None` encodes a zero version section, making the key act
    /// as the smallest key of the object's range.
    pub fn new(object_id: Uuid, scalar: Option<Scalar>) -> Self {
        let mut buf = Vec::with_capacity(OBJECT_KEY_SIZE);
        buf.push(KEY_VERSION);
        buf.extend_from_slice(object_id.as_bytes());
        push_scalar(&mut buf, scalar.unwrap_or_default());
        Key(buf)
    }

    /// Build a collection-scoped key for one version of an object.
    pub fn with_collection(object_id: Uuid, collection_id: Uuid, scalar: Option<Scalar>) -> Self {
        let mut buf = Vec::with_capacity(COLLECTION_KEY_SIZE);
        buf.push(KEY_VERSION);
        buf.extend_from_slice(object_id.as_bytes());
        buf.extend_from_slice(collection_id.as_bytes());
        push_scalar(&mut buf, scalar.unwrap_or_default());
        Key(buf)
    }

    /// Validate raw bytes and wrap them as a key.
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self> {
        check(&buf)?;
        Ok(Key(buf))
    }

    /// Validate this key's length and leading format byte.
    pub fn check(&self) -> Result<()> {
        check(&self.0)
    }

    /// The raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the identifier section, format byte included
    fn id_len(&self) -> usize {
        self.0.len() - 12
    }

    /// The id-only leading bytes, for range scans over all versions of
    /// this object.
    pub fn object_prefix(&self) -> Vec<u8> {
        self.0[..self.id_len()].to_vec()
    }

    /// Exclusive upper bound for a full-object range scan.
    ///
    /// The prefix incremented by one as a big-endian integer, carrying
    /// across 0xff bytes so ids ending in 0xff stay bounded correctly.
    pub fn object_limit(&self) -> Vec<u8> {
        let mut limit = self.object_prefix();
        for byte in limit.iter_mut().rev() {
            if *byte == 0xff {
                *byte = 0;
            } else {
                *byte += 1;
                break;
            }
        }
        limit
    }

    /// Object identifier embedded in the key.
    ///
    /// Panics when the key fails [`Key::check`]; an invalid key reaching an
    /// accessor indicates a programming bug, not a data condition.
    pub fn object_id(&self) -> Uuid {
        self.assert_valid();
        Uuid::from_slice(&self.0[1..17]).expect("checked key has a 16-byte object id")
    }

    /// Collection identifier, when the key carries one.
    ///
    /// Panics when the key fails [`Key::check`].
    pub fn collection_id(&self) -> Option<Uuid> {
        self.assert_valid();
        if self.0.len() == COLLECTION_KEY_SIZE {
            Some(Uuid::from_slice(&self.0[17..33]).expect("checked key has a 16-byte collection id"))
        } else {
            None
        }
    }

    /// Version scalar embedded in the key.
    ///
    /// Panics when the key fails [`Key::check`].
    pub fn version(&self) -> Scalar {
        self.assert_valid();
        let tail = &self.0[self.0.len() - 12..];
        Scalar {
            vid: BigEndian::read_u64(&tail[..8]),
            pid: BigEndian::read_u32(&tail[8..]),
        }
    }

    fn assert_valid(&self) {
        if let Err(err) = self.check() {
            panic!("accessor called on invalid key: {err}");
        }
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Validate raw key bytes: total length, then the leading format byte.
pub fn check(buf: &[u8]) -> Result<()> {
    if buf.len() != OBJECT_KEY_SIZE && buf.len() != COLLECTION_KEY_SIZE {
        return Err(Error::BadSize(buf.len()));
    }
    if buf[0] != KEY_VERSION {
        return Err(Error::BadVersion(buf[0]));
    }
    Ok(())
}

/// vid before pid, both big-endian, so byte order equals scalar order
fn push_scalar(buf: &mut Vec<u8>, scalar: Scalar) {
    let mut tail = [0u8; 12];
    BigEndian::write_u64(&mut tail[..8], scalar.vid);
    BigEndian::write_u32(&mut tail[8..], scalar.pid);
    buf.extend_from_slice(&tail);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn oid() -> Uuid {
        Uuid::from_bytes([0x42; 16])
    }

    #[test]
    fn test_key_sizes() {
        let key = Key::new(oid(), Some(Scalar::new(1, 2)));
        assert_eq!(key.as_bytes().len(), OBJECT_KEY_SIZE);
        assert!(key.check().is_ok());

        let key = Key::with_collection(oid(), Uuid::from_bytes([0x17; 16]), None);
        assert_eq!(key.as_bytes().len(), COLLECTION_KEY_SIZE);
        assert!(key.check().is_ok());
    }

    #[test]
    fn test_accessors_round_trip() {
        let scalar = Scalar::new(7, 1234);
        let cid = Uuid::from_bytes([0x17; 16]);
        let key = Key::with_collection(oid(), cid, Some(scalar));
        assert_eq!(key.object_id(), oid());
        assert_eq!(key.collection_id(), Some(cid));
        assert_eq!(key.version(), scalar);

        let key = Key::new(oid(), Some(scalar));
        assert_eq!(key.collection_id(), None);
        assert_eq!(key.version(), scalar);
    }

    #[test]
    fn test_nil_scalar_encodes_zero_section() {
        let key = Key::new(oid(), None);
        assert_eq!(key.version(), Scalar::zero());
        // A zero key is the smallest key in its object's range
        let versioned = Key::new(oid(), Some(Scalar::new(0, 1)));
        assert!(key.as_bytes() < versioned.as_bytes());
    }

    #[test]
    fn test_check_bad_size() {
        assert!(matches!(
            Key::from_bytes(vec![KEY_VERSION; 12]),
            Err(Error::BadSize(12))
        ));
        assert!(matches!(Key::from_bytes(vec![]), Err(Error::BadSize(0))));
    }

    #[test]
    fn test_check_bad_version() {
        let mut buf = Key::new(oid(), None).as_bytes().to_vec();
        buf[0] = 0x9;
        assert!(matches!(Key::from_bytes(buf), Err(Error::BadVersion(0x9))));
    }

    #[test]
    #[should_panic(expected = "accessor called on invalid key")]
    fn test_accessor_panics_on_invalid_key() {
        let mut key = Key::new(oid(), None);
        key.0.truncate(5);
        key.object_id();
    }

    #[test]
    fn test_object_prefix_and_limit() {
        let key = Key::new(oid(), Some(Scalar::new(3, 9)));
        let prefix = key.object_prefix();
        assert_eq!(prefix.len(), 17);
        assert!(key.as_bytes().starts_with(&prefix));

        let limit = key.object_limit();
        assert_eq!(limit.len(), prefix.len());
        assert!(limit > prefix);
        assert!(key.as_bytes() < limit.as_slice());
    }

    #[test]
    fn test_object_limit_carries_across_ff() {
        let mut id = [0x42u8; 16];
        id[15] = 0xff;
        id[14] = 0xff;
        let key = Key::new(Uuid::from_bytes(id), None);
        let limit = key.object_limit();
        // 0x42..0x43 0x00 0x00 after the carry
        assert_eq!(limit[14], 0x43);
        assert_eq!(limit[15], 0x00);
        assert_eq!(limit[16], 0x00);
        assert!(limit > key.object_prefix());
    }

    #[test]
    fn test_limit_excludes_next_object_id() {
        let mut next = [0x42u8; 16];
        next[15] = 0x43;
        let this_key = Key::new(oid(), Some(Scalar::new(u32::MAX, u64::MAX)));
        let next_key = Key::new(Uuid::from_bytes(next), None);

        let limit = this_key.object_limit();
        // Every version of this object sorts below the limit
        assert!(this_key.as_bytes() < limit.as_slice());
        // The next object id sorts at or above the limit
        assert!(next_key.as_bytes() >= limit.as_slice());
    }

    #[test]
    fn test_increasing_scalars_sort_ascending() {
        let clockwise = [
            Scalar::new(1, 1),
            Scalar::new(1, 2),
            Scalar::new(2, 2),
            Scalar::new(1, 3),
            Scalar::new(1, 300),
            Scalar::new(2, 70_000),
        ];
        let keys: Vec<Key> = clockwise.iter().map(|s| Key::new(oid(), Some(*s))).collect();
        for pair in keys.windows(2) {
            assert!(
                pair[0].as_bytes() < pair[1].as_bytes(),
                "{} should sort before {}",
                pair[0].version(),
                pair[1].version()
            );
        }
    }

    proptest! {
        #[test]
        fn prop_byte_order_equals_scalar_order(
            a_pid: u32, a_vid: u64, b_pid: u32, b_vid: u64
        ) {
            let a = Scalar::new(a_pid, a_vid);
            let b = Scalar::new(b_pid, b_vid);
            let ka = Key::new(oid(), Some(a));
            let kb = Key::new(oid(), Some(b));
            prop_assert_eq!(ka.as_bytes().cmp(kb.as_bytes()), a.cmp(&b));
        }

        #[test]
        fn prop_round_trip(pid: u32, vid: u64, id: [u8; 16]) {
            let scalar = Scalar::new(pid, vid);
            let key = Key::new(Uuid::from_bytes(id), Some(scalar));
            prop_assert_eq!(key.version(), scalar);
            prop_assert_eq!(key.object_id(), Uuid::from_bytes(id));
            let reparsed = Key::from_bytes(key.as_bytes().to_vec()).unwrap();
            prop_assert_eq!(reparsed, key);
        }
    }
}
