//! Versioned envelope: the version record
//!
//! Every stored object carries a [`Version`]: its Lamport scalar, the
//! region that wrote it, a tombstone flag, timestamps, and a depth-1 copy
//! of the version it replaced. The parent never carries its own parent, so
//! the chain stored with a record is bounded regardless of an object's
//! update count; full history is reconstructed by scanning the object's
//! key range, never by walking parents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use honu_codec::{encode, Decodable, Decoder, Encodable, Encoder};

use crate::scalar::Scalar;

/// One version in an object's update chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Process identifier of the writing replica
    pub pid: u32,
    /// Monotonic version counter
    pub vid: u64,
    /// Region of the writing replica
    pub region: String,
    /// Depth-1 copy of the immediately preceding stored version
    pub parent: Option<Box<Version>>,
    /// True when this version marks the object deleted
    pub tombstone: bool,
    /// When the first version of the object was created
    pub created: Option<DateTime<Utc>>,
    /// When this version was written
    pub modified: Option<DateTime<Utc>>,
}

impl Version {
    /// The scalar identity of this version
    #[inline]
    pub fn scalar(&self) -> Scalar {
        Scalar::new(self.pid, self.vid)
    }

    /// True when this version carries no scalar identity
    pub fn is_zero(&self) -> bool {
        self.scalar().is_zero()
    }

    /// A shallow copy with the grandparent dropped, suitable for storing
    /// as another version's parent.
    pub fn strip(&self) -> Version {
        Version {
            pid: self.pid,
            vid: self.vid,
            region: self.region.clone(),
            parent: None,
            tombstone: self.tombstone,
            created: self.created,
            modified: self.modified,
        }
    }

    /// True when `self` is the immediate successor of `other`, i.e. its
    /// stored parent is exactly `other`'s scalar.
    pub fn is_child_of(&self, other: &Version) -> bool {
        self.parent
            .as_ref()
            .map(|p| p.scalar() == other.scalar())
            .unwrap_or(false)
    }
}

impl Encodable for Version {
    fn size(&self) -> usize {
        honu_codec::varint::uvarint_size(u64::from(self.pid))
            + honu_codec::varint::uvarint_size(self.vid)
            + encode::string_size(&self.region)
            + encode::struct_size(self.parent.as_deref())
            + 1
            + encode::time_size(self.created)
            + encode::time_size(self.modified)
    }

    fn encode(&self, e: &mut Encoder) {
        e.encode_u32(self.pid);
        e.encode_u64(self.vid);
        e.encode_string(&self.region);
        e.encode_struct(self.parent.as_deref());
        e.encode_bool(self.tombstone);
        e.encode_time(self.created);
        e.encode_time(self.modified);
    }
}

impl Decodable for Version {
    fn decode(d: &mut Decoder) -> honu_codec::Result<Self> {
        Ok(Version {
            pid: d.decode_u32()?,
            vid: d.decode_u64()?,
            region: d.decode_string()?,
            parent: d.decode_struct::<Version>()?.map(Box::new),
            tombstone: d.decode_bool()?,
            created: d.decode_time()?,
            modified: d.decode_time()?,
        })
    }
}
