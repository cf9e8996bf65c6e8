//! Versioned envelope: the object metadata
//!
//! [`Metadata`] is everything the store knows about an object besides its
//! payload: identity, namespace, version chain, schema descriptor,
//! ownership, access control, replication regions, publisher provenance,
//! and at-rest encryption/compression descriptors. The metadata owns all
//! of its nested structs; the payload is appended after, not embedded in,
//! the metadata encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use honu_codec::{encode, Decodable, Decoder, Encodable, Encoder};

use crate::scalar::Scalar;
use crate::version::Version;

/// Metadata envelope stored with every object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Stable 16-byte object identifier, assigned at first write
    pub object_id: Uuid,
    /// Namespace the object belongs to
    pub namespace: String,
    /// Version chain head for this object
    pub version: Option<Version>,
    /// Descriptor of the payload's schema, if the publisher declared one
    pub schema: Option<SchemaVersion>,
    /// MIME type of the payload
    pub mime: String,
    /// Identity of the owning user or service
    pub owner: String,
    /// Group the object belongs to
    pub group: String,
    /// Unix-style permission bits
    pub permissions: u32,
    /// Per-client access control entries
    pub acl: Vec<AccessControl>,
    /// Regions allowed to accept writes for this object
    pub write_regions: Vec<String>,
    /// Provenance of the write that created this version
    pub publisher: Option<Publisher>,
    /// At-rest encryption descriptor
    pub encryption: Option<Encryption>,
    /// At-rest compression descriptor
    pub compression: Option<Compression>,
    /// Reserved flag bits
    pub flags: u8,
    /// When the object was first created
    pub created: Option<DateTime<Utc>>,
    /// When the object was last modified
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Scalar of the current version; zero when the object has no version
    pub fn scalar(&self) -> Scalar {
        self.version.as_ref().map(Version::scalar).unwrap_or_default()
    }

    /// True when the current version marks the object deleted
    pub fn tombstone(&self) -> bool {
        self.version.as_ref().map(|v| v.tombstone).unwrap_or(false)
    }
}

/// Schema descriptor: name plus semantic version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Schema name
    pub name: String,
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

/// One access-control entry granting a client permission bits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    /// Client the entry applies to
    pub client_id: String,
    /// Permission bits granted
    pub permissions: u32,
}

/// Provenance of the write that produced a version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// Publishing service identifier
    pub publisher_id: String,
    /// Client identifier presented by the writer
    pub client_id: String,
    /// Remote address of the writer, if known
    pub ip_addr: String,
    /// User agent presented by the writer, if any
    pub user_agent: String,
}

/// At-rest encryption descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encryption {
    /// Identifier of the public key used to seal the data key
    pub public_key_id: String,
    /// Sealed data-encryption key
    pub encryption_key: Vec<u8>,
    /// Sealed HMAC secret
    pub hmac_secret: Vec<u8>,
    /// Signature over the encrypted payload
    pub signature: Vec<u8>,
    /// Algorithm that sealed the keys
    pub sealed_by: String,
    /// Payload encryption algorithm
    pub algorithm: String,
}

/// At-rest compression descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compression {
    /// Compression algorithm applied to the payload
    pub algorithm: String,
    /// Algorithm-specific level
    pub level: i64,
}

impl Encodable for Metadata {
    fn size(&self) -> usize {
        16 + encode::string_size(&self.namespace)
            + encode::struct_size(self.version.as_ref())
            + encode::struct_size(self.schema.as_ref())
            + encode::string_size(&self.mime)
            + encode::string_size(&self.owner)
            + encode::string_size(&self.group)
            + honu_codec::varint::uvarint_size(u64::from(self.permissions))
            + encode::struct_slice_size(&self.acl)
            + encode::string_slice_size(&self.write_regions)
            + encode::struct_size(self.publisher.as_ref())
            + encode::struct_size(self.encryption.as_ref())
            + encode::struct_size(self.compression.as_ref())
            + 1
            + encode::time_size(self.created)
            + encode::time_size(self.modified)
    }

    fn encode(&self, e: &mut Encoder) {
        e.encode_uuid(&self.object_id);
        e.encode_string(&self.namespace);
        e.encode_struct(self.version.as_ref());
        e.encode_struct(self.schema.as_ref());
        e.encode_string(&self.mime);
        e.encode_string(&self.owner);
        e.encode_string(&self.group);
        e.encode_u32(self.permissions);
        e.encode_struct_slice(&self.acl);
        e.encode_string_slice(&self.write_regions);
        e.encode_struct(self.publisher.as_ref());
        e.encode_struct(self.encryption.as_ref());
        e.encode_struct(self.compression.as_ref());
        e.encode_byte(self.flags);
        e.encode_time(self.created);
        e.encode_time(self.modified);
    }
}

impl Decodable for Metadata {
    fn decode(d: &mut Decoder) -> honu_codec::Result<Self> {
        Ok(Metadata {
            object_id: d.decode_uuid()?,
            namespace: d.decode_string()?,
            version: d.decode_struct()?,
            schema: d.decode_struct()?,
            mime: d.decode_string()?,
            owner: d.decode_string()?,
            group: d.decode_string()?,
            permissions: d.decode_u32()?,
            acl: d.decode_struct_slice()?,
            write_regions: d.decode_string_slice()?,
            publisher: d.decode_struct()?,
            encryption: d.decode_struct()?,
            compression: d.decode_struct()?,
            flags: d.decode_byte()?,
            created: d.decode_time()?,
            modified: d.decode_time()?,
        })
    }
}

impl Encodable for SchemaVersion {
    fn size(&self) -> usize {
        encode::string_size(&self.name)
            + honu_codec::varint::uvarint_size(u64::from(self.major))
            + honu_codec::varint::uvarint_size(u64::from(self.minor))
            + honu_codec::varint::uvarint_size(u64::from(self.patch))
    }

    fn encode(&self, e: &mut Encoder) {
        e.encode_string(&self.name);
        e.encode_u32(self.major);
        e.encode_u32(self.minor);
        e.encode_u32(self.patch);
    }
}

impl Decodable for SchemaVersion {
    fn decode(d: &mut Decoder) -> honu_codec::Result<Self> {
        Ok(SchemaVersion {
            name: d.decode_string()?,
            major: d.decode_u32()?,
            minor: d.decode_u32()?,
            patch: d.decode_u32()?,
        })
    }
}

impl Encodable for AccessControl {
    fn size(&self) -> usize {
        encode::string_size(&self.client_id)
            + honu_codec::varint::uvarint_size(u64::from(self.permissions))
    }

    fn encode(&self, e: &mut Encoder) {
        e.encode_string(&self.client_id);
        e.encode_u32(self.permissions);
    }
}

impl Decodable for AccessControl {
    fn decode(d: &mut Decoder) -> honu_codec::Result<Self> {
        Ok(AccessControl {
            client_id: d.decode_string()?,
            permissions: d.decode_u32()?,
        })
    }
}

impl Encodable for Publisher {
    fn size(&self) -> usize {
        encode::string_size(&self.publisher_id)
            + encode::string_size(&self.client_id)
            + encode::string_size(&self.ip_addr)
            + encode::string_size(&self.user_agent)
    }

    fn encode(&self, e: &mut Encoder) {
        e.encode_string(&self.publisher_id);
        e.encode_string(&self.client_id);
        e.encode_string(&self.ip_addr);
        e.encode_string(&self.user_agent);
    }
}

impl Decodable for Publisher {
    fn decode(d: &mut Decoder) -> honu_codec::Result<Self> {
        Ok(Publisher {
            publisher_id: d.decode_string()?,
            client_id: d.decode_string()?,
            ip_addr: d.decode_string()?,
            user_agent: d.decode_string()?,
        })
    }
}

impl Encodable for Encryption {
    fn size(&self) -> usize {
        encode::string_size(&self.public_key_id)
            + encode::bytes_size(&self.encryption_key)
            + encode::bytes_size(&self.hmac_secret)
            + encode::bytes_size(&self.signature)
            + encode::string_size(&self.sealed_by)
            + encode::string_size(&self.algorithm)
    }

    fn encode(&self, e: &mut Encoder) {
        e.encode_string(&self.public_key_id);
        e.encode_bytes(&self.encryption_key);
        e.encode_bytes(&self.hmac_secret);
        e.encode_bytes(&self.signature);
        e.encode_string(&self.sealed_by);
        e.encode_string(&self.algorithm);
    }
}

impl Decodable for Encryption {
    fn decode(d: &mut Decoder) -> honu_codec::Result<Self> {
        Ok(Encryption {
            public_key_id: d.decode_string()?,
            encryption_key: d.decode_bytes()?,
            hmac_secret: d.decode_bytes()?,
            signature: d.decode_bytes()?,
            sealed_by: d.decode_string()?,
            algorithm: d.decode_string()?,
        })
    }
}

impl Encodable for Compression {
    fn size(&self) -> usize {
        encode::string_size(&self.algorithm) + honu_codec::varint::varint_size(self.level)
    }

    fn encode(&self, e: &mut Encoder) {
        e.encode_string(&self.algorithm);
        e.encode_i64(self.level);
    }
}

impl Decodable for Compression {
    fn decode(d: &mut Decoder) -> honu_codec::Result<Self> {
        Ok(Compression {
            algorithm: d.decode_string()?,
            level: d.decode_i64()?,
        })
    }
}
