//! Schema-free binary encoding for honu records
//!
//! Every structured type that crosses the storage boundary implements
//! explicit [`Encodable`] and [`Decodable`] rather than going through
//! reflection or a schema registry. This keeps the on-disk layout stable
//! and auditable across format changes: what a type writes is exactly
//! what its `encode` says, byte for byte.
//!
//! # Wire forms
//!
//! | Type | Encoding |
//! |---|---|
//! | byte / u8 | 1 raw byte |
//! | bool | 1 byte, 0 or 1 |
//! | u32 / u64 | unsigned varint |
//! | i64 | zigzag varint |
//! | 16-byte id | raw, no length prefix |
//! | time | varint nanoseconds since epoch, zero byte for absent |
//! | bytes / string | varint length + raw bytes |
//! | string slice | varint count, then each string frame |
//! | nested struct | 1 presence byte, then recursive encode |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod encode;
pub mod error;
pub mod varint;

pub use decode::{Decodable, Decoder};
pub use encode::{Encodable, Encoder};
pub use error::{CodecError, Result};

/// Encode a single value into a fresh buffer.
pub fn marshal<T: Encodable>(value: &T) -> Vec<u8> {
    let mut encoder = Encoder::with_capacity(value.size());
    value.encode(&mut encoder);
    encoder.bytes()
}

/// Decode a single value from the front of a buffer.
pub fn unmarshal<T: Decodable>(buf: &[u8]) -> Result<T> {
    let mut decoder = Decoder::new(buf);
    T::decode(&mut decoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        name: String,
        count: u64,
    }

    impl Encodable for Pair {
        fn size(&self) -> usize {
            encode::string_size(&self.name) + varint::uvarint_size(self.count)
        }

        fn encode(&self, e: &mut Encoder) {
            e.encode_string(&self.name);
            e.encode_u64(self.count);
        }
    }

    impl Decodable for Pair {
        fn decode(d: &mut Decoder) -> Result<Self> {
            Ok(Pair {
                name: d.decode_string()?,
                count: d.decode_u64()?,
            })
        }
    }

    #[test]
    fn test_marshal_unmarshal_round_trip() {
        let pair = Pair {
            name: "replicas".into(),
            count: 42,
        };
        let buf = marshal(&pair);
        assert_eq!(buf.len(), pair.size());
        let restored: Pair = unmarshal(&buf).unwrap();
        assert_eq!(restored, pair);
    }

    #[test]
    fn test_unmarshal_empty_buffer() {
        let result: Result<Pair> = unmarshal(&[]);
        assert!(matches!(result, Err(CodecError::EndOfBuffer)));
    }
}
