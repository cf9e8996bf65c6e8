//! Sequential binary encoder
//!
//! The encoder owns a growable buffer and is intended to be reused across
//! marshal calls: [`Encoder::bytes`] hands back the written span and resets
//! the length while the backing capacity is retained.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::varint;

/// A type with an explicit, stable binary form.
///
/// `size` must return exactly the number of bytes `encode` writes; callers
/// use it to preallocate and to build length frames without a second pass.
pub trait Encodable {
    /// Exact number of bytes `encode` will write
    fn size(&self) -> usize;

    /// Append this value's binary form to the encoder
    fn encode(&self, e: &mut Encoder);
}

/// Growable buffer with append-only binary primitives
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with `capacity` bytes preallocated
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last [`Encoder::bytes`] call
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written since the last drain
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Ensure capacity for `additional` more bytes.
    ///
    /// Panics if the resulting capacity would overflow `usize`; running out
    /// of address space for an in-memory record is a programming bug, not a
    /// recoverable condition.
    pub fn grow(&mut self, additional: usize) {
        if self.buf.len().checked_add(additional).is_none() {
            panic!("encoder capacity overflow: cannot grow by {additional} bytes");
        }
        self.buf.reserve(additional);
    }

    /// Return the written span and reset the encoder for reuse.
    ///
    /// Each call allocates its own output vector; only the encoder's
    /// internal buffer keeps its capacity across calls.
    pub fn bytes(&mut self) -> Vec<u8> {
        let out = self.buf.clone();
        self.buf.clear();
        out
    }

    /// Append a single raw byte
    pub fn encode_byte(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append a bool as a single 0/1 byte
    pub fn encode_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Append a u32 as an unsigned varint
    pub fn encode_u32(&mut self, value: u32) {
        varint::put_uvarint(&mut self.buf, u64::from(value));
    }

    /// Append a u64 as an unsigned varint
    pub fn encode_u64(&mut self, value: u64) {
        varint::put_uvarint(&mut self.buf, value);
    }

    /// Append an i64 as a zigzag varint
    pub fn encode_i64(&mut self, value: i64) {
        varint::put_varint(&mut self.buf, value);
    }

    /// Append a 16-byte identifier raw, no length prefix
    pub fn encode_uuid(&mut self, value: &Uuid) {
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Append a timestamp as varint nanoseconds since the Unix epoch.
    ///
    /// An absent time encodes as the single zero byte and round-trips back
    /// to `None`. The wire form holds timestamps representable as i64
    /// nanoseconds (roughly years 1677 through 2262); anything outside
    /// that range encodes as absent.
    pub fn encode_time(&mut self, value: Option<DateTime<Utc>>) {
        let nanos = value.and_then(|t| t.timestamp_nanos_opt()).unwrap_or(0);
        varint::put_varint(&mut self.buf, nanos);
    }

    /// Append a length-prefixed byte frame
    pub fn encode_bytes(&mut self, value: &[u8]) {
        varint::put_uvarint(&mut self.buf, value.len() as u64);
        self.buf.extend_from_slice(value);
    }

    /// Append a length-prefixed UTF-8 string frame
    pub fn encode_string(&mut self, value: &str) {
        self.encode_bytes(value.as_bytes());
    }

    /// Append a varint count followed by each string frame
    pub fn encode_string_slice(&mut self, values: &[String]) {
        varint::put_uvarint(&mut self.buf, values.len() as u64);
        for value in values {
            self.encode_string(value);
        }
    }

    /// Append a presence byte, then the struct's own encoding when present
    pub fn encode_struct<T: Encodable>(&mut self, value: Option<&T>) {
        match value {
            Some(value) => {
                self.buf.push(1);
                value.encode(self);
            }
            None => self.buf.push(0),
        }
    }

    /// Append a varint count followed by each element's encoding
    pub fn encode_struct_slice<T: Encodable>(&mut self, values: &[T]) {
        varint::put_uvarint(&mut self.buf, values.len() as u64);
        for value in values {
            value.encode(self);
        }
    }
}

// Size helpers mirroring the encode_* methods, for Encodable::size impls.

/// Encoded size of a length-prefixed byte frame
pub fn bytes_size(value: &[u8]) -> usize {
    varint::uvarint_size(value.len() as u64) + value.len()
}

/// Encoded size of a length-prefixed string frame
pub fn string_size(value: &str) -> usize {
    bytes_size(value.as_bytes())
}

/// Encoded size of a counted string slice
pub fn string_slice_size(values: &[String]) -> usize {
    varint::uvarint_size(values.len() as u64)
        + values.iter().map(|v| string_size(v)).sum::<usize>()
}

/// Encoded size of a timestamp
pub fn time_size(value: Option<DateTime<Utc>>) -> usize {
    let nanos = value.and_then(|t| t.timestamp_nanos_opt()).unwrap_or(0);
    varint::varint_size(nanos)
}

/// Encoded size of a presence-prefixed nested struct
pub fn struct_size<T: Encodable>(value: Option<&T>) -> usize {
    1 + value.map_or(0, Encodable::size)
}

/// Encoded size of a counted struct slice
pub fn struct_slice_size<T: Encodable>(values: &[T]) -> usize {
    varint::uvarint_size(values.len() as u64) + values.iter().map(Encodable::size).sum::<usize>()
}
