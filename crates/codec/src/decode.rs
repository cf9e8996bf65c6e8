//! Sequential binary decoder
//!
//! The decoder is a cursor over a borrowed buffer. Reads consume from the
//! front; each method fails with the decode fault the wire contract names
//! rather than panicking on bad data.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::error::{CodecError, Result};
use crate::varint;

/// A type reconstructable from its [`crate::Encodable`] binary form.
pub trait Decodable: Sized {
    /// Read this value's binary form from the decoder
    fn decode(d: &mut Decoder) -> Result<Self>;
}

/// Cursor over an encoded buffer
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Wrap a buffer for sequential decoding
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True when the buffer is fully consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Consume `n` raw bytes.
    ///
    /// Fails `EndOfBuffer` when nothing is left at all, `UnexpectedEof`
    /// when the buffer ends partway through the requested span.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > 0 && remaining == 0 {
            return Err(CodecError::EndOfBuffer);
        }
        if n > remaining {
            return Err(CodecError::UnexpectedEof { needed: n, remaining });
        }
        let span = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(span)
    }

    /// Read a single raw byte
    pub fn decode_byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a 0/1 byte as bool; any other value is a parse fault
    pub fn decode_bool(&mut self) -> Result<bool> {
        match self.decode_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::ParseBoolean(other)),
        }
    }

    fn decode_uvarint(&mut self) -> Result<u64> {
        if self.remaining() == 0 {
            return Err(CodecError::EndOfBuffer);
        }
        let (value, read) = varint::read_uvarint(self.rest()).ok_or(CodecError::NoLength)?;
        self.pos += read;
        Ok(value)
    }

    /// Read an unsigned varint bounded to u32
    pub fn decode_u32(&mut self) -> Result<u32> {
        let value = self.decode_uvarint()?;
        u32::try_from(value).map_err(|_| CodecError::Overflow)
    }

    /// Read an unsigned varint
    pub fn decode_u64(&mut self) -> Result<u64> {
        self.decode_uvarint()
    }

    /// Read a zigzag varint
    pub fn decode_i64(&mut self) -> Result<i64> {
        if self.remaining() == 0 {
            return Err(CodecError::EndOfBuffer);
        }
        let (value, read) = varint::read_varint(self.rest()).ok_or(CodecError::NoLength)?;
        self.pos += read;
        Ok(value)
    }

    /// Read a raw 16-byte identifier
    pub fn decode_uuid(&mut self) -> Result<Uuid> {
        let span = self.take(16)?;
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(span);
        Ok(Uuid::from_bytes(bytes))
    }

    /// Read a varint-nanosecond timestamp; the zero byte decodes to `None`
    pub fn decode_time(&mut self) -> Result<Option<DateTime<Utc>>> {
        let nanos = self.decode_i64()?;
        if nanos == 0 {
            return Ok(None);
        }
        Ok(Some(Utc.timestamp_nanos(nanos)))
    }

    /// Read a length-prefixed byte frame
    pub fn decode_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.decode_uvarint()?;
        let len = usize::try_from(len).map_err(|_| CodecError::Overflow)?;
        Ok(self.take(len)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string frame
    pub fn decode_string(&mut self) -> Result<String> {
        let bytes = self.decode_bytes()?;
        String::from_utf8(bytes).map_err(|_| CodecError::ParseString)
    }

    /// Read a counted sequence of string frames
    pub fn decode_string_slice(&mut self) -> Result<Vec<String>> {
        let count = self.decode_uvarint()?;
        let count = usize::try_from(count).map_err(|_| CodecError::Overflow)?;
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(self.decode_string()?);
        }
        Ok(values)
    }

    /// Read a presence byte, then the struct when present
    pub fn decode_struct<T: Decodable>(&mut self) -> Result<Option<T>> {
        if self.decode_bool()? {
            Ok(Some(T::decode(self)?))
        } else {
            Ok(None)
        }
    }

    /// Read a counted sequence of struct encodings
    pub fn decode_struct_slice<T: Decodable>(&mut self) -> Result<Vec<T>> {
        let count = self.decode_uvarint()?;
        let count = usize::try_from(count).map_err(|_| CodecError::Overflow)?;
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(T::decode(self)?);
        }
        Ok(values)
    }
}
