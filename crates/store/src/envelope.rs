//! Storage envelope
//!
//! Every record the store writes has the same shape:
//!
//! ```text
//! [format-version byte][varint-length data frame][metadata section]
//! ```
//!
//! The payload rides in front of the metadata so that `data()` can slice
//! it out without decoding the metadata at all; `metadata()` re-derives
//! its offset from the format byte and the data-length varint. The
//! metadata section starts with a presence byte: system records (the
//! store's own bookkeeping) carry an arbitrary encodable value in the data
//! frame and a nil metadata trailer, and are never handed to end users.

use honu_codec::{Decoder, Encodable, Encoder};
use honu_core::{Error, Metadata, Result};

/// Current storage envelope layout version byte
pub const STORAGE_VERSION: u8 = 0x1;

/// Marshal a metadata envelope and its payload into one record.
pub fn marshal(meta: &Metadata, data: &[u8]) -> Vec<u8> {
    let mut e = Encoder::with_capacity(
        1 + honu_codec::encode::bytes_size(data) + honu_codec::encode::struct_size(Some(meta)),
    );
    e.encode_byte(STORAGE_VERSION);
    e.encode_bytes(data);
    e.encode_struct(Some(meta));
    e.bytes()
}

/// Marshal a system record: an arbitrary encodable value with a nil
/// metadata trailer.
pub fn marshal_system<T: Encodable>(value: &T) -> Vec<u8> {
    let mut e = Encoder::with_capacity(2 + honu_codec::varint::MAX_VARINT_LEN + value.size());
    e.encode_byte(STORAGE_VERSION);
    e.encode_bytes(&honu_codec::marshal(value));
    e.encode_struct::<Metadata>(None);
    e.bytes()
}

/// Split a record into its metadata (None for system records) and payload.
pub fn unmarshal(buf: &[u8]) -> Result<(Option<Metadata>, Vec<u8>)> {
    let mut d = check_header(buf)?;
    let data = d
        .decode_bytes()
        .map_err(|e| Error::Malformed(format!("data frame: {e}")))?;
    let meta = d.decode_struct::<Metadata>()?;
    Ok((meta, data))
}

/// Extract only the payload from a record.
pub fn data(buf: &[u8]) -> Result<Vec<u8>> {
    let mut d = check_header(buf)?;
    d.decode_bytes()
        .map_err(|e| Error::Malformed(format!("data frame: {e}")))
}

/// Extract only the metadata from a record; `None` for system records.
pub fn metadata(buf: &[u8]) -> Result<Option<Metadata>> {
    let (meta, _) = unmarshal(buf)?;
    Ok(meta)
}

/// Decode the value of a system record.
pub fn system_value<T: honu_codec::Decodable>(buf: &[u8]) -> Result<T> {
    let (meta, data) = unmarshal(buf)?;
    if meta.is_some() {
        return Err(Error::Malformed(
            "expected a system record but found object metadata".into(),
        ));
    }
    Ok(honu_codec::unmarshal(&data)?)
}

fn check_header(buf: &[u8]) -> Result<Decoder<'_>> {
    let mut d = Decoder::new(buf);
    let version = d
        .decode_byte()
        .map_err(|_| Error::Malformed("empty record".into()))?;
    if version != STORAGE_VERSION {
        return Err(Error::BadVersion(version));
    }
    Ok(d)
}
