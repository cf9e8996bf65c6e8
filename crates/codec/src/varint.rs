//! Varint primitives
//!
//! Unsigned values use base-128 continuation encoding; signed values are
//! zigzag-folded first so small negative numbers stay short. The maximum
//! unsigned encoding is 10 bytes, with the final byte restricted to 0 or 1.

/// Maximum number of bytes an encoded u64 varint occupies
pub const MAX_VARINT_LEN: usize = 10;

/// Append an unsigned varint to `buf`, returning the number of bytes written.
pub fn put_uvarint(buf: &mut Vec<u8>, mut value: u64) -> usize {
    let mut written = 0;
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
        written += 1;
    }
    buf.push(value as u8);
    written + 1
}

/// Append a zigzag-encoded signed varint to `buf`.
pub fn put_varint(buf: &mut Vec<u8>, value: i64) -> usize {
    put_uvarint(buf, zigzag(value))
}

/// Read an unsigned varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed, or `None` when the
/// buffer ends mid-varint or the encoding exceeds 64 bits.
pub fn read_uvarint(buf: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for (i, &b) in buf.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return None;
        }
        if b < 0x80 {
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return None;
            }
            return Some((value | (u64::from(b) << shift), i + 1));
        }
        value |= u64::from(b & 0x7f) << shift;
        shift += 7;
    }
    None
}

/// Read a zigzag-encoded signed varint from the front of `buf`.
pub fn read_varint(buf: &[u8]) -> Option<(i64, usize)> {
    read_uvarint(buf).map(|(u, n)| (unzigzag(u), n))
}

/// Number of bytes `value` occupies as an unsigned varint.
pub fn uvarint_size(value: u64) -> usize {
    // 64 bits pack 7 per byte; bit length 0 still takes one byte
    let bits = 64 - value.max(1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Number of bytes `value` occupies as a signed varint.
pub fn varint_size(value: i64) -> usize {
    uvarint_size(zigzag(value))
}

fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_uvarint_round_trip_boundaries() {
        for value in [0u64, 1, 127, 128, 16_383, 16_384, u64::MAX - 1, u64::MAX] {
            let mut buf = Vec::new();
            let written = put_uvarint(&mut buf, value);
            assert_eq!(written, buf.len());
            assert_eq!(written, uvarint_size(value));
            assert_eq!(read_uvarint(&buf), Some((value, written)));
        }
    }

    #[test]
    fn test_varint_round_trip_boundaries() {
        for value in [0i64, 1, -1, 63, -64, 64, -65, i64::MAX, i64::MIN] {
            let mut buf = Vec::new();
            let written = put_varint(&mut buf, value);
            assert_eq!(written, varint_size(value));
            assert_eq!(read_varint(&buf), Some((value, written)));
        }
    }

    #[test]
    fn test_zero_is_single_zero_byte() {
        let mut buf = Vec::new();
        put_uvarint(&mut buf, 0);
        assert_eq!(buf, vec![0]);

        buf.clear();
        put_varint(&mut buf, 0);
        assert_eq!(buf, vec![0]);
    }

    #[test]
    fn test_truncated_varint_fails() {
        // Continuation bit set with nothing following
        assert_eq!(read_uvarint(&[0x80]), None);
        assert_eq!(read_uvarint(&[0xff, 0xff]), None);
        assert_eq!(read_uvarint(&[]), None);
    }

    #[test]
    fn test_overlong_varint_fails() {
        // 11 continuation bytes exceed the 64-bit budget
        let buf = [0x80u8; 11];
        assert_eq!(read_uvarint(&buf), None);

        // 10 bytes whose final byte overflows bit 63
        let mut buf = vec![0xffu8; 9];
        buf.push(0x02);
        assert_eq!(read_uvarint(&buf), None);
    }

    proptest! {
        #[test]
        fn prop_uvarint_round_trip(value: u64) {
            let mut buf = Vec::new();
            let written = put_uvarint(&mut buf, value);
            prop_assert_eq!(written, uvarint_size(value));
            prop_assert_eq!(read_uvarint(&buf), Some((value, written)));
        }

        #[test]
        fn prop_varint_round_trip(value: i64) {
            let mut buf = Vec::new();
            let written = put_varint(&mut buf, value);
            prop_assert_eq!(written, varint_size(value));
            prop_assert_eq!(read_varint(&buf), Some((value, written)));
        }

        #[test]
        fn prop_uvarint_order_preserving_length(a: u64, b: u64) {
            // Larger values never encode shorter
            if a <= b {
                prop_assert!(uvarint_size(a) <= uvarint_size(b));
            }
        }
    }
}
