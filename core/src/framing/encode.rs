use byteorder::{BigEndian, ByteOrder};

use crate::checksum::compute_checksum;
use crate::constants::{CHECKSUM_LEN, MAX_FRAME_OVERHEAD, MAX_VARINT_LEN64};

/// Write `value` as an unsigned LEB128 varint into `buf`.
///
/// Returns the number of bytes written (1..=10).
#[inline]
pub fn put_uvarint(buf: &mut [u8; MAX_VARINT_LEN64], mut value: u64) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Number of bytes `value` takes as a varint.
#[inline]
pub const fn uvarint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Exact wire size of the frame for a record of `record_len` bytes.
#[inline]
pub const fn encoded_len(record_len: usize) -> usize {
    uvarint_len(record_len as u64) + CHECKSUM_LEN + record_len
}

/// Worst-case wire size reserved for a record of `record_len` bytes.
#[inline]
pub const fn max_encoded_len(record_len: usize) -> usize {
    record_len + MAX_FRAME_OVERHEAD
}

/// Append the frame for `record` to `out`.
///
/// Layout:
///
/// ```text
/// [ varint len(record) (1..=10) ]
/// [ crc32c(record), big-endian (4) ]
/// [ record (N) ]
/// ```
///
/// An empty record produces no frame: nothing is appended and `0` is
/// returned. Otherwise returns the number of bytes appended.
pub fn encode_frame(out: &mut Vec<u8>, record: &[u8]) -> usize {
    if record.is_empty() {
        return 0;
    }

    let mut prefix = [0u8; MAX_VARINT_LEN64];
    let prefix_len = put_uvarint(&mut prefix, record.len() as u64);

    let mut crc = [0u8; CHECKSUM_LEN];
    BigEndian::write_u32(&mut crc, compute_checksum(record));

    let start = out.len();
    out.reserve(prefix_len + CHECKSUM_LEN + record.len());
    out.extend_from_slice(&prefix[..prefix_len]);
    out.extend_from_slice(&crc);
    out.extend_from_slice(record);

    out.len() - start
}
