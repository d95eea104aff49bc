//! checksum.rs
//! Per-record CRC-32C (Castagnoli).
//!
//! Every call starts from a fresh CRC state, so a frame's checksum covers
//! exactly its own payload and never a running total of the stream.

/// CRC-32C of one record.
#[inline]
pub fn compute_checksum(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

/// Recompute the checksum of `data` and compare it with `expected`.
///
/// Returns the recomputed value on mismatch.
#[inline]
pub fn verify_checksum(data: &[u8], expected: u32) -> Result<(), u32> {
    let actual = compute_checksum(data);
    if actual == expected {
        Ok(())
    } else {
        Err(actual)
    }
}
