use thiserror::Error;

use crate::constants::CHECKSUM_LEN;

/// Borrowed view of one decoded frame.
///
/// `payload` points into the decoded input; nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    /// Big-endian CRC-32C stored on the wire (already verified).
    pub checksum: u32,
    pub payload: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Length of the varint prefix for this payload.
    pub fn prefix_len(&self) -> usize {
        crate::framing::encode::uvarint_len(self.payload.len() as u64)
    }

    /// Total bytes this frame occupies on the wire.
    pub fn wire_len(&self) -> usize {
        self.prefix_len() + CHECKSUM_LEN + self.payload.len()
    }

    /// Framing overhead (prefix + checksum) for this frame.
    pub fn overhead(&self) -> usize {
        self.wire_len() - self.payload.len()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("truncated frame")]
    Truncated,

    #[error("varint length prefix longer than 10 bytes or overflows u64")]
    VarintOverflow,

    #[error("checksum mismatch: stored {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch {
        expected: u32,
        actual: u32,
    },

    #[error("record length {len} exceeds limit {max}")]
    RecordTooLarge {
        len: u64,
        max: usize,
    },
}
