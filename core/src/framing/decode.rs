use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::checksum::verify_checksum;
use crate::constants::{CHECKSUM_LEN, MAX_VARINT_LEN64};
use crate::framing::types::{FrameError, FrameView};

/// Decode an unsigned LEB128 varint from the start of `input`.
///
/// Returns the value and the number of bytes consumed.
#[inline]
pub fn decode_uvarint(input: &[u8]) -> Result<(u64, usize), FrameError> {
    let mut value = 0u64;
    let mut shift = 0u32;

    for (i, &byte) in input.iter().enumerate() {
        if i == MAX_VARINT_LEN64 {
            return Err(FrameError::VarintOverflow);
        }
        // The 10th byte may only carry the single top bit of a u64.
        if i == MAX_VARINT_LEN64 - 1 && byte > 1 {
            return Err(FrameError::VarintOverflow);
        }

        value |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }

    Err(FrameError::Truncated)
}

/// Decode a single frame from the start of `wire`.
///
/// Returns a zero-copy view and the number of bytes the frame occupied.
/// Trailing bytes after the frame are left untouched.
pub fn decode_frame(wire: &[u8]) -> Result<(FrameView<'_>, usize), FrameError> {
    parse_frame(wire, None)
}

/// Same as [`decode_frame`], rejecting records longer than `max_record_len`
/// before touching the payload.
pub fn decode_frame_with_limit(
    wire: &[u8],
    max_record_len: usize,
) -> Result<(FrameView<'_>, usize), FrameError> {
    parse_frame(wire, Some(max_record_len))
}

fn parse_frame(wire: &[u8], limit: Option<usize>) -> Result<(FrameView<'_>, usize), FrameError> {
    let (len, mut off) = decode_uvarint(wire)?;

    if let Some(max) = limit {
        if len > max as u64 {
            return Err(FrameError::RecordTooLarge { len, max });
        }
    }
    let len = usize::try_from(len).map_err(|_| FrameError::Truncated)?;

    if wire.len() - off < CHECKSUM_LEN {
        return Err(FrameError::Truncated);
    }
    let checksum = BigEndian::read_u32(&wire[off..off + CHECKSUM_LEN]);
    off += CHECKSUM_LEN;

    if wire.len() - off < len {
        return Err(FrameError::Truncated);
    }
    let payload = &wire[off..off + len];
    off += len;

    verify_checksum(payload, checksum).map_err(|actual| FrameError::ChecksumMismatch {
        expected: checksum,
        actual,
    })?;

    Ok((FrameView { checksum, payload }, off))
}

/// Iterator over the frames of a complete stream.
///
/// Yields `Err` once and then stops if the stream is corrupt or truncated.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    wire: &'a [u8],
    pos: usize,
    limit: Option<usize>,
    failed: bool,
}

impl<'a> FrameIter<'a> {
    pub fn new(wire: &'a [u8]) -> Self {
        Self {
            wire,
            pos: 0,
            limit: None,
            failed: false,
        }
    }

    /// Reject any frame whose record is longer than `max_record_len`.
    pub fn with_limit(mut self, max_record_len: usize) -> Self {
        self.limit = Some(max_record_len);
        self
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet decoded.
    pub fn remaining(&self) -> usize {
        self.wire.len() - self.pos
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Result<FrameView<'a>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.wire.len() {
            return None;
        }

        match parse_frame(&self.wire[self.pos..], self.limit) {
            Ok((view, used)) => {
                self.pos += used;
                Some(Ok(view))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode every record of a stream into owned buffers.
pub fn decode_stream(wire: &[u8]) -> Result<Vec<Vec<u8>>, FrameError> {
    FrameIter::new(wire)
        .map(|frame| frame.map(|view| view.payload.to_vec()))
        .collect()
}

/// Decode every record of a stream as `Bytes` slices sharing `wire`'s
/// allocation.
pub fn decode_stream_bytes(wire: Bytes) -> Result<Vec<Bytes>, FrameError> {
    let mut records = Vec::new();
    let mut pos = 0;

    while pos < wire.len() {
        let (view, used) = decode_frame(&wire[pos..])?;
        let start = pos + used - view.payload.len();
        records.push(wire.slice(start..pos + used));
        pos += used;
    }

    Ok(records)
}
