//! telemetry/counters.rs
//! Mutable counters updated by the writer as records are framed and drained.
//!
//! Summary: frame counts, payload vs overhead bytes, and drain activity.
//! Converted into an immutable `WriterSnapshot` on demand.
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Why a drain happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainCause {
    /// The next frame did not fit in the remaining capacity.
    Capacity,
    /// `close()` drained the remainder.
    Close,
    /// Caller asked for an explicit flush.
    Explicit,
}

/// Deterministic counters collected during one writer's lifetime
#[derive(Default, Clone, Debug, Encode, Decode, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriterCounters {
    pub records: u64,
    pub bytes_payload: u64,
    pub bytes_overhead: u64,
    pub drains_capacity: u64,
    pub drains_close: u64,
    pub drains_explicit: u64,
    pub bytes_drained: u64,
    pub flush_signals: u64,
    pub failed_drains: u64,
}

impl WriterCounters {
    /// Record one framed record.
    ///
    /// - `payload_len`: record bytes accepted
    /// - `frame_len`: total bytes appended (prefix + checksum + payload)
    pub fn add_record(&mut self, payload_len: usize, frame_len: usize) {
        self.records += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_overhead += (frame_len - payload_len) as u64;
    }

    /// Record one successful drain of `len` bytes followed by a flush signal.
    pub fn add_drain(&mut self, cause: DrainCause, len: usize) {
        match cause {
            DrainCause::Capacity => self.drains_capacity += 1,
            DrainCause::Close => self.drains_close += 1,
            DrainCause::Explicit => self.drains_explicit += 1,
        }
        self.bytes_drained += len as u64;
        self.flush_signals += 1;
    }

    pub fn add_failed_drain(&mut self) {
        self.failed_drains += 1;
    }

    pub fn drains(&self) -> u64 {
        self.drains_capacity + self.drains_close + self.drains_explicit
    }

    /// Total bytes produced by the encoder (drained or still buffered).
    pub fn bytes_encoded(&self) -> u64 {
        self.bytes_payload + self.bytes_overhead
    }

    pub fn merge(&mut self, other: &WriterCounters) {
        *self += other.clone();
    }
}

impl AddAssign for WriterCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.records          += rhs.records;
        self.bytes_payload    += rhs.bytes_payload;
        self.bytes_overhead   += rhs.bytes_overhead;
        self.drains_capacity  += rhs.drains_capacity;
        self.drains_close     += rhs.drains_close;
        self.drains_explicit  += rhs.drains_explicit;
        self.bytes_drained    += rhs.bytes_drained;
        self.flush_signals    += rhs.flush_signals;
        self.failed_drains    += rhs.failed_drains;
    }
}

impl WriterCounters {
    /// Compact binary form for shipping counters across process boundaries.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (counters, _) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(counters)
    }
}
