//! telemetry/snapshot.rs
//!
//! Immutable view of a writer's counters and timings at one point in time.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::WriterCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriterSnapshot {
    pub counters: WriterCounters,
    pub capacity: usize,
    pub buffered_bytes: usize,
    /// overhead / (payload + overhead)
    pub overhead_ratio: f64,
    pub frames_per_drain: f64,
    pub throughput_payload_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl WriterSnapshot {
    pub fn from(
        counters: &WriterCounters,
        timer: &TelemetryTimer,
        capacity: usize,
        buffered_bytes: usize,
    ) -> Self {
        let elapsed = timer.elapsed();

        let encoded = counters.bytes_encoded();
        let overhead_ratio = if encoded > 0 {
            counters.bytes_overhead as f64 / encoded as f64
        } else {
            0.0
        };

        let drains = counters.drains();
        let frames_per_drain = if drains > 0 {
            counters.records as f64 / drains as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_payload as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            capacity,
            buffered_bytes,
            overhead_ratio,
            frames_per_drain,
            throughput_payload_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    /// Encoded bytes = drained bytes + bytes still waiting in the buffer.
    pub fn sanity_check(&self) -> bool {
        self.counters.bytes_encoded() == self.counters.bytes_drained + self.buffered_bytes as u64
            && self.overhead_ratio <= 1.0
            && self.counters.flush_signals == self.counters.drains()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
