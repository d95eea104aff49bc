//! config.rs
//! Construction-time configuration for `FramedBufferedWriter`.
//!
//! The buffer capacity is the only tunable: a larger buffer batches more
//! frames per sink write and flush signal, at the cost of memory and latency.

use serde::{Deserialize, Serialize};

use crate::constants::{ALLOWED_BUFFER_CAPACITIES, DEFAULT_BUFFER_CAPACITY, MAX_BUFFER_CAPACITY};
use crate::types::StreamError;

/// How a requested capacity is mapped onto the standard sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Smallest standard size >= requested.
    #[default]
    RoundUp,
    /// Largest standard size <= requested.
    RoundDown,
    /// Closest standard size if within `tolerance` (relative), else round up.
    Nearest { tolerance: f32 },
    /// Use the requested size as-is (still clamped to the max bound).
    Exact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WriterConfig {
    /// Requested buffer capacity in bytes. `None` → `DEFAULT_BUFFER_CAPACITY`.
    pub buffer_capacity: Option<usize>,
    pub policy: CapacityPolicy,
}

impl WriterConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer_capacity: Some(capacity),
            policy: CapacityPolicy::Exact,
        }
    }

    /// Parse a config from JSON, e.g. `{"buffer_capacity": 65536, "policy": "round_down"}`.
    pub fn from_json(json: &str) -> Result<Self, StreamError> {
        let config: WriterConfig =
            serde_json::from_str(json).map_err(|e| StreamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.buffer_capacity == Some(0) {
            return Err(StreamError::Config("buffer_capacity must be > 0".into()));
        }
        if let CapacityPolicy::Nearest { tolerance } = self.policy {
            if !(0.0..=1.0).contains(&tolerance) {
                return Err(StreamError::Config(format!(
                    "nearest tolerance must be within [0, 1], got {tolerance}"
                )));
            }
        }
        Ok(())
    }

    /// Capacity the writer will actually allocate.
    pub fn resolved_capacity(&self) -> Result<usize, StreamError> {
        self.validate()?;
        Ok(best_buffer_capacity(self.buffer_capacity, self.policy))
    }
}

/// Resolve a requested buffer capacity against the standard sizes.
pub fn best_buffer_capacity(requested: Option<usize>, policy: CapacityPolicy) -> usize {
    let size = match requested {
        None => return DEFAULT_BUFFER_CAPACITY,
        Some(size) => size.min(MAX_BUFFER_CAPACITY),
    };

    if policy == CapacityPolicy::Exact || ALLOWED_BUFFER_CAPACITIES.contains(&size) {
        return size;
    }

    let min_allowed = ALLOWED_BUFFER_CAPACITIES[0];
    let max_allowed = ALLOWED_BUFFER_CAPACITIES[ALLOWED_BUFFER_CAPACITIES.len() - 1];

    if size < min_allowed {
        return min_allowed;
    }
    // Above the table: keep doubling from the largest standard size.
    if size > max_allowed {
        return round_above_table(size, max_allowed, policy);
    }

    let round_up = || {
        ALLOWED_BUFFER_CAPACITIES
            .iter()
            .copied()
            .find(|&allowed| size <= allowed)
            .unwrap_or(max_allowed)
    };

    match policy {
        CapacityPolicy::RoundUp | CapacityPolicy::Exact => round_up(),
        CapacityPolicy::RoundDown => ALLOWED_BUFFER_CAPACITIES
            .iter()
            .copied()
            .take_while(|&allowed| allowed <= size)
            .last()
            .unwrap_or(min_allowed),
        CapacityPolicy::Nearest { tolerance } => {
            let closest = ALLOWED_BUFFER_CAPACITIES
                .iter()
                .copied()
                .min_by_key(|&allowed| size.abs_diff(allowed))
                .unwrap_or(min_allowed);
            let rel_diff = size.abs_diff(closest) as f32 / size as f32;
            if rel_diff <= tolerance {
                closest
            } else {
                round_up()
            }
        }
    }
}

fn round_above_table(size: usize, max_allowed: usize, policy: CapacityPolicy) -> usize {
    let mut candidates = Vec::new();
    let mut current = max_allowed;
    while current <= MAX_BUFFER_CAPACITY {
        candidates.push(current);
        current *= 2;
    }

    let up = candidates
        .iter()
        .copied()
        .find(|&c| size <= c)
        .unwrap_or(MAX_BUFFER_CAPACITY);
    let down = candidates
        .iter()
        .copied()
        .take_while(|&c| c <= size)
        .last()
        .unwrap_or(max_allowed);

    match policy {
        CapacityPolicy::RoundDown => down,
        CapacityPolicy::Nearest { tolerance } => {
            let closest = if size - down <= up - size { down } else { up };
            if size.abs_diff(closest) as f32 / size as f32 <= tolerance {
                closest
            } else {
                up
            }
        }
        CapacityPolicy::RoundUp | CapacityPolicy::Exact => up,
    }
}
