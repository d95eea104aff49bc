/// Maximum encoded length of a `u64` as an unsigned LEB128 varint.
pub const MAX_VARINT_LEN64: usize = 10;

/// Width of the big-endian CRC-32C field that follows the length prefix.
pub const CHECKSUM_LEN: usize = 4;

/// Worst-case framing overhead reserved per record before deciding to drain.
pub const MAX_FRAME_OVERHEAD: usize = MAX_VARINT_LEN64 + CHECKSUM_LEN;

/// Defaults when Option<T> is None
pub const DEFAULT_BUFFER_CAPACITY: usize = 32 * 1024; // 32 KiB

/// Standard buffer capacities (in bytes)
pub const ALLOWED_BUFFER_CAPACITIES: &[usize] = &[
    4 * 1024,    // 4 KiB
    8 * 1024,    // 8 KiB
    16 * 1024,   // 16 KiB
    32 * 1024,   // 32 KiB
    64 * 1024,   // 64 KiB
    128 * 1024,  // 128 KiB
    256 * 1024,  // 256 KiB
    1024 * 1024, // 1 MiB
];

/// Max buffer capacity sanity bound (64 MiB).
pub const MAX_BUFFER_CAPACITY: usize = 64 * 1024 * 1024;
