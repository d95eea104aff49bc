//! framestream-core
//!
//! Batched, checksummed record framing over any `io::Write`.
//!
//! Each record becomes `[varint len][crc32c BE][payload]`. Frames collect in
//! a fixed-capacity buffer that is drained to the sink in one write, followed
//! by a flush signal, whenever the next frame might not fit or the writer is
//! closed.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;
pub mod checksum;

// Framing + writer layers
pub mod framing;
pub mod writer;
pub mod io;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{CapacityPolicy, WriterConfig};
    pub use crate::framing::{decode_stream, encode_frame, FrameError, FrameIter, FrameView};
    pub use crate::types::StreamError;
    pub use crate::writer::{FramedBufferedWriter, Flusher, NoopFlusher, WriterState};
}
