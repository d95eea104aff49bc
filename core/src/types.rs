use std::io;
use thiserror::Error;

use crate::framing::FrameError;

/// Unified stream error covering sink I/O, short writes, framing, config and
/// writer lifecycle.
/// - `From<T>` impls enable `?` across the crate.
/// - After any drain failure the writer is poisoned and should be discarded.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The sink's `write` call itself failed. Not retried.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The sink accepted fewer bytes than the buffered frames.
    #[error("short write: wrote {written} but buffer is {expected}")]
    ShortWrite {
        written: usize,
        expected: usize,
    },

    /// Frame-level error (decode or validation).
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Invalid writer configuration.
    #[error("config error: {0}")]
    Config(String),

    /// `write_record` / `flush_buffer` called after `close`.
    #[error("writer closed")]
    Closed,

    /// Operation attempted after an earlier drain failed.
    #[error("writer poisoned by an earlier failed drain")]
    Poisoned,
}

impl StreamError {
    /// True for failures that came from the sink (write error or short write).
    pub fn is_sink_failure(&self) -> bool {
        matches!(self, StreamError::Io(_) | StreamError::ShortWrite { .. })
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(inner) => inner,
            StreamError::ShortWrite { .. } => io::Error::new(io::ErrorKind::WriteZero, e),
            StreamError::Frame(_) => io::Error::new(io::ErrorKind::InvalidData, e),
            StreamError::Config(_) => io::Error::new(io::ErrorKind::InvalidInput, e),
            StreamError::Closed | StreamError::Poisoned => io::Error::new(io::ErrorKind::BrokenPipe, e),
        }
    }
}
