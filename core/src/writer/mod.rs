//! Buffered frame writer.
//!
//! `FramedBufferedWriter` accumulates frames and drains them to an
//! `io::Write` sink in batches, signalling a `Flusher` after each drain.

pub mod buffered;
pub mod flusher;

pub use buffered::{FramedBufferedWriter, WriterState};
pub use flusher::{Flusher, NoopFlusher};
