// ## 📂 File: `src/io.rs`
// ## Normalized sinks + flush adapters for the framed writer

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::types::StreamError;
use crate::writer::Flusher;

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    Memory,
}

/// Normalize an output sink into a boxed writer.
///
/// `OutputSink::Memory` also returns a handle to the shared buffer so the
/// caller can read what was drained.
pub fn open_output(
    sink: OutputSink,
) -> Result<(Box<dyn Write + Send>, Option<SharedBuffer>), StreamError> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => Ok((Box::new(std::fs::File::create(p)?), None)),
        OutputSink::Memory => {
            let buf = SharedBuffer::default();
            Ok((Box::new(buf.writer()), Some(buf)))
        }
    }
}

// ================= In-memory sink =================

/// Cloneable handle to bytes written through a [`SharedBufferWriter`].
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<SharedState>>,
}

#[derive(Debug, Default)]
struct SharedState {
    bytes: Vec<u8>,
    writes: Vec<usize>,
}

impl SharedBuffer {
    pub fn writer(&self) -> SharedBufferWriter {
        SharedBufferWriter { buf: self.clone() }
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.with_state(|s| s.bytes.clone())
    }

    /// Size of each individual `write` call, in order.
    pub fn write_sizes(&self) -> Vec<usize> {
        self.with_state(|s| s.writes.clone())
    }

    pub fn len(&self) -> usize {
        self.with_state(|s| s.bytes.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_state<T>(&self, f: impl FnOnce(&SharedState) -> T) -> T {
        // A panicking writer cannot leave the Vec half-updated; keep reading.
        let guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }
}

/// `io::Write` half of a [`SharedBuffer`]. Accepts every write in full.
#[derive(Debug, Clone)]
pub struct SharedBufferWriter {
    buf: SharedBuffer,
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared buffer lock poisoned"))?;
        guard.bytes.extend_from_slice(data);
        guard.writes.push(data.len());
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ================= Flush adapters =================

/// Flusher that counts signals; clones share the count.
#[derive(Debug, Clone, Default)]
pub struct CountingFlusher {
    count: Arc<AtomicU64>,
}

impl CountingFlusher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Flusher for CountingFlusher {
    fn flush(&mut self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
