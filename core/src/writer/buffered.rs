use std::io::{self, Write};
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::config::WriterConfig;
use crate::framing::{encode_frame, max_encoded_len};
use crate::telemetry::{DrainCause, Stage, TelemetryTimer, WriterCounters, WriterSnapshot};
use crate::types::StreamError;
use crate::writer::flusher::Flusher;

/// Lifecycle of a [`FramedBufferedWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Accepting records; buffer empty or partially filled.
    Open,
    /// `close()` succeeded. Terminal.
    Closed,
    /// A drain failed; what reached the sink is unknown. Terminal.
    Poisoned,
}

/// Packs records into checksummed frames and ships them to `sink` in batches.
///
/// Frames accumulate in a buffer of fixed capacity. When the next frame might
/// not fit, the whole buffer is written to the sink in a single `write` call
/// and `flusher` is signalled. `close()` drains whatever is left.
pub struct FramedBufferedWriter<W: Write, F: Flusher> {
    sink: W,
    flusher: F,
    buf: Vec<u8>,
    capacity: usize,
    state: WriterState,
    counters: WriterCounters,
    timer: TelemetryTimer,
}

impl<W: Write, F: Flusher> FramedBufferedWriter<W, F> {
    /// Build a writer around a caller-supplied buffer.
    ///
    /// The buffer's contents are discarded; its allocated capacity becomes
    /// the batching capacity for the writer's whole life.
    pub fn new(mut write_buf: Vec<u8>, sink: W, flusher: F) -> Self {
        write_buf.clear();
        let capacity = write_buf.capacity();
        Self {
            sink,
            flusher,
            buf: write_buf,
            capacity,
            state: WriterState::Open,
            counters: WriterCounters::default(),
            timer: TelemetryTimer::new(),
        }
    }

    pub fn with_capacity(capacity: usize, sink: W, flusher: F) -> Self {
        let mut writer = Self::new(Vec::with_capacity(capacity), sink, flusher);
        // Vec may over-allocate; batching follows the requested figure.
        writer.capacity = capacity;
        writer
    }

    pub fn from_config(config: &WriterConfig, sink: W, flusher: F) -> Result<Self, StreamError> {
        let capacity = config.resolved_capacity()?;
        debug!(capacity, "framed writer configured");
        Ok(Self::with_capacity(capacity, sink, flusher))
    }

    // ================= Record path =================

    /// Frame `record` and buffer it, draining first if it might not fit.
    ///
    /// Returns the number of payload bytes accepted, always `record.len()`
    /// on success. An empty record is a no-op returning `Ok(0)`.
    pub fn write_record(&mut self, record: &[u8]) -> Result<usize, StreamError> {
        self.ensure_open()?;

        if record.is_empty() {
            return Ok(0);
        }

        let required = max_encoded_len(record.len());
        if !self.buf.is_empty() && self.remaining() < required {
            self.drain(DrainCause::Capacity)?;
        }

        let started = Instant::now();
        let frame_len = encode_frame(&mut self.buf, record);
        self.timer.add_stage_time(Stage::Encode, started.elapsed());
        self.counters.add_record(record.len(), frame_len);

        trace!(
            payload = record.len(),
            frame = frame_len,
            buffered = self.buf.len(),
            "frame buffered"
        );

        Ok(record.len())
    }

    /// Drain buffered frames without closing. No-op when the buffer is empty.
    pub fn flush_buffer(&mut self) -> Result<(), StreamError> {
        self.ensure_open()?;
        self.drain(DrainCause::Explicit)
    }

    /// Drain the remaining frames and close the writer.
    ///
    /// With an empty buffer nothing is written and the flusher is not
    /// signalled. Closing an already closed writer is a no-op.
    pub fn close(&mut self) -> Result<(), StreamError> {
        match self.state {
            WriterState::Closed => return Ok(()),
            WriterState::Poisoned => return Err(StreamError::Poisoned),
            WriterState::Open => {}
        }

        self.drain(DrainCause::Close)?;
        self.state = WriterState::Closed;
        self.timer.finish();
        debug!(
            records = self.counters.records,
            drains = self.counters.drains(),
            "framed writer closed"
        );
        Ok(())
    }

    // ================= Drain =================

    /// Write the whole buffer in one sink call, verify the count, signal the
    /// flusher, reset the buffer. Shared by capacity drains, explicit flushes
    /// and close.
    fn drain(&mut self, cause: DrainCause) -> Result<(), StreamError> {
        if self.buf.is_empty() {
            return Ok(());
        }

        let expected = self.buf.len();
        let started = Instant::now();
        let result = self.sink.write(&self.buf);
        self.timer.add_stage_time(Stage::Drain, started.elapsed());

        let written = match result {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, expected, ?cause, "sink write failed");
                return Err(self.poison(StreamError::Io(e)));
            }
        };
        if written != expected {
            warn!(written, expected, ?cause, "short write to sink");
            return Err(self.poison(StreamError::ShortWrite { written, expected }));
        }

        let started = Instant::now();
        self.flusher.flush();
        self.timer.add_stage_time(Stage::Flush, started.elapsed());

        self.buf.clear();
        self.counters.add_drain(cause, expected);
        debug!(bytes = expected, ?cause, "buffer drained");
        Ok(())
    }

    fn poison(&mut self, err: StreamError) -> StreamError {
        self.state = WriterState::Poisoned;
        self.counters.add_failed_drain();
        err
    }

    fn ensure_open(&self) -> Result<(), StreamError> {
        match self.state {
            WriterState::Open => Ok(()),
            WriterState::Closed => Err(StreamError::Closed),
            WriterState::Poisoned => Err(StreamError::Poisoned),
        }
    }

    // ================= Accessors =================

    /// Batching capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    /// Complete frames waiting for the next drain.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }

    /// Capacity left before a drain is forced. Zero once a single oversize
    /// frame has grown the buffer past its capacity.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.buf.len())
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == WriterState::Closed
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Mutable access to the sink. Writing to it directly interleaves with
    /// framed output and breaks the stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn flusher(&self) -> &F {
        &self.flusher
    }

    pub fn counters(&self) -> &WriterCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> WriterSnapshot {
        WriterSnapshot::from(&self.counters, &self.timer, self.capacity, self.buf.len())
    }

    /// Take the writer apart. Frames still buffered are returned in the
    /// third element, not written.
    pub fn into_parts(self) -> (W, F, Vec<u8>) {
        if !self.buf.is_empty() {
            warn!(pending = self.buf.len(), "framed writer dismantled with undrained frames");
        }
        (self.sink, self.flusher, self.buf)
    }
}

/// Each `write` call is one record; `flush` drains the buffer.
impl<W: Write, F: Flusher> Write for FramedBufferedWriter<W, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_record(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.flush_buffer()?)
    }
}
