/// Flush signal invoked after every successful drain.
///
/// Pushes drained bytes past any intermediate buffering layer (an HTTP
/// chunked response, a `BufWriter`, a socket cork). It cannot fail; a
/// flusher that wraps a fallible operation decides on its own what to do
/// with the error.
pub trait Flusher {
    fn flush(&mut self);
}

impl<F: FnMut()> Flusher for F {
    #[inline]
    fn flush(&mut self) {
        self()
    }
}

/// Flusher for sinks that need no extra push.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFlusher;

impl Flusher for NoopFlusher {
    #[inline]
    fn flush(&mut self) {}
}
