#[cfg(test)]
mod tests {
    use std::io::Write;

    use framestream_core::framing::decode_stream;
    use framestream_core::io::{open_output, CountingFlusher, OutputSink, SharedBuffer};
    use framestream_core::writer::{FramedBufferedWriter, Flusher};

    #[test]
    fn memory_sink_exposes_shared_buffer() {
        let (sink, shared) = open_output(OutputSink::Memory).unwrap();
        let shared = shared.expect("memory sink returns a handle");

        let mut w = FramedBufferedWriter::with_capacity(128, sink, CountingFlusher::new());
        w.write_record(b"in memory").unwrap();
        w.close().unwrap();

        assert_eq!(decode_stream(&shared.contents()).unwrap(), vec![b"in memory".to_vec()]);
    }

    #[test]
    fn file_sink_receives_frames() {
        let path = std::env::temp_dir().join(format!("framestream-{}.bin", std::process::id()));
        let (sink, shared) = open_output(OutputSink::File(path.clone())).unwrap();
        assert!(shared.is_none());

        let mut w = FramedBufferedWriter::with_capacity(0, sink, CountingFlusher::new());
        w.write_record(b"first").unwrap();
        w.write_record(b"second").unwrap();
        w.close().unwrap();
        drop(w);

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            decode_stream(&bytes).unwrap(),
            vec![b"first".to_vec(), b"second".to_vec()]
        );
    }

    #[test]
    fn boxed_writer_passes_through() {
        let shared = SharedBuffer::default();
        let (mut sink, handle) = open_output(OutputSink::Writer(Box::new(shared.writer()))).unwrap();
        assert!(handle.is_none());

        sink.write_all(b"raw").unwrap();
        assert_eq!(shared.contents(), b"raw".to_vec());
        assert_eq!(shared.write_sizes(), vec![3]);
    }

    #[test]
    fn counting_flusher_clones_share_count() {
        let mut a = CountingFlusher::new();
        let b = a.clone();
        a.flush();
        a.flush();
        assert_eq!(b.count(), 2);
    }
}
