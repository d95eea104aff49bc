#[cfg(test)]
mod telemetry_tests {
    use std::time::Duration;

    use framestream_core::framing::encoded_len;
    use framestream_core::io::{CountingFlusher, SharedBuffer};
    use framestream_core::telemetry::{DrainCause, Stage, StageTimes, WriterCounters, WriterSnapshot};
    use framestream_core::writer::FramedBufferedWriter;

    #[test]
    fn counters_track_payload_overhead_and_drains() {
        let sink = SharedBuffer::default();
        let mut w = FramedBufferedWriter::with_capacity(0, sink.writer(), CountingFlusher::new());

        w.write_record(b"abc").unwrap();
        w.write_record(b"").unwrap();
        w.write_record(&[0u8; 200]).unwrap();
        w.close().unwrap();

        let c = w.counters();
        assert_eq!(c.records, 2);
        assert_eq!(c.bytes_payload, 203);
        assert_eq!(c.bytes_overhead, (1 + 4) + (2 + 4));
        assert_eq!(c.drains_capacity, 1);
        assert_eq!(c.drains_close, 1);
        assert_eq!(c.drains(), 2);
        assert_eq!(c.flush_signals, 2);
        assert_eq!(c.bytes_drained, sink.len() as u64);
        assert_eq!(c.bytes_encoded(), (encoded_len(3) + encoded_len(200)) as u64);
    }

    #[test]
    fn explicit_flush_is_counted_separately() {
        let sink = SharedBuffer::default();
        let mut w = FramedBufferedWriter::with_capacity(4096, sink.writer(), CountingFlusher::new());

        w.write_record(b"one").unwrap();
        w.flush_buffer().unwrap();
        w.flush_buffer().unwrap(); // empty: nothing to do
        w.close().unwrap();

        assert_eq!(w.counters().drains_explicit, 1);
        assert_eq!(w.counters().drains_close, 0);
        assert_eq!(sink.write_sizes().len(), 1);
    }

    #[test]
    fn snapshot_is_consistent_mid_stream() {
        let sink = SharedBuffer::default();
        let mut w = FramedBufferedWriter::with_capacity(64, sink.writer(), CountingFlusher::new());

        for i in 0..10u8 {
            w.write_record(&[i; 10]).unwrap();
        }

        let snap = w.snapshot();
        assert_eq!(snap.capacity, 64);
        assert_eq!(snap.buffered_bytes, w.buffered_len());
        assert!(snap.sanity_check());
        assert!(snap.overhead_ratio > 0.0 && snap.overhead_ratio < 1.0);
        assert!(snap.frames_per_drain > 0.0);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let sink = SharedBuffer::default();
        let mut w = FramedBufferedWriter::with_capacity(64, sink.writer(), CountingFlusher::new());
        w.write_record(b"json").unwrap();
        w.close().unwrap();

        let json = w.snapshot().to_json().unwrap();
        let back: WriterSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, *w.counters());
    }

    #[test]
    fn counters_bincode_roundtrip() {
        let mut c = WriterCounters::default();
        c.add_record(10, 15);
        c.add_drain(DrainCause::Capacity, 15);

        let bytes = c.to_bytes().unwrap();
        assert_eq!(WriterCounters::from_bytes(&bytes).unwrap(), c);
    }

    #[test]
    fn counters_merge_adds_fields() {
        let mut a = WriterCounters::default();
        a.add_record(3, 8);
        let mut b = WriterCounters::default();
        b.add_record(5, 10);
        b.add_drain(DrainCause::Close, 18);

        a.merge(&b);
        assert_eq!(a.records, 2);
        assert_eq!(a.bytes_payload, 8);
        assert_eq!(a.bytes_overhead, 10);
        assert_eq!(a.drains_close, 1);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Drain, Duration::from_millis(2));
        times.add(Stage::Drain, Duration::from_millis(3));
        times.add(Stage::Flush, Duration::from_millis(1));

        assert_eq!(times.get(Stage::Drain), Duration::from_millis(5));
        assert_eq!(times.get(Stage::Encode), Duration::ZERO);
        assert_eq!(times.total(), Duration::from_millis(6));
        assert_eq!(format!("{}", Stage::Flush), "flush");
    }
}
