#[cfg(test)]
mod tests {
    use framestream_core::config::{best_buffer_capacity, CapacityPolicy, WriterConfig};
    use framestream_core::constants::{DEFAULT_BUFFER_CAPACITY, MAX_BUFFER_CAPACITY};
    use framestream_core::types::StreamError;

    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;

    #[test]
    fn none_uses_default() {
        assert_eq!(best_buffer_capacity(None, CapacityPolicy::RoundUp), DEFAULT_BUFFER_CAPACITY);
        assert_eq!(WriterConfig::default().resolved_capacity().unwrap(), DEFAULT_BUFFER_CAPACITY);
    }

    #[test]
    fn standard_sizes_pass_through() {
        for policy in [CapacityPolicy::RoundUp, CapacityPolicy::RoundDown] {
            assert_eq!(best_buffer_capacity(Some(64 * KIB), policy), 64 * KIB);
        }
    }

    #[test]
    fn round_up_and_down_within_table() {
        assert_eq!(best_buffer_capacity(Some(5000), CapacityPolicy::RoundUp), 8 * KIB);
        assert_eq!(best_buffer_capacity(Some(5000), CapacityPolicy::RoundDown), 4 * KIB);
        assert_eq!(best_buffer_capacity(Some(300 * KIB), CapacityPolicy::RoundUp), MIB);
        assert_eq!(best_buffer_capacity(Some(300 * KIB), CapacityPolicy::RoundDown), 256 * KIB);
    }

    #[test]
    fn nearest_respects_tolerance() {
        let tight = CapacityPolicy::Nearest { tolerance: 0.01 };
        let loose = CapacityPolicy::Nearest { tolerance: 0.25 };

        // 33 KiB is ~3% away from 32 KiB.
        assert_eq!(best_buffer_capacity(Some(33 * KIB), loose), 32 * KIB);
        assert_eq!(best_buffer_capacity(Some(33 * KIB), tight), 64 * KIB);
    }

    #[test]
    fn below_table_clamps_to_smallest() {
        assert_eq!(best_buffer_capacity(Some(100), CapacityPolicy::RoundDown), 4 * KIB);
    }

    #[test]
    fn exact_keeps_requested_size() {
        assert_eq!(best_buffer_capacity(Some(100), CapacityPolicy::Exact), 100);
        assert_eq!(WriterConfig::with_capacity(24).resolved_capacity().unwrap(), 24);
    }

    #[test]
    fn above_table_doubles_and_clamps() {
        assert_eq!(best_buffer_capacity(Some(3 * MIB), CapacityPolicy::RoundUp), 4 * MIB);
        assert_eq!(best_buffer_capacity(Some(3 * MIB), CapacityPolicy::RoundDown), 2 * MIB);
        assert_eq!(
            best_buffer_capacity(Some(usize::MAX), CapacityPolicy::RoundUp),
            MAX_BUFFER_CAPACITY
        );
        assert_eq!(
            best_buffer_capacity(Some(usize::MAX), CapacityPolicy::Exact),
            MAX_BUFFER_CAPACITY
        );
    }

    #[test]
    fn json_roundtrip() {
        let config = WriterConfig {
            buffer_capacity: Some(16 * KIB),
            policy: CapacityPolicy::Nearest { tolerance: 0.1 },
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(WriterConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn json_defaults_missing_fields() {
        let config = WriterConfig::from_json("{}").unwrap();
        assert_eq!(config, WriterConfig::default());
        assert_eq!(config.policy, CapacityPolicy::RoundUp);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(matches!(
            WriterConfig::from_json(r#"{"buffer_capacity": 0}"#),
            Err(StreamError::Config(_))
        ));
        assert!(matches!(
            WriterConfig::from_json(r#"{"policy": {"nearest": {"tolerance": 2.0}}}"#),
            Err(StreamError::Config(_))
        ));
        assert!(matches!(
            WriterConfig::from_json("not json"),
            Err(StreamError::Config(_))
        ));
    }
}
