mod tests {
    use std::sync::Mutex;

    use log::{LevelFilter, Log, Metadata, Record};
    use motorgb_led::{DeviceConfig, Topology};

    struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };

    fn captured(f: impl FnOnce()) -> Vec<String> {
        // Installing twice fails; the first logger stays in place
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
        LOGGER.lines.lock().unwrap().clear();
        f();
        LOGGER.lines.lock().unwrap().clone()
    }

    #[test]
    fn test_topology_layout_is_logged() {
        let lines = captured(|| {
            Topology::single(12);
            DeviceConfig {
                led_count: 30,
                ..DeviceConfig::default()
            }
            .topology()
            .unwrap();
        });
        assert!(lines.contains(&"Topology loaded: 1 strips, 12 total LEDs".to_string()));
        assert!(lines.contains(&"Topology loaded: 1 strips, 30 total LEDs".to_string()));
    }
}
