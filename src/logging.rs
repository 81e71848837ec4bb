//! Logger installation for ESP32 targets.
//!
//! The crate itself only emits records through the `log` facade; firmware
//! built with the `esp32-log` feature can route them to the serial console.

pub use log::LevelFilter;

/// Install `esp-println` as the global logger
pub fn init(level: LevelFilter) {
    esp_println::logger::init_logger(level);
}
