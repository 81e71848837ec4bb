//! Startup configuration consumed by the rendering core.
//!
//! Persistence of these values lives outside this crate; the core only
//! reads them through [`ConfigSource`] once at startup.

use embassy_time::Duration;
use heapless::String;

use crate::encoder::DEFAULT_RESOLUTION_HZ;
use crate::error::{InvalidArgumentSnafu, Result};
use crate::topology::Topology;

/// Maximum length of device and BLE names.
pub const NAME_CAPACITY: usize = 32;

const DEFAULT_LED_GPIO: i32 = 48;
const DEFAULT_LED_COUNT: u32 = 1;
const DEFAULT_NAME: &str = "MotoRGB";

pub type DeviceName = String<NAME_CAPACITY>;

/// Read-only access to the persisted device configuration
pub trait ConfigSource {
    /// GPIO pin of the LED data line
    fn led_gpio(&self) -> i32;
    /// Number of LEDs on the data line
    fn led_count(&self) -> u32;
    fn device_name(&self) -> &str;
    fn ble_name(&self) -> &str;
}

/// Device configuration values used by the LED core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub led_gpio: i32,
    pub led_count: u32,
    pub device_name: DeviceName,
    pub ble_name: DeviceName,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let mut name = DeviceName::new();
        // DEFAULT_NAME is shorter than NAME_CAPACITY
        let _ = name.push_str(DEFAULT_NAME);
        Self {
            led_gpio: DEFAULT_LED_GPIO,
            led_count: DEFAULT_LED_COUNT,
            device_name: name.clone(),
            ble_name: name,
        }
    }
}

impl DeviceConfig {
    /// Topology for a single forward strip of `led_count` LEDs
    pub fn topology(&self) -> Result<Topology> {
        topology_from(self)
    }
}

impl ConfigSource for DeviceConfig {
    fn led_gpio(&self) -> i32 {
        self.led_gpio
    }

    fn led_count(&self) -> u32 {
        self.led_count
    }

    fn device_name(&self) -> &str {
        &self.device_name
    }

    fn ble_name(&self) -> &str {
        &self.ble_name
    }
}

/// Build a single-strip topology from any configuration source
pub fn topology_from(config: &impl ConfigSource) -> Result<Topology> {
    let count = u16::try_from(config.led_count()).map_err(|_| {
        InvalidArgumentSnafu {
            reason: "led count exceeds strip capacity",
        }
        .build()
    })?;
    Ok(Topology::single(count))
}

/// Peripheral channel settings for the strip driver
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Tick rate of the pulse peripheral
    pub resolution_hz: u32,
    /// Symbols per peripheral memory block
    pub mem_block_symbols: usize,
    /// Pending transmissions the peripheral may queue
    pub trans_queue_depth: usize,
    pub with_dma: bool,
    /// Upper bound for waiting on a transmission; `None` blocks forever
    pub wait_timeout: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            resolution_hz: DEFAULT_RESOLUTION_HZ,
            mem_block_symbols: 64,
            trans_queue_depth: 4,
            with_dma: true,
            wait_timeout: None,
        }
    }
}

/// Render loop pacing
#[derive(Debug, Clone, Copy)]
pub struct FrameConfig {
    pub frame_duration: Duration,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_duration: Duration::from_millis(30),
        }
    }
}
