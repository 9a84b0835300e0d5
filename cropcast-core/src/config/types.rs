//! Configuration type definitions and fixed device constants

use cropcast_protocol::EndpointError;

/// Soil nitrogen sent with every request
pub const SOIL_NITROGEN: f32 = 90.0;

/// Soil phosphorus sent with every request
pub const SOIL_PHOSPHORUS: f32 = 42.0;

/// Soil potassium sent with every request
pub const SOIL_POTASSIUM: f32 = 43.0;

/// Soil pH sent with every request
pub const SOIL_PH: f32 = 6.8;

/// ADC reference voltage (V)
pub const ADC_REFERENCE_V: f32 = 3.3;

/// ADC full-scale code (12-bit)
pub const ADC_FULL_SCALE: u16 = 4095;

/// ADC channel wired to the soil probe
pub const MOISTURE_CHANNEL: u8 = 0;

/// Raw samples averaged per moisture reading
pub const MOISTURE_SAMPLES: usize = 10;

/// Pacing delay after each moisture sample (ms)
pub const MOISTURE_SAMPLE_PACING_MS: u32 = 10;

/// WiFi join attempts before giving up
pub const WIFI_MAX_ATTEMPTS: u32 = 20;

/// Delay between WiFi join attempts (ms)
pub const WIFI_RETRY_MS: u32 = 500;

/// How long the boot splash stays up (ms)
pub const BOOT_SPLASH_MS: u32 = 1000;

/// How long the WiFi failure screen stays up before restart (ms)
pub const FAILURE_SCREEN_MS: u32 = 3000;

/// Socket timeout for one prediction round trip (ms)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 5000;

/// Errors in device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Base URL plus endpoint path does not fit the URL buffer
    UrlTooLong,
    /// Endpoint URL could not be parsed
    InvalidUrl(EndpointError),
}

/// Network identity and server location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// WiFi network name
    pub wifi_ssid: &'static str,
    /// WiFi passphrase
    pub wifi_password: &'static str,
    /// Server base URL, e.g. `http://10.0.0.2:1234`
    pub base_url: &'static str,
}

/// Periods of the scheduled tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Intervals {
    /// Sensor sampling period (ms)
    pub sensor_ms: u32,
    /// Prediction fetch period (ms)
    pub prediction_ms: u32,
    /// Screen rotation period (ms)
    pub rotation_ms: u32,
    /// Suggestion scroll period (ms)
    pub scroll_ms: u32,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            sensor_ms: 2000,
            prediction_ms: 60_000,
            rotation_ms: 8000,
            scroll_ms: 2000,
        }
    }
}
