//! Climate sensor and analog input traits

/// Errors that can occur when reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not respond in time
    Timeout,
    /// Frame failed its checksum
    Checksum,
    /// Reading out of the sensor's range
    OutOfRange,
    /// ADC conversion error
    ConversionError,
}

/// Trait for combined temperature/humidity sensors
///
/// A reading of `NaN` is treated the same as an error by callers.
pub trait ClimateSensor {
    /// Read the air temperature in degrees Celsius
    fn read_temperature_c(&mut self) -> Result<f32, SensorError>;

    /// Read the relative humidity in percent
    fn read_humidity_pct(&mut self) -> Result<f32, SensorError>;
}

/// Trait for raw analog inputs
pub trait AnalogInput {
    /// Read one raw conversion from `channel`
    ///
    /// Returns a code in `0..=ADC_FULL_SCALE`.
    fn read_raw(&mut self, channel: u8) -> Result<u16, SensorError>;
}
