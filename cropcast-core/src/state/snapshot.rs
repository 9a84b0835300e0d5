//! Latest-known sensor readings

use crate::sensor::{classify, MoistureStatus};

/// Latest sensor readings
///
/// Temperature and humidity are `None` until the first good read and keep
/// their last good value afterwards. Moisture status is always derived from
/// the stored voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    /// Air temperature (°C)
    pub temperature_c: Option<f32>,
    /// Relative humidity (%)
    pub humidity_pct: Option<f32>,
    moisture_voltage: f32,
    moisture_status: MoistureStatus,
}

impl SensorSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self {
            temperature_c: None,
            humidity_pct: None,
            moisture_voltage: 0.0,
            moisture_status: classify(0.0),
        }
    }

    /// Soil probe voltage (V)
    pub fn moisture_voltage(&self) -> f32 {
        self.moisture_voltage
    }

    /// Moisture band of the stored voltage
    pub fn moisture_status(&self) -> MoistureStatus {
        self.moisture_status
    }

    /// Store a new probe voltage and reclassify it
    pub fn set_moisture_voltage(&mut self, voltage: f32) {
        self.moisture_voltage = voltage;
        self.moisture_status = classify(voltage);
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
