//! Pico W adapters for the analog input and the clock

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_time::Instant;

use cropcast_core::config::MOISTURE_CHANNEL;
use cropcast_core::traits::{AnalogInput, Clock, SensorError};

/// Soil probe on ADC0 (GP26)
pub struct MoistureAdc {
    adc: Adc<'static, Blocking>,
    probe: Channel<'static>,
}

impl MoistureAdc {
    pub fn new(adc: Adc<'static, Blocking>, probe: Channel<'static>) -> Self {
        Self { adc, probe }
    }
}

impl AnalogInput for MoistureAdc {
    fn read_raw(&mut self, channel: u8) -> Result<u16, SensorError> {
        if channel != MOISTURE_CHANNEL {
            return Err(SensorError::ConversionError);
        }
        self.adc
            .blocking_read(&mut self.probe)
            .map_err(|_| SensorError::ConversionError)
    }
}

/// Milliseconds since boot from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
