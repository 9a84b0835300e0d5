//! Sensor sampling task

use embedded_hal_async::delay::DelayNs;

use crate::config::{MOISTURE_CHANNEL, MOISTURE_SAMPLES, MOISTURE_SAMPLE_PACING_MS};
use crate::state::SensorSnapshot;
use crate::traits::{AnalogInput, ClimateSensor};

use super::moisture::raw_to_voltage;

/// Which parts of a sample produced fresh values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReport {
    /// Temperature was updated
    pub temperature: bool,
    /// Humidity was updated
    pub humidity: bool,
    /// Good ADC samples in the moisture average
    pub moisture_samples: u8,
}

/// Reads the climate sensor and soil probe into a snapshot
pub struct SensorReader<S, A> {
    climate: S,
    adc: A,
}

impl<S: ClimateSensor, A: AnalogInput> SensorReader<S, A> {
    /// Create a reader
    pub fn new(climate: S, adc: A) -> Self {
        Self { climate, adc }
    }

    /// Take one sample of every sensor
    ///
    /// A failed or NaN climate reading leaves the previous value in place.
    /// Moisture is the mean of [`MOISTURE_SAMPLES`] conversions paced
    /// [`MOISTURE_SAMPLE_PACING_MS`] apart; failed conversions are left out of
    /// the mean, and if none succeed the previous voltage is kept.
    pub async fn sample<D: DelayNs>(
        &mut self,
        delay: &mut D,
        snapshot: &mut SensorSnapshot,
    ) -> SampleReport {
        let mut report = SampleReport::default();

        match self.climate.read_temperature_c() {
            Ok(t) if !t.is_nan() => {
                snapshot.temperature_c = Some(t);
                report.temperature = true;
            }
            Ok(_) => warn!("Temperature read returned NaN"),
            Err(e) => warn!("Temperature read failed: {}", e),
        }

        match self.climate.read_humidity_pct() {
            Ok(h) if !h.is_nan() => {
                snapshot.humidity_pct = Some(h);
                report.humidity = true;
            }
            Ok(_) => warn!("Humidity read returned NaN"),
            Err(e) => warn!("Humidity read failed: {}", e),
        }

        let mut total: u32 = 0;
        let mut count: u8 = 0;
        for _ in 0..MOISTURE_SAMPLES {
            match self.adc.read_raw(MOISTURE_CHANNEL) {
                Ok(raw) => {
                    total += u32::from(raw);
                    count += 1;
                }
                Err(e) => debug!("Moisture sample dropped: {}", e),
            }
            delay.delay_ms(MOISTURE_SAMPLE_PACING_MS).await;
        }
        report.moisture_samples = count;

        if count > 0 {
            let mean = total as f32 / f32::from(count);
            snapshot.set_moisture_voltage(raw_to_voltage(mean));
        } else {
            warn!("All moisture samples failed, keeping previous reading");
        }

        info!(
            "Sensors Read: Temp={}C, Hum={}%, Soil={}V ({})",
            snapshot.temperature_c,
            snapshot.humidity_pct,
            snapshot.moisture_voltage(),
            snapshot.moisture_status().label()
        );

        report
    }
}
