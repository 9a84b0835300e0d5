//! DHT22 (AM2302) temperature/humidity sensor
//!
//! Single-wire protocol on one open-drain pin with a pull-up. The host pulls
//! the line low for at least 1 ms to start a conversion, then the sensor
//! answers with an 80 µs low/high preamble followed by 40 bits. Each bit is
//! a 50 µs low followed by a high pulse of ~27 µs (0) or ~70 µs (1).
//!
//! Frame layout (big endian):
//! ```text
//! [humidity x10: u16][temperature x10: sign bit + 15 bits][checksum: u8]
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use cropcast_core::traits::{ClimateSensor, SensorError};

/// Start pulse length (µs)
const START_LOW_US: u32 = 1_100;

/// Release time before the sensor answers (µs)
const RELEASE_US: u32 = 40;

/// Sample point after a bit's rising edge (µs)
const BIT_SAMPLE_US: u32 = 35;

/// Longest wait for any edge (µs)
const EDGE_TIMEOUT_US: u32 = 100;

/// Errors from a DHT22 transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DhtError {
    /// An expected edge did not arrive
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// GPIO access failed
    Pin,
}

impl From<DhtError> for SensorError {
    fn from(e: DhtError) -> Self {
        match e {
            DhtError::Timeout => SensorError::Timeout,
            DhtError::Checksum => SensorError::Checksum,
            DhtError::Pin => SensorError::ConversionError,
        }
    }
}

/// One decoded conversion
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DhtReading {
    /// Air temperature (°C)
    pub temperature_c: f32,
    /// Relative humidity (%)
    pub humidity_pct: f32,
}

/// Decode a raw 5-byte frame
pub fn decode_frame(frame: [u8; 5]) -> Result<DhtReading, DhtError> {
    let sum = frame[..4]
        .iter()
        .fold(0u8, |acc, &b| acc.wrapping_add(b));
    if sum != frame[4] {
        return Err(DhtError::Checksum);
    }

    let humidity_x10 = u16::from_be_bytes([frame[0], frame[1]]);
    let magnitude_x10 = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
    let temperature_x10 = if frame[2] & 0x80 != 0 {
        -(magnitude_x10 as i32)
    } else {
        magnitude_x10 as i32
    };

    Ok(DhtReading {
        temperature_c: temperature_x10 as f32 / 10.0,
        humidity_pct: f32::from(humidity_x10) / 10.0,
    })
}

/// DHT22 driver
///
/// Both values come from one conversion. A temperature read starts a new
/// conversion and holds its humidity for the next humidity read, so the
/// usual temperature-then-humidity sequence costs one transaction.
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
    pending_humidity: Option<f32>,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a driver; the pin is released high
    pub fn new(mut pin: P, delay: D) -> Self {
        let _ = pin.set_high();
        Self {
            pin,
            delay,
            pending_humidity: None,
        }
    }

    /// Run one conversion
    pub fn read(&mut self) -> Result<DhtReading, DhtError> {
        let frame = self.read_frame()?;
        decode_frame(frame)
    }

    fn read_frame(&mut self) -> Result<[u8; 5], DhtError> {
        self.pin.set_low().map_err(|_| DhtError::Pin)?;
        self.delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| DhtError::Pin)?;
        self.delay.delay_us(RELEASE_US);

        // Preamble
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; 5];
        for byte in frame.iter_mut() {
            for _ in 0..8 {
                self.wait_for(true)?;
                self.delay.delay_us(BIT_SAMPLE_US);
                let bit = self.pin.is_high().map_err(|_| DhtError::Pin)?;
                *byte = (*byte << 1) | u8::from(bit);
                if bit {
                    self.wait_for(false)?;
                }
            }
        }

        Ok(frame)
    }

    fn wait_for(&mut self, high: bool) -> Result<(), DhtError> {
        for _ in 0..EDGE_TIMEOUT_US {
            if self.pin.is_high().map_err(|_| DhtError::Pin)? == high {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(DhtError::Timeout)
    }
}

impl<P, D> ClimateSensor for Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_temperature_c(&mut self) -> Result<f32, SensorError> {
        self.pending_humidity = None;
        let reading = self.read()?;
        self.pending_humidity = Some(reading.humidity_pct);
        Ok(reading.temperature_c)
    }

    fn read_humidity_pct(&mut self) -> Result<f32, SensorError> {
        match self.pending_humidity.take() {
            Some(humidity) => Ok(humidity),
            None => Ok(self.read()?.humidity_pct),
        }
    }
}
