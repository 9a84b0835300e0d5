//! Soil moisture classification
//!
//! A resistive probe reads a higher voltage the drier the soil is.

use crate::config::{ADC_FULL_SCALE, ADC_REFERENCE_V};

/// Upper bound (exclusive) of the Very Wet band (V)
pub const VERY_WET_BELOW_V: f32 = 1.7;

/// Upper bound (exclusive) of the Wet band (V)
pub const WET_BELOW_V: f32 = 2.3;

/// Upper bound (exclusive) of the Moist band (V)
pub const MOIST_BELOW_V: f32 = 2.7;

/// Upper bound (exclusive) of the Dry band (V)
pub const DRY_BELOW_V: f32 = 3.0;

/// Ordinal moisture band, wettest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoistureStatus {
    VeryWet,
    Wet,
    Moist,
    Dry,
    VeryDry,
}

impl MoistureStatus {
    /// Label shown on screen and sent to the server
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryWet => "Very Wet",
            Self::Wet => "Wet",
            Self::Moist => "Moist",
            Self::Dry => "Dry",
            Self::VeryDry => "Very Dry",
        }
    }
}

/// Classify a probe voltage
///
/// Bands are half-open, so a voltage on a threshold belongs to the drier
/// band. Anything not below the Dry bound (including NaN) is Very Dry.
pub fn classify(voltage: f32) -> MoistureStatus {
    if voltage < VERY_WET_BELOW_V {
        MoistureStatus::VeryWet
    } else if voltage < WET_BELOW_V {
        MoistureStatus::Wet
    } else if voltage < MOIST_BELOW_V {
        MoistureStatus::Moist
    } else if voltage < DRY_BELOW_V {
        MoistureStatus::Dry
    } else {
        MoistureStatus::VeryDry
    }
}

/// Convert a (mean) raw ADC code to volts
pub fn raw_to_voltage(raw: f32) -> f32 {
    raw * ADC_REFERENCE_V / ADC_FULL_SCALE as f32
}
