//! Sensor sampling
//!
//! Reads the climate sensor and the soil probe into the shared snapshot.

pub mod moisture;
pub mod reader;

pub use moisture::{classify, raw_to_voltage, MoistureStatus};
pub use reader::{SampleReport, SensorReader};
