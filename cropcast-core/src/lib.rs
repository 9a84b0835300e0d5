//! Board-agnostic core logic for the field crop advisor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (climate sensor, analog input, network, display, clock)
//! - Sensor sampling and moisture classification
//! - Prediction client (request building, failure classification)
//! - Three-screen display presenter with a scrolling suggestion list
//! - Interval scheduler and the device control loop
//! - Configuration types and fixed constants

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the other modules see the logging macros
mod fmt;

pub mod config;
pub mod device;
pub mod display;
pub mod prediction;
pub mod scheduler;
pub mod sensor;
pub mod state;
pub mod traits;

#[cfg(test)]
mod mocks;

pub use device::{Board, BootError, Device};
