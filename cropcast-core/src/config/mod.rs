//! Configuration types
//!
//! Device configuration is fixed at build time. The firmware fills
//! [`DeviceConfig`] from values its build script validated.

pub mod types;

pub use types::*;
