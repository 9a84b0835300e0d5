//! Sensor drivers

pub mod dht22;

pub use dht22::{decode_frame, Dht22, DhtError, DhtReading};
