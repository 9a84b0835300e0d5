//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cropcast-core for the field device's hardware:
//!
//! - DHT22 single-wire temperature/humidity sensor
//! - SH1106 128x64 OLED frame buffer over I2C
//! - Graphics adapter mapping fonts, icons and lines onto any
//!   `embedded-graphics` target

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod sensor;
