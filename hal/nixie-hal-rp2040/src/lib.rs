//! RP2040-specific HAL for the Nixie clock firmware
//!
//! Implements the `nixie-hal` traits on top of embassy-rp:
//!
//! - GPIO bank with board reservations, for config-driven tube wiring
//! - Push-pull outputs for the multiplexer select lines
//! - Blocking I2C master for the RTC bus

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod pins;

pub use gpio::RpOutput;
pub use i2c::RpI2c;
pub use pins::{BoardPeripherals, PinBank, PinError, GPIO_COUNT, RESERVED_PINS};
