//! Nixie clock Hardware Abstraction Layer
//!
//! Defines the two hardware seams the clock needs: digital output lines
//! (tube multiplexer select lines) and an I2C master (the RTC bus). Chip
//! specific crates implement these traits; drivers in `nixie-drivers` are
//! written against them so they can be exercised on the host with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nixie-firmware                         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-drivers (DS3231, multiplexer)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal-rp2040                       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cBusError, I2cConfig};
