//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in nixie-core on top of the nixie-hal bus and pin traits:
//!
//! - Real-time clock (DS3231 over I2C)
//! - Tube multiplexers (four BCD select lines per tube)

#![no_std]
#![deny(unsafe_code)]

pub mod rtc;
pub mod tubes;

pub use rtc::Ds3231;
pub use tubes::NixieMultiplexer;
