//! Board-agnostic core logic for the Nixie clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (RTC, tube display, GATT characteristic)
//! - The shared, mutex-guarded time source
//! - Digit decomposition, tube wiring tables and the render tick
//! - The time-sync characteristic handler
//! - Configuration types and the embedded TOML parser

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod display;
pub mod sync;
pub mod time;
pub mod traits;

pub use clock::{StartupReport, TimeSource};
pub use time::WallClockTime;
