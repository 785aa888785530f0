//! Shared wall-clock time source
//!
//! The RTC is the authoritative time. It is read by the render loop and
//! adjusted by the sync service, from different tasks; [`TimeSource`] is
//! the single point of mutual exclusion for both.

pub mod source;

pub use source::{StartupReport, TimeSource};
