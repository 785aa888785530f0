//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod gatt;
pub mod rtc;
pub mod tubes;

pub use gatt::{
    Characteristic, CharacteristicHandler, GattError, ReadOutcome, SyncError, WriteOutcome,
};
pub use rtc::{RtcDevice, RtcError};
pub use tubes::TubeDisplay;
