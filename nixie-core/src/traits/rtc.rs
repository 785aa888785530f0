//! Real-time clock trait

use crate::time::WallClockTime;

/// Errors that can occur talking to the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Peripheral did not answer (absent or miswired)
    NotDetected,
    /// Bus transfer failed after the peripheral was detected
    Bus,
    /// Register contents are not a valid time encoding
    InvalidData,
    /// Time cannot be represented in the peripheral's registers
    UnsupportedTime,
}

/// Battery-backed real-time clock
///
/// Implementations hold the bus handle for one specific chip. All methods
/// take `&mut self` because every access is a bus transaction.
pub trait RtcDevice {
    /// Check that the peripheral answers on its bus
    fn probe(&mut self) -> Result<(), RtcError>;

    /// Read the current date and time
    fn read_time(&mut self) -> Result<WallClockTime, RtcError>;

    /// Write a new date and time
    ///
    /// A successful write also clears any lost-power indication.
    fn write_time(&mut self, time: &WallClockTime) -> Result<(), RtcError>;

    /// Check whether backup power was lost (stored time unreliable)
    fn lost_power(&mut self) -> Result<bool, RtcError>;
}
