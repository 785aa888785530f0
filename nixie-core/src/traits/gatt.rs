//! GATT characteristic traits
//!
//! The radio stack is an external collaborator. It is seen through two
//! capabilities:
//!
//! - [`Characteristic`]: what the application may do to the exposed value
//!   (replace it, notify subscribers)
//! - [`CharacteristicHandler`]: the callbacks the radio invokes on behalf
//!   of a remote peer
//!
//! Production code implements `Characteristic` over the coprocessor link,
//! tests implement it with a recording double.

use super::rtc::RtcError;
use crate::time::WallClockTime;

/// Errors reported by the radio side of a characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GattError {
    /// Value longer than the characteristic allows
    ValueTooLong,
    /// Outbound queue to the radio is full
    QueueFull,
}

/// Reasons a sync request or response did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// Payload is not of the form `hh:mm`
    Malformed,
    /// Hour or minute rejected by the bounds policy
    OutOfRange,
    /// Response text did not fit its buffer
    Format,
    /// RTC access failed
    Rtc(RtcError),
    /// Radio refused the value or notification
    Characteristic(GattError),
}

impl From<RtcError> for SyncError {
    fn from(e: RtcError) -> Self {
        SyncError::Rtc(e)
    }
}

impl From<GattError> for SyncError {
    fn from(e: GattError) -> Self {
        SyncError::Characteristic(e)
    }
}

/// Result of a remote write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOutcome {
    /// Time source adjusted; carries the timestamp written to the RTC
    Applied(WallClockTime),
    /// Payload rejected; time source untouched, peer not told
    Discarded(SyncError),
    /// Payload valid but the RTC write failed
    Failed(RtcError),
}

/// Result of a remote read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    /// Value set and notification sent
    Notified {
        /// Hour that was published
        hour: u8,
        /// Minute that was published
        minute: u8,
    },
    /// Value set but the notification could not be sent
    NotifyFailed {
        /// Hour that was set
        hour: u8,
        /// Minute that was set
        minute: u8,
        /// Why the notification failed
        error: GattError,
    },
    /// Read given up; no value set, no notification
    Abandoned(SyncError),
}

/// Radio-side operations on the exposed characteristic
pub trait Characteristic {
    /// Replace the characteristic's current value
    fn set_value(&mut self, value: &[u8]) -> Result<(), GattError>;

    /// Notify subscribed peers of the current value
    fn notify(&mut self) -> Result<(), GattError>;
}

/// Callbacks invoked by the radio stack
pub trait CharacteristicHandler {
    /// A peer connected
    fn on_connect(&mut self);

    /// A peer disconnected
    fn on_disconnect(&mut self);

    /// A peer wrote `value` to the characteristic
    fn on_write(&mut self, value: &[u8]) -> WriteOutcome;

    /// A peer read the characteristic
    fn on_read<C: Characteristic>(&mut self, characteristic: &mut C) -> ReadOutcome;
}
