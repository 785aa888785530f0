//! Wireless time synchronization
//!
//! A single characteristic carries `hh:mm` text. Remote writes set the
//! clock; remote reads publish the current time and notify. Radio events
//! arrive as [`GattEvent`]s and are routed to a [`CharacteristicHandler`]
//! by [`dispatch`].

pub mod request;
pub mod service;

pub use request::{format_time, BoundsPolicy, TimeSyncRequest, TimeText, TIME_TEXT_CAPACITY};
pub use service::{SyncStats, TimeSyncService};

use crate::traits::{Characteristic, CharacteristicHandler, ReadOutcome, WriteOutcome};

/// Event raised by the radio on behalf of a peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GattEvent<'a> {
    Connected,
    Disconnected,
    /// Peer wrote this value
    Write(&'a [u8]),
    /// Peer requested the value
    Read,
}

/// What the handler did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandlerOutcome {
    Connected,
    Disconnected,
    Write(WriteOutcome),
    Read(ReadOutcome),
}

/// Route one radio event to the handler
pub fn dispatch<H, C>(handler: &mut H, event: GattEvent<'_>, characteristic: &mut C) -> HandlerOutcome
where
    H: CharacteristicHandler,
    C: Characteristic,
{
    match event {
        GattEvent::Connected => {
            handler.on_connect();
            HandlerOutcome::Connected
        }
        GattEvent::Disconnected => {
            handler.on_disconnect();
            HandlerOutcome::Disconnected
        }
        GattEvent::Write(value) => HandlerOutcome::Write(handler.on_write(value)),
        GattEvent::Read => HandlerOutcome::Read(handler.on_read(characteristic)),
    }
}
