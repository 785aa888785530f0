//! Inter-task communication channels
//!
//! The radio link is split across three tasks; these bounded channels are
//! the only state they share. A full channel drops the message.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use nixie_protocol::{ControllerCommand, RadioEvent};

/// Channel capacity for events decoded from the coprocessor
const RADIO_EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for commands waiting for the UART
const OUTBOUND_CHANNEL_SIZE: usize = 8;

pub type OutboundChannel =
    Channel<CriticalSectionRawMutex, ControllerCommand, OUTBOUND_CHANNEL_SIZE>;

/// Peer activity, from the RX task to the sync task
pub static RADIO_EVENTS: Channel<CriticalSectionRawMutex, RadioEvent, RADIO_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Commands for the coprocessor, drained by the TX task
pub static OUTBOUND: OutboundChannel = Channel::new();
